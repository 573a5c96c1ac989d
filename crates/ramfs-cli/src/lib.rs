//! Command shell for the ramfs in-memory file store.
//!
//! This library holds everything the `ramfs` binary does apart from argument
//! parsing, so the pieces can be tested without a process:
//! - [`tokenizer`]: splits input lines, honouring quotes and escapes
//! - [`command`]: turns tokens into a [`Command`](command::Command)
//! - [`runner`]: executes commands against a filesystem session
//! - [`formatters`]: renders results as the text protocol or JSON
//! - [`config`]: loads filesystem limits from TOML

use clap::ValueEnum;

pub mod command;
pub mod config;
pub mod formatters;
pub mod runner;
pub mod tokenizer;

pub use command::{Command, CommandError};
pub use runner::{Outcome, SessionSummary, execute, run_session};

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `ok` / `ok <n>` / `no` / `contenuto <content>` lines.
    #[default]
    Text,
    /// One JSON object per command.
    Json,
}
