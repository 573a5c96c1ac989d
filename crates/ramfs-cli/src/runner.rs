//! Executes shell commands against a filesystem.
//!
//! A session reads one command per line, prints one result per command, and
//! stops at `exit` or end of input. The tree is cleared when the session ends.
//!
//! # Examples
//!
//! ```
//! use ramfs_cli::{OutputFormat, run_session};
//! use ramfs_core::RamFs;
//!
//! let script = "create /f\nwrite /f hello\nread /f\nexit\n";
//! let mut output = Vec::new();
//! let mut fs = RamFs::new();
//!
//! let summary = run_session(script.as_bytes(), &mut output, &mut fs, OutputFormat::Text)?;
//!
//! assert_eq!(String::from_utf8(output)?, "ok\nok 5\ncontenuto hello\n");
//! assert_eq!(summary.commands, 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::OutputFormat;
use crate::command::Command;
use crate::formatters::format_outcome;
use anyhow::{Context, Result};
use ramfs_core::RamFs;
use std::io::{BufRead, Write};

/// Result of one executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Succeeded with nothing to report.
    Done,
    /// `write` succeeded with this many bytes.
    Written(usize),
    /// `read` returned this content.
    Content(Vec<u8>),
    /// `find` matches, sorted. May be empty.
    Found(Vec<String>),
    /// The command was rejected.
    Failed(String),
}

impl Outcome {
    /// Returns `true` if the command succeeded.
    ///
    /// A search with no matches counts as a failure, as it prints `no`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Found(paths) => !paths.is_empty(),
            Self::Failed(_) => false,
            Self::Done | Self::Written(_) | Self::Content(_) => true,
        }
    }
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands executed, `exit` and blank lines excluded.
    pub commands: usize,
    /// Commands that printed `no`.
    pub failures: usize,
}

/// Executes one command.
///
/// `exit` is a no-op here; ending the session is up to the caller.
pub fn execute(fs: &mut RamFs, command: &Command) -> Outcome {
    let result = match command {
        Command::Create { path } => fs.create(path).map(|()| Outcome::Done),
        Command::CreateDir { path } => fs.create_dir(path).map(|()| Outcome::Done),
        Command::Read { path } => fs
            .read(path)
            .map(|content| Outcome::Content(content.to_vec())),
        Command::Write { path, content } => {
            fs.write(path, content.as_slice()).map(Outcome::Written)
        }
        Command::Delete { path } => fs.delete(path).map(|()| Outcome::Done),
        Command::DeleteRecursive { path } => {
            fs.delete_recursive(path).map(|()| Outcome::Done)
        }
        Command::Find { name } => Ok(Outcome::Found(fs.find(name))),
        Command::Exit => Ok(Outcome::Done),
    };

    result.unwrap_or_else(|e| Outcome::Failed(e.to_string()))
}

/// Runs commands from `input` until `exit` or end of input, printing each
/// result to `output`.
///
/// Lines are read as raw bytes, so `write` content need not be UTF-8. Blank
/// lines are skipped. Lines that do not parse print a failure. The filesystem
/// is cleared before returning.
///
/// # Errors
///
/// Returns an error if reading `input`, writing `output`, or serializing a
/// JSON result fails.
pub fn run_session<R, W>(
    mut input: R,
    mut output: W,
    fs: &mut RamFs,
    format: OutputFormat,
) -> Result<SessionSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("failed to read command")?;
        if read == 0 {
            break;
        }
        let line = buf.strip_suffix(b"\n").unwrap_or(buf.as_slice());
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let (name, outcome) = match Command::parse(line) {
            Ok(None) => continue,
            Ok(Some(Command::Exit)) => break,
            Ok(Some(command)) => (command.name().to_string(), execute(fs, &command)),
            Err(e) => (e.command().to_string(), Outcome::Failed(e.to_string())),
        };

        if let Outcome::Failed(reason) = &outcome {
            tracing::debug!(command = %name, %reason, "command failed");
        }

        summary.commands += 1;
        if !outcome.is_success() {
            summary.failures += 1;
        }

        let rendered = format_outcome(&name, &outcome, format)?;
        writeln!(output, "{rendered}").context("failed to write result")?;
        output.flush().context("failed to flush output")?;
    }

    fs.clear();
    tracing::info!(
        commands = summary.commands,
        failures = summary.failures,
        "session finished"
    );
    Ok(summary)
}
