//! ramfs command shell.
//!
//! Reads commands from standard input, or from a script file, and applies
//! them to an in-memory file store. One result is printed per command.
//!
//! # Examples
//!
//! ```bash
//! # Interactive session
//! ramfs
//!
//! # Run a script with JSON results and debug logs on stderr
//! ramfs --format json --verbose session.txt
//!
//! # Tighter limits
//! ramfs --max-children 64 --config ./limits.toml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use ramfs_cli::{OutputFormat, config, run_session};
use ramfs_core::RamFs;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// In-memory hierarchical file store with a line-oriented shell.
///
/// Commands: create, `create_dir`, read, write, delete, `delete_r`, find, exit.
#[derive(Parser, Debug)]
#[command(name = "ramfs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Script to run instead of reading standard input
    script: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to a TOML file with filesystem limits
    #[arg(short, long, env = "RAMFS_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of children per directory (overrides the config file)
    #[arg(long)]
    max_children: Option<usize>,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let config = config::resolve_config(cli.config.as_deref(), cli.max_children)?;
    let mut fs = RamFs::with_config(config)?;
    tracing::info!(
        max_children = config.max_children,
        max_name_len = config.max_name_len,
        max_depth = config.max_depth,
        "Starting session"
    );

    let stdout = io::stdout().lock();
    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            run_session(BufReader::new(file), stdout, &mut fs, cli.format)?;
        }
        None => {
            run_session(io::stdin().lock(), stdout, &mut fs, cli.format)?;
        }
    }

    Ok(())
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr so that results on stdout stay machine-readable.
/// `--verbose` forces the debug level, otherwise `RUST_LOG` applies with a
/// default of `warn`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}
