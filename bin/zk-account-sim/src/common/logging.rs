//! Logging configuration for the zk-account-sim CLI tool.
//!
//! Verbosity comes from `-v` flags unless `RUST_LOG` is set. Logs go to stderr, or to a file with
//! `--log.file`.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use super::Result;

/// Logging configuration arguments.
#[derive(Debug, Clone, Default, Parser)]
pub struct LogArgs {
    /// Increase logging verbosity (-v = error, -vv = warn, -vvv = info, -vvvv = debug, -vvvvv =
    /// trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log file path. If specified, logs are written to this file instead of stderr.
    #[arg(long = "log.file", visible_aliases = ["log-file"], global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colorful console logging. Only applies when logging to stderr (no --log.file).
    #[arg(long = "log.no-color", visible_aliases = ["log-no-color"], global = true)]
    pub log_no_color: bool,
}

impl LogArgs {
    /// The filter selected by `-v` flags, ignoring `RUST_LOG`.
    pub fn verbosity_filter(&self) -> String {
        let level = match self.verbose {
            0 => return "off".to_string(),
            1 => Level::ERROR,
            2 => Level::WARN,
            3 => Level::INFO,
            4 => Level::DEBUG,
            _ => Level::TRACE,
        };
        format!("zk_account_sim={level},zk_account={level}")
    }

    /// Initialize the tracing subscriber based on the logging configuration.
    ///
    /// `RUST_LOG` takes precedence over `-v` flags. Without either, logging is off. The log
    /// target is only shown from DEBUG on. If a subscriber is already installed it is kept.
    pub fn init(&self) -> Result<()> {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.verbosity_filter())
        };
        let show_target = self.verbose >= 4;

        let result = if let Some(ref log_file) = self.log_file {
            // Files never get ANSI colors
            let file = std::fs::File::create(log_file)?;
            fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(file)
                .with_ansi(false)
                .try_init()
        } else {
            fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .with_ansi(!self.log_no_color)
                .try_init()
        };
        if let Err(error) = result {
            debug!(%error, "Keeping the installed log subscriber");
        }
        Ok(())
    }
}
