//! Command-line interface for dpkg-index.
//!
//! The CLI is a thin presentation layer over [`DpkgStatus`]: it resolves the
//! configuration once, builds the query façade, and hands it to the selected command.
//!
//! # Available Commands
//!
//! - `list` - List the names of all installed packages
//! - `show` - Show one package with its dependencies and reverse dependencies
//! - `validate` - Parse the whole status file and report the first malformed stanza
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only print errors
//! - `--config <PATH>` - Config file to load instead of the default
//! - `--status-file <PATH>` - Status file to read, overriding the config
//!
//! # Examples
//!
//! ```bash
//! dpkg-index list
//! dpkg-index show libc6
//! dpkg-index --status-file ./status show --format json dpkg
//! dpkg-index validate
//! ```

mod list;
mod show;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::StatusConfig;
use crate::status::DpkgStatus;

/// Output format shared by the commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colored installed markers
    #[default]
    Text,
    /// JSON for scripts and other tools
    Json,
}

/// Main CLI structure for dpkg-index.
#[derive(Parser)]
#[command(
    name = "dpkg-index",
    about = "Browse installed Debian packages and their dependencies",
    version,
    long_about = "dpkg-index reads the dpkg status database and shows installed packages, \
                  what they depend on, and what depends on them."
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a config file
    ///
    /// Defaults to `DPKG_INDEX_CONFIG` or `~/.config/dpkg-index/config.toml`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the dpkg status file, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    status_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed packages
    List(list::ListCommand),

    /// Show a package with its dependencies
    Show(show::ShowCommand),

    /// Check that the status file parses
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Execute the selected command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command fails.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let mut config = StatusConfig::load_with_optional(self.config.clone()).await?;
        if let Some(path) = &self.status_file {
            config = config.with_status_file(path)?;
        }
        debug!("Using status file {}", config.status_file.display());

        let status = DpkgStatus::new(&config);

        match self.command {
            Commands::List(cmd) => cmd.execute(&status),
            Commands::Show(cmd) => cmd.execute(&status),
            Commands::Validate(cmd) => cmd.execute(&status),
        }
    }

    /// Log filter for the selected verbosity.
    ///
    /// `--verbose` and `--quiet` win over `RUST_LOG`; without either flag `RUST_LOG`
    /// applies, falling back to `warn`.
    fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("dpkg_index=debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}
