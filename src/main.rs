//! dpkg-index CLI entry point
//!
//! Parses the command line, runs the selected command and turns failures into
//! a colored message with suggestions before exiting with status 1.
//!
//! - `list` - List installed packages
//! - `show` - Show a package with its dependencies and reverse dependencies
//! - `validate` - Check that the status file parses

use anyhow::Result;
use clap::Parser;
use dpkg_index::cli;
use dpkg_index::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
