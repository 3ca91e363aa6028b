//! List installed packages.
//!
//! ```bash
//! dpkg-index list
//! dpkg-index list --long
//! dpkg-index list --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::OutputFormat;
use crate::cache::StatusSource;
use crate::index::Snapshot;
use crate::status::DpkgStatus;

/// Command to list installed packages.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show each package's synopsis next to its name
    #[arg(short, long)]
    pub long: bool,
}

impl ListCommand {
    pub fn execute<S: StatusSource>(self, status: &DpkgStatus<S>) -> Result<()> {
        let out = if self.long && self.format == OutputFormat::Text {
            render_long(&*status.snapshot()?)
        } else {
            self.render_names(&status.package_names()?)?
        };
        print!("{out}");
        Ok(())
    }

    fn render_names(&self, names: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(names)?)),
            OutputFormat::Text if names.is_empty() => Ok(NO_PACKAGES.to_string()),
            OutputFormat::Text => Ok(names.iter().map(|name| format!("{name}\n")).collect()),
        }
    }
}

const NO_PACKAGES: &str = "No installed packages found.\n";

/// One line per package: the name padded to a column, then the synopsis.
fn render_long(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return NO_PACKAGES.to_string();
    }

    let width = snapshot.package_names().iter().map(String::len).max().unwrap_or_default();

    let mut out = String::new();
    for name in snapshot.package_names() {
        let synopsis = snapshot.get(name).map(|record| record.synopsis()).unwrap_or_default();
        out.push_str(&format!("{:<width$}  {}\n", name, synopsis.dimmed()));
    }
    out
}
