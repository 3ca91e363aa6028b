//! Show one installed package.
//!
//! The text format prints the description as stored, followed by the dependency
//! list and the reverse dependencies. Every listed name carries a marker telling
//! whether it is installed:
//!
//! ```text
//! install-info
//!
//!   Manage installed documentation in info format
//!    The install-info utility ...
//!
//! Depends:
//!   ✓ libc6
//!   ✗ dpkg (alternatives: ✓ install-info)
//!
//! Depended on by:
//!   ✓ texinfo
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::OutputFormat;
use crate::cache::StatusSource;
use crate::models::{InstalledStatus, PackageDetail};
use crate::status::DpkgStatus;

/// Command to show a package with its dependencies.
#[derive(Args)]
pub struct ShowCommand {
    /// Package name, as in the `Package:` field
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub fn execute<S: StatusSource>(self, status: &DpkgStatus<S>) -> Result<()> {
        let detail = status.get_package(&self.name)?;
        print!("{}", render(&detail, &self.format)?);
        Ok(())
    }
}

fn render(detail: &PackageDetail, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(detail)?)),
        OutputFormat::Text => Ok(render_text(detail)),
    }
}

fn render_text(detail: &PackageDetail) -> String {
    let mut out = format!("{}\n\n", detail.name.bold());

    for line in detail.description.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    out.push_str(&format!("\n{}\n", "Depends:".cyan().bold()));
    if detail.dependencies.is_empty() {
        out.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for dep in &detail.dependencies {
        out.push_str(&format!("  {}", marked(&dep.name, dep.is_installed)));
        if !dep.alternatives.is_empty() {
            let alternatives: Vec<String> =
                dep.alternatives.iter().map(|alt| marked(&alt.name, alt.is_installed)).collect();
            out.push_str(&format!(" (alternatives: {})", alternatives.join(", ")));
        }
        out.push('\n');
    }

    out.push_str(&format!("\n{}\n", "Depended on by:".cyan().bold()));
    if detail.depended_on_by.is_empty() {
        out.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for InstalledStatus {
        name,
        is_installed,
    } in &detail.depended_on_by
    {
        out.push_str(&format!("  {}\n", marked(name, *is_installed)));
    }

    out
}

fn marked(name: &str, is_installed: bool) -> String {
    if is_installed {
        format!("{} {}", "✓".green(), name)
    } else {
        format!("{} {}", "✗".red(), name.dimmed())
    }
}
