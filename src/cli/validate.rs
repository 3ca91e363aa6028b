//! Check that the status file parses.
//!
//! Every stanza must have a `Package:` and a `Description:` field and a well-formed
//! `Depends:` line. The first stanza that fails is reported with its 0-based index
//! and the command exits non-zero. On success the number of packages is printed,
//! along with dependency names that no installed package provides.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::OutputFormat;
use crate::cache::StatusSource;
use crate::index::Snapshot;
use crate::status::DpkgStatus;

/// Command to validate the status file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Outcome of a validation run, as printed with `--format json`.
///
/// ```json
/// {
///   "valid": true,
///   "path": "/var/lib/dpkg/status",
///   "packages": 412,
///   "unresolved": ["awk", "perlapi-5.36.0"],
///   "errors": []
/// }
/// ```
#[derive(Debug, Default, Serialize)]
struct ValidationResults {
    valid: bool,
    path: String,
    packages: usize,
    unresolved: Vec<String>,
    errors: Vec<String>,
}

impl ValidationResults {
    fn from_snapshot(path: String, snapshot: &Snapshot) -> Self {
        let mut unresolved: Vec<String> = snapshot
            .depended_index()
            .keys()
            .filter(|name| !snapshot.contains(name))
            .cloned()
            .collect();
        unresolved.sort();

        Self {
            valid: true,
            path,
            packages: snapshot.len(),
            unresolved,
            errors: Vec::new(),
        }
    }
}

impl ValidateCommand {
    pub fn execute<S: StatusSource>(self, status: &DpkgStatus<S>) -> Result<()> {
        let path = status.cache().source().path().display().to_string();

        let snapshot = match status.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if self.format == OutputFormat::Json {
                    let results = ValidationResults {
                        valid: false,
                        path,
                        errors: vec![e.to_string()],
                        ..Default::default()
                    };
                    println!("{}", serde_json::to_string_pretty(&results)?);
                } else {
                    println!("{} {}", "✗".red(), path);
                }
                return Err(e.into());
            }
        };

        let results = ValidationResults::from_snapshot(path, &snapshot);
        print!("{}", render(&results, &self.format)?);
        Ok(())
    }
}

fn render(results: &ValidationResults, format: &OutputFormat) -> Result<String> {
    if *format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(results)?));
    }

    let mut out = format!("{} {} ({} packages)\n", "✓".green(), results.path, results.packages);
    if !results.unresolved.is_empty() {
        out.push_str(&format!(
            "{} {} dependency names are not provided by an installed package:\n",
            "⚠".yellow(),
            results.unresolved.len()
        ));
        for name in &results.unresolved {
            out.push_str(&format!("  {name}\n"));
        }
    }
    Ok(out)
}
