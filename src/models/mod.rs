//! Shared data models for dpkg-index
//!
//! Records produced by the parser and the view values handed to presentation
//! layers. Everything that leaves the crate serializes with camelCase field names
//! (`isInstalled`, `dependedOnBy`) so JSON consumers see the same shape regardless
//! of which front end produced it.

use serde::{Deserialize, Serialize};

/// One entry of a package's `Depends:` line.
///
/// `main` is the principal name, the first of the pipe-separated alternatives.
/// The remaining names are kept in `alternatives`, in the order they appeared.
///
/// `dpkg (>= 1.15.4) | install-info` becomes:
///
/// ```rust
/// use dpkg_index::models::Dependency;
///
/// let dep = Dependency::new("dpkg", vec!["install-info".to_string()]);
/// assert_eq!(dep.names().collect::<Vec<_>>(), ["dpkg", "install-info"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Principal package name
    pub main: String,
    /// Other packages that satisfy this dependency
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl Dependency {
    /// Create a dependency from its principal name and alternatives
    pub fn new(main: impl Into<String>, alternatives: Vec<String>) -> Self {
        Self {
            main: main.into(),
            alternatives,
        }
    }

    /// All names in this entry, principal first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main.as_str()).chain(self.alternatives.iter().map(String::as_str))
    }
}

/// A package as parsed from one stanza of the status file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Value of the `Package:` field, unique within a snapshot
    pub name: String,
    /// Value of the `Description:` field with its continuation lines
    ///
    /// Continuation lines are joined with `\n` and kept verbatim, including their
    /// leading whitespace, so the original layout can be rendered again.
    pub description: String,
    /// Entries of the `Depends:` line, deduplicated by principal name
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl PackageRecord {
    /// The first line of the description (the synopsis).
    #[must_use]
    pub fn synopsis(&self) -> &str {
        self.description.lines().next().unwrap_or_default()
    }
}

/// A package name together with whether it is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledStatus {
    /// Package name
    pub name: String,
    /// Whether the current snapshot contains a package with this name
    pub is_installed: bool,
}

/// A [`Dependency`] annotated with installed status for each of its names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedDependency {
    /// Principal package name
    pub name: String,
    /// Whether the principal package is installed
    pub is_installed: bool,
    /// Alternatives with their own installed status
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<InstalledStatus>,
}

impl AnnotatedDependency {
    /// True when the principal or any alternative is installed.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.is_installed || self.alternatives.iter().any(|alt| alt.is_installed)
    }
}

/// Everything the query API reports about one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    /// Package name
    pub name: String,
    /// Full description, continuation lines included
    pub description: String,
    /// Declared dependencies with installed markers
    pub dependencies: Vec<AnnotatedDependency>,
    /// Installed packages whose `Depends:` line mentions this package
    pub depended_on_by: Vec<InstalledStatus>,
}
