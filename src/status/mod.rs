//! Query API over the installed-package database.
//!
//! [`DpkgStatus`] is what presentation layers talk to. Every query first syncs the
//! [`CacheStore`] (a stat call, plus a full parse when the file changed) and then
//! decorates the snapshot for the caller: dependency names are paired with whether
//! that package is installed, and the reverse index is exposed as `dependedOnBy`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dpkg_index::config::StatusConfig;
//! use dpkg_index::status::DpkgStatus;
//!
//! # fn example() -> dpkg_index::core::Result<()> {
//! let status = DpkgStatus::new(&StatusConfig::default());
//!
//! for name in status.package_names()? {
//!     println!("{name}");
//! }
//!
//! let detail = status.get_package("libc6")?;
//! for dep in &detail.dependencies {
//!     println!("{} installed={}", dep.name, dep.is_installed);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use strsim::levenshtein;

use crate::cache::{CacheStore, FileSource, StatusSource};
use crate::config::StatusConfig;
use crate::core::{DpkgError, Result};
use crate::index::Snapshot;
use crate::models::{AnnotatedDependency, Dependency, InstalledStatus, PackageDetail, PackageRecord};

/// Maximum Levenshtein distance, as a percentage of the requested name's length,
/// for a name to be offered as a suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of suggestions attached to [`DpkgError::PackageNotFound`].
const MAX_SUGGESTIONS: usize = 3;

/// Installed packages of one status file.
#[derive(Debug)]
pub struct DpkgStatus<S = FileSource> {
    cache: CacheStore<S>,
}

impl DpkgStatus<FileSource> {
    /// Query the status file named by `config`.
    ///
    /// The path is read once here; later changes to the configuration value have no
    /// effect on this instance.
    #[must_use]
    pub fn new(config: &StatusConfig) -> Self {
        Self::with_source(FileSource::new(config.status_file.clone()))
    }
}

impl<S: StatusSource> DpkgStatus<S> {
    /// Query an arbitrary [`StatusSource`].
    pub fn with_source(source: S) -> Self {
        Self {
            cache: CacheStore::new(source),
        }
    }

    /// The underlying cache, for statistics and explicit invalidation.
    pub fn cache(&self) -> &CacheStore<S> {
        &self.cache
    }

    /// The current snapshot, rebuilt first if the status file changed.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheStore::get`] failures.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.cache.get()
    }

    /// Names of all installed packages, sorted ascending.
    ///
    /// # Errors
    ///
    /// Fails when the status file cannot be read or parsed.
    pub fn package_names(&self) -> Result<Vec<String>> {
        Ok(self.snapshot()?.package_names().to_vec())
    }

    /// Details of one installed package.
    ///
    /// # Errors
    ///
    /// - [`DpkgError::MissingParameter`] when `name` is empty
    /// - [`DpkgError::PackageNotFound`] when no such package is installed; the error
    ///   carries up to three similarly named packages
    /// - any failure of [`CacheStore::get`]
    pub fn get_package(&self, name: &str) -> Result<PackageDetail> {
        if name.is_empty() {
            return Err(DpkgError::MissingParameter {
                parameter: "name",
            });
        }

        let snapshot = self.snapshot()?;
        let Some(record) = snapshot.get(name) else {
            return Err(DpkgError::PackageNotFound {
                name: name.to_string(),
                suggestions: find_similar_names(name, snapshot.package_names()),
            });
        };

        let packages = snapshot.packages();
        Ok(PackageDetail {
            name: record.name.clone(),
            description: record.description.clone(),
            dependencies: annotate_dependencies(&record.dependencies, packages),
            depended_on_by: mark_installed_dependencies(
                Some(snapshot.depended_on_by(name)),
                Some(packages),
            )?,
        })
    }
}

/// Pair each name with whether `packages` contains it.
///
/// `names` of `None` yields an empty list.
///
/// # Errors
///
/// [`DpkgError::MissingParameter`] when `packages` is `None`.
///
/// # Examples
///
/// ```rust
/// use dpkg_index::status::mark_installed_dependencies;
/// use std::collections::HashMap;
///
/// let packages = HashMap::new();
/// let names = vec!["libc6".to_string()];
///
/// let marked = mark_installed_dependencies(Some(names.as_slice()), Some(&packages)).unwrap();
/// assert_eq!(marked[0].name, "libc6");
/// assert!(!marked[0].is_installed);
///
/// assert!(mark_installed_dependencies(Some(names.as_slice()), None).is_err());
/// ```
pub fn mark_installed_dependencies(
    names: Option<&[String]>,
    packages: Option<&HashMap<String, PackageRecord>>,
) -> Result<Vec<InstalledStatus>> {
    let packages = packages.ok_or(DpkgError::MissingParameter {
        parameter: "packages",
    })?;

    Ok(names.unwrap_or_default().iter().map(|name| installed_status(name, packages)).collect())
}

/// Annotate grouped dependencies: the principal and every alternative get an
/// installed marker.
#[must_use]
pub fn annotate_dependencies(
    dependencies: &[Dependency],
    packages: &HashMap<String, PackageRecord>,
) -> Vec<AnnotatedDependency> {
    dependencies
        .iter()
        .map(|dep| AnnotatedDependency {
            name: dep.main.clone(),
            is_installed: packages.contains_key(&dep.main),
            alternatives: dep
                .alternatives
                .iter()
                .map(|alt| installed_status(alt, packages))
                .collect(),
        })
        .collect()
}

fn installed_status(name: &str, packages: &HashMap<String, PackageRecord>) -> InstalledStatus {
    InstalledStatus {
        name: name.to_string(),
        is_installed: packages.contains_key(name),
    }
}

/// Find installed names close to `target` by Levenshtein distance.
fn find_similar_names(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;

    let mut scored: Vec<_> = available
        .iter()
        .map(|name| (name, levenshtein(target, name)))
        .filter(|(_, distance)| *distance <= max_distance)
        .collect();

    // Stable sort keeps alphabetical order among equal distances
    scored.sort_by_key(|(_, distance)| *distance);

    scored.into_iter().take(MAX_SUGGESTIONS).map(|(name, _)| name.clone()).collect()
}
