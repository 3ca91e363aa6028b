//! Package index built from one version of the status file.
//!
//! A [`Snapshot`] holds every parsed [`PackageRecord`] keyed by name, the sorted list
//! of names, and the reverse-dependency index ("who depends on me"). It is built in
//! one pass by [`Snapshot::build`] and never modified afterwards; the cache swaps in a
//! whole new snapshot when the file changes.
//!
//! # Index invariants
//!
//! - `package_names` is exactly the key set of `packages`, sorted ascending
//! - when a name appears in several stanzas the later stanza wins
//! - for every package P and every name D in P's dependencies (principal or
//!   alternative), `depended_index[D]` contains P, and nothing else is in there
//!
//! The reverse index is computed by inverting `packages` after all stanzas are read,
//! so a stanza that was overwritten by a later duplicate leaves no edges behind.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::core::Result;
use crate::models::PackageRecord;
use crate::parser::{parse_stanza, split_stanzas};

/// Immutable view of all installed packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    packages: HashMap<String, PackageRecord>,
    package_names: Vec<String>,
    depended_index: HashMap<String, Vec<String>>,
}

impl Snapshot {
    /// Parse the full content of a status file.
    ///
    /// # Errors
    ///
    /// Fails with [`DpkgError::InvalidStanza`](crate::core::DpkgError::InvalidStanza)
    /// on the first stanza that cannot be parsed; the index is the 0-based position of
    /// that stanza. Malformed stanzas are never skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dpkg_index::index::Snapshot;
    ///
    /// let snapshot = Snapshot::build(
    ///     "Package: a\nDescription: A\nDepends: b\n\nPackage: b\nDescription: B\n",
    /// ).unwrap();
    ///
    /// assert_eq!(snapshot.package_names(), ["a", "b"]);
    /// assert_eq!(snapshot.depended_on_by("b"), ["a"]);
    /// ```
    pub fn build(content: &str) -> Result<Self> {
        let mut packages = HashMap::new();

        for (index, stanza) in split_stanzas(content).enumerate() {
            let record = parse_stanza(stanza).map_err(|e| e.in_stanza(index))?;
            if let Some(previous) = packages.insert(record.name.clone(), record) {
                debug!("Package '{}' declared more than once, keeping the later stanza", previous.name);
            }
        }

        Ok(Self::from_packages(packages))
    }

    /// Derive the name list and reverse index from a set of records.
    #[must_use]
    pub fn from_packages(packages: HashMap<String, PackageRecord>) -> Self {
        let mut package_names: Vec<String> = packages.keys().cloned().collect();
        package_names.sort();

        let mut depended_index: HashMap<String, Vec<String>> = HashMap::new();
        for name in &package_names {
            let record = &packages[name];
            let mentioned: BTreeSet<&str> =
                record.dependencies.iter().flat_map(|dep| dep.names()).collect();

            for dependency in mentioned {
                depended_index.entry(dependency.to_string()).or_default().push(name.clone());
            }
        }

        Self {
            packages,
            package_names,
            depended_index,
        }
    }

    /// All records keyed by package name.
    #[must_use]
    pub fn packages(&self) -> &HashMap<String, PackageRecord> {
        &self.packages
    }

    /// Installed package names, sorted ascending.
    #[must_use]
    pub fn package_names(&self) -> &[String] {
        &self.package_names
    }

    /// Reverse-dependency index: package name to the names of its dependents.
    #[must_use]
    pub fn depended_index(&self) -> &HashMap<String, Vec<String>> {
        &self.depended_index
    }

    /// Look up one record.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.get(name)
    }

    /// Whether a package with this name is installed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Names of the packages that depend on `name`, sorted ascending.
    ///
    /// `name` does not have to be installed: the index also records dependencies on
    /// packages that are missing from the status file.
    #[must_use]
    pub fn depended_on_by(&self, name: &str) -> &[String] {
        self.depended_index.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of installed packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the status file contained no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
