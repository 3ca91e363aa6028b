//! Modification-time gated snapshot cache.
//!
//! Parsing a multi-megabyte status file on every query is wasteful, so the
//! [`CacheStore`] keeps the last [`Snapshot`] together with the modification time of
//! the file it was built from. Each [`CacheStore::get`] stats the file; only when the
//! modification time differs from the stored one is the file read and parsed again.
//!
//! # Cache States
//!
//! | State  | Meaning                                           |
//! |--------|---------------------------------------------------|
//! | Empty  | Nothing loaded yet, the next `get` builds          |
//! | Loaded | Holds a snapshot and the mtime it was built from  |
//!
//! # Concurrency
//!
//! The state lives behind a mutex that is held across the whole
//! check-then-rebuild sequence, so concurrent callers never build the same file
//! version twice. Snapshots are handed out as [`Arc`]s and never mutated after they
//! are published; a rebuild replaces the `Arc`, it does not touch the old value.
//!
//! # Limitations
//!
//! Staleness is purely an mtime comparison. A rewrite that leaves the modification
//! time unchanged (same-second writes on coarse-grained filesystems) is not detected.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use tracing::{debug, info, warn};

use crate::core::{DpkgError, Result};
use crate::index::Snapshot;

/// Where the cache reads the status file from.
///
/// [`FileSource`] is the production implementation; tests substitute an in-memory
/// source with a controllable modification time.
pub trait StatusSource {
    /// Path reported in diagnostics.
    fn path(&self) -> &Path;

    /// Current modification time of the status file.
    fn modified(&self) -> std::io::Result<SystemTime>;

    /// Full content of the status file. Invalid UTF-8 is replaced, not rejected.
    fn read_to_string(&self) -> std::io::Result<String>;
}

/// A status file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read the status file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

impl StatusSource for FileSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn modified(&self) -> std::io::Result<SystemTime> {
        std::fs::metadata(&self.path)?.modified()
    }

    fn read_to_string(&self) -> std::io::Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Counters describing how the cache has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered from the stored snapshot
    pub hits: usize,
    /// Successful rebuilds
    pub rebuilds: usize,
}

#[derive(Debug, Default)]
enum CacheState {
    #[default]
    Empty,
    Loaded {
        modified: SystemTime,
        snapshot: Arc<Snapshot>,
    },
}

#[derive(Debug, Default)]
struct Inner {
    state: CacheState,
    stats: CacheStats,
}

/// Snapshot cache keyed by the status file's modification time.
///
/// # Examples
///
/// ```rust,no_run
/// use dpkg_index::cache::{CacheStore, FileSource};
/// use std::sync::Arc;
///
/// # fn example() -> dpkg_index::core::Result<()> {
/// let cache = CacheStore::new(FileSource::new("/var/lib/dpkg/status"));
///
/// let first = cache.get()?;
/// let second = cache.get()?;
/// // Unchanged file: same snapshot, no second parse
/// assert!(Arc::ptr_eq(&first, &second));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CacheStore<S> {
    source: S,
    inner: Mutex<Inner>,
}

impl<S: StatusSource> CacheStore<S> {
    /// Create an empty cache over `source`. Nothing is read until the first `get`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The source this cache reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the snapshot for the current version of the status file.
    ///
    /// Rebuilds when nothing is loaded yet or the file's modification time differs
    /// from the one the stored snapshot was built from. Otherwise returns the stored
    /// snapshot itself.
    ///
    /// # Errors
    ///
    /// - [`DpkgError::FileUnreadable`] when the file cannot be stat'ed or read
    /// - [`DpkgError::InvalidStanza`] when the new content does not parse
    ///
    /// A failed rebuild leaves the previous snapshot and its mtime in place, so
    /// [`last_good`](Self::last_good) still answers and the next `get` retries.
    pub fn get(&self) -> Result<Arc<Snapshot>> {
        let mut inner = self.lock();

        let modified = self
            .source
            .modified()
            .map_err(|e| DpkgError::file_unreadable(self.source.path(), e))?;

        let cached = match &inner.state {
            CacheState::Loaded {
                modified: stored,
                snapshot,
            } if *stored == modified => Some(Arc::clone(snapshot)),
            _ => None,
        };

        if let Some(snapshot) = cached {
            debug!("Status file {} unchanged, serving cached snapshot", self.source.path().display());
            inner.stats.hits += 1;
            return Ok(snapshot);
        }

        let snapshot = match self.rebuild() {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                if matches!(inner.state, CacheState::Loaded { .. }) {
                    warn!(
                        "Rebuild of {} failed, keeping previous snapshot: {}",
                        self.source.path().display(),
                        e
                    );
                }
                return Err(e);
            }
        };

        info!("Indexed {} packages from {}", snapshot.len(), self.source.path().display());
        inner.state = CacheState::Loaded {
            modified,
            snapshot: Arc::clone(&snapshot),
        };
        inner.stats.rebuilds += 1;

        Ok(snapshot)
    }

    /// The most recently built snapshot, without checking the file.
    pub fn last_good(&self) -> Option<Arc<Snapshot>> {
        match &self.lock().state {
            CacheState::Empty => None,
            CacheState::Loaded {
                snapshot, ..
            } => Some(Arc::clone(snapshot)),
        }
    }

    /// Drop the stored snapshot; the next `get` rebuilds unconditionally.
    pub fn invalidate(&self) {
        self.lock().state = CacheState::Empty;
    }

    /// Hit and rebuild counters since this cache was created.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    fn rebuild(&self) -> Result<Snapshot> {
        debug!("Parsing status file {}", self.source.path().display());
        let content = self
            .source
            .read_to_string()
            .map_err(|e| DpkgError::file_unreadable(self.source.path(), e))?;
        Snapshot::build(&content)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The state only ever holds fully built snapshots, so a poisoned lock is still consistent
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
