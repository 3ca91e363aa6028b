//! Test utilities for dpkg-index
//!
//! Helpers shared by unit and integration tests: one-time tracing setup and a
//! status file fixture living in its own temporary directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use dpkg_index::test_utils::{SAMPLE_STATUS, StatusFixture};
//!
//! let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
//! let status = dpkg_index::status::DpkgStatus::new(&fixture.config());
//! assert!(status.get_package("libc6").is_ok());
//! ```

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::StatusConfig;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// A small but realistic status database.
///
/// Covers a multi-line description, version constraints, an alternative group,
/// an architecture qualifier and a dependency (`perl-base`) that is not installed.
pub const SAMPLE_STATUS: &str = "\
Package: libc6
Status: install ok installed
Priority: optional
Section: libs
Architecture: amd64
Version: 2.36-9
Depends: libgcc-s1
Description: GNU C Library: Shared libraries
 Contains the standard libraries that are used by nearly all programs on
 the system.

Package: libgcc-s1
Status: install ok installed
Architecture: amd64
Version: 12.2.0-14
Depends: gcc-12-base (= 12.2.0-14), libc6 (>= 2.35)
Description: GCC support library

Package: gcc-12-base
Status: install ok installed
Architecture: amd64
Version: 12.2.0-14
Description: GCC, the GNU Compiler Collection (base package)

Package: dpkg
Status: install ok installed
Architecture: amd64
Version: 1.21.22
Depends: tar (>= 1.28-1)
Description: Debian package management system
 This package provides the low-level infrastructure for handling the
 installation and removal of Debian software packages.

Package: tar
Status: install ok installed
Architecture: amd64
Version: 1.34+dfsg-1.2
Description: GNU version of the tar archiving utility

Package: install-info
Status: install ok installed
Architecture: amd64
Version: 6.8-6+b1
Depends: libc6 (>= 2.34), dpkg (>= 1.16.1) | perl-base, python3:any
Description: Manage installed documentation in info format
 The install-info utility creates the index of all installed documentation
 in info format and makes it available to info readers.
";

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with neither
/// set, nothing is logged.
///
/// ```bash
/// RUST_LOG=dpkg_index=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// A status file in a temporary directory, removed on drop.
pub struct StatusFixture {
    dir: TempDir,
    path: PathBuf,
}

impl StatusFixture {
    /// Create the fixture with the given content.
    pub fn new(content: &str) -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp dir")?;
        let path = dir.path().join("status");
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(Self {
            dir,
            path,
        })
    }

    /// Path of the status file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the status file, for sibling files such as configs.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A config pointing at this status file.
    pub fn config(&self) -> StatusConfig {
        StatusConfig {
            status_file: self.path.clone(),
        }
    }

    /// Replace the content and move the modification time one second forward.
    ///
    /// Filesystems with coarse timestamps would otherwise report the same mtime
    /// for two writes in quick succession.
    pub fn rewrite(&self, content: &str) -> Result<()> {
        let previous = File::open(&self.path)?.metadata()?.modified()?;
        std::fs::write(&self.path, content)?;
        self.set_modified(previous + Duration::from_secs(1))
    }

    /// Replace the content but restore the previous modification time.
    pub fn rewrite_keeping_mtime(&self, content: &str) -> Result<()> {
        let previous = File::open(&self.path)?.metadata()?.modified()?;
        std::fs::write(&self.path, content)?;
        self.set_modified(previous)
    }

    fn set_modified(&self, time: std::time::SystemTime) -> Result<()> {
        OpenOptions::new()
            .write(true)
            .open(&self.path)?
            .set_modified(time)
            .with_context(|| format!("Failed to set mtime of {}", self.path.display()))
    }
}
