//! dpkg-index - browse the Debian installed-package database
//!
//! Reads the dpkg status file (`/var/lib/dpkg/status`), parses each package stanza
//! and answers three kinds of questions about the result: which packages are
//! installed, what a package depends on, and which installed packages depend on it.
//!
//! # Architecture Overview
//!
//! ```text
//! status file ──► parser ──► index::Snapshot ──► cache::CacheStore ──► status::DpkgStatus ──► cli
//!                (stanzas,     (packages, names,    (mtime gated,          (installed markers,
//!                 fields)       reverse index)       single flight)         suggestions)
//! ```
//!
//! - Parsing is all-or-nothing: one malformed stanza fails the whole load
//! - A snapshot is immutable once built; queries share it through an `Arc`
//! - The file is re-read only when its modification time changes
//!
//! # Core Modules
//!
//! - [`parser`] - Stanza splitting and field extraction
//! - [`index`] - Immutable package index with the reverse-dependency map
//! - [`cache`] - Modification-time gated snapshot cache
//! - [`status`] - Query API used by presentation layers
//! - [`models`] - Records and serializable view types
//! - [`config`] - Status file location
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `dpkg-index` command line
//!
//! # Example
//!
//! ```rust
//! use dpkg_index::index::Snapshot;
//!
//! let snapshot = Snapshot::build(
//!     "Package: libc6\nDescription: GNU C Library\n\n\
//!      Package: bash\nDescription: GNU Bourne Again SHell\nDepends: libc6 (>= 2.36)\n",
//! )?;
//!
//! assert_eq!(snapshot.package_names(), ["bash", "libc6"]);
//! assert_eq!(snapshot.depended_on_by("libc6"), ["bash"]);
//! # Ok::<(), dpkg_index::core::DpkgError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod index;
pub mod models;
pub mod parser;
pub mod status;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
