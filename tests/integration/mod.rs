//! Integration test suite for dpkg-index
//!
//! End-to-end tests running the `dpkg-index` binary against status files written
//! to temporary directories, plus library-level tests of the cache against a real
//! file on disk.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **cache_behavior**: Snapshot reuse and rebuilds driven by the file's mtime
//! - **config**: Config file, environment and `--status-file` precedence
//! - **error_scenarios**: Malformed stanzas, unreadable files, unknown packages
//! - **list**: The `list` command
//! - **show**: The `show` command
//! - **validate**: The `validate` command

#[path = "../common/mod.rs"]
mod common;

mod cache_behavior;
mod config;
mod error_scenarios;
mod list;
mod show;
