//! Configuration management for dpkg-index
//!
//! The only setting the engine needs is the location of the dpkg status file. It is
//! resolved once at startup and handed to [`DpkgStatus::new`](crate::status::DpkgStatus::new);
//! nothing reads the configuration again afterwards.
//!
//! # Resolution Order
//!
//! Later sources win:
//!
//! 1. Built-in default: `/var/lib/dpkg/status`
//! 2. Config file (`--config`, `DPKG_INDEX_CONFIG`, or the platform default path)
//! 3. `DPKG_INDEX_STATUS_FILE` environment variable
//! 4. `--status-file` on the command line
//!
//! `~` and `$VAR` references in the status file path are expanded.
//!
//! # Config File
//!
//! **Location:**
//! - Linux: `~/.config/dpkg-index/config.toml`
//! - macOS: `~/Library/Application Support/dpkg-index/config.toml`
//!
//! ```toml
//! # Inspect a chroot's package database instead of the host's
//! status_file = "/srv/chroot/bookworm/var/lib/dpkg/status"
//! ```
//!
//! A missing config file is not an error; the defaults apply.

mod settings;

pub use settings::{CONFIG_ENV, DEFAULT_STATUS_FILE, STATUS_FILE_ENV, StatusConfig};
