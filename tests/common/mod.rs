//! Shared helpers for the integration tests.

use assert_cmd::Command;
use std::path::Path;

pub use dpkg_index::test_utils::{SAMPLE_STATUS, StatusFixture};

/// A `dpkg-index` command isolated from the user's environment.
///
/// The config file location is pointed at a path inside `dir` that doesn't exist,
/// and the status file override is cleared, so only explicit arguments apply.
pub fn dpkg_index(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dpkg-index").unwrap();
    cmd.env("DPKG_INDEX_CONFIG", dir.join("no-config.toml"))
        .env_remove("DPKG_INDEX_STATUS_FILE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// A `dpkg-index` command reading the fixture's status file.
pub fn dpkg_index_with(fixture: &StatusFixture) -> Command {
    let mut cmd = dpkg_index(fixture.dir());
    cmd.arg("--status-file").arg(fixture.path());
    cmd
}
