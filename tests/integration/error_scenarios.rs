use predicates::prelude::*;

use crate::common::{SAMPLE_STATUS, StatusFixture, dpkg_index, dpkg_index_with};

#[test]
fn test_unknown_package_suggests_similar_names() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .args(["show", "libc7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package found with name 'libc7'"))
        .stderr(predicate::str::contains("Did you mean: libc6?"));
}

#[test]
fn test_unknown_package_without_suggestions() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .args(["show", "firefox-esr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dpkg-index list"));
}

#[test]
fn test_empty_package_name() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .args(["show", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parameter name must be given"));
}

#[test]
fn test_missing_status_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("status");

    dpkg_index(dir.path())
        .arg("--status-file")
        .arg(&missing)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read status file"))
        .stderr(predicate::str::contains("--status-file"));
}

/// One bad stanza fails the whole load, even for queries about other packages
#[test]
fn test_malformed_stanza_fails_every_query() {
    let fixture = StatusFixture::new(
        "Package: good\nDescription: fine\n\nPackage: bad\nVersion: 1.0\n",
    )
    .unwrap();

    dpkg_index_with(&fixture)
        .args(["show", "good"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse entry 1: Key \"Description\" not found"));

    dpkg_index_with(&fixture).arg("list").assert().failure();
}

#[test]
fn test_unknown_subcommand() {
    let dir = tempfile::TempDir::new().unwrap();

    dpkg_index(dir.path()).arg("install").assert().failure();
}
