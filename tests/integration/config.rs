use predicates::prelude::*;
use std::path::Path;

use crate::common::{SAMPLE_STATUS, StatusFixture, dpkg_index};

fn write_config(dir: &Path, status_file: &Path) -> std::path::PathBuf {
    let config_path = dir.join("config.toml");
    std::fs::write(&config_path, format!("status_file = '{}'\n", status_file.display())).unwrap();
    config_path
}

#[test]
fn test_config_file_selects_status_file() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let config_path = write_config(fixture.dir(), fixture.path());

    dpkg_index(fixture.dir())
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("libc6"));
}

#[test]
fn test_config_env_selects_config_file() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let config_path = write_config(fixture.dir(), fixture.path());

    dpkg_index(fixture.dir())
        .env("DPKG_INDEX_CONFIG", &config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("install-info"));
}

#[test]
fn test_env_overrides_config_file() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let other = StatusFixture::new("Package: only-in-env\nDescription: x\n").unwrap();
    let config_path = write_config(fixture.dir(), fixture.path());

    dpkg_index(fixture.dir())
        .arg("--config")
        .arg(&config_path)
        .env("DPKG_INDEX_STATUS_FILE", other.path())
        .arg("list")
        .assert()
        .success()
        .stdout("only-in-env\n");
}

#[test]
fn test_status_file_flag_overrides_everything() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let from_env = StatusFixture::new("Package: from-env\nDescription: x\n").unwrap();
    let from_flag = StatusFixture::new("Package: from-flag\nDescription: x\n").unwrap();
    let config_path = write_config(fixture.dir(), fixture.path());

    dpkg_index(fixture.dir())
        .arg("--config")
        .arg(&config_path)
        .env("DPKG_INDEX_STATUS_FILE", from_env.path())
        .arg("--status-file")
        .arg(from_flag.path())
        .arg("list")
        .assert()
        .success()
        .stdout("from-flag\n");
}

#[test]
fn test_invalid_config_file() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let config_path = fixture.dir().join("config.toml");
    std::fs::write(&config_path, "status_file = [").unwrap();

    dpkg_index(fixture.dir())
        .arg("--config")
        .arg(&config_path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

/// Without any configuration the dpkg default location is used
#[test]
fn test_default_status_file_in_error() {
    let dir = tempfile::TempDir::new().unwrap();

    let output = dpkg_index(dir.path()).args(["--verbose", "list"]).output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/var/lib/dpkg/status"), "{stderr}");
}
