use predicates::prelude::*;

use crate::common::{SAMPLE_STATUS, StatusFixture, dpkg_index_with};

fn show_json(fixture: &StatusFixture, name: &str) -> serde_json::Value {
    let output = dpkg_index_with(fixture).args(["show", "--format", "json", name]).output().unwrap();
    assert!(output.status.success(), "show {name} failed: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_show_text() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .args(["show", "dpkg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Debian package management system"))
        .stdout(predicate::str::contains("installation and removal of Debian software packages."))
        .stdout(predicate::str::contains("Depends:"))
        .stdout(predicate::str::contains("✓ tar"))
        .stdout(predicate::str::contains("Depended on by:"))
        .stdout(predicate::str::contains("✓ install-info"));
}

#[test]
fn test_show_json_dependencies() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let detail = show_json(&fixture, "install-info");

    assert_eq!(detail["name"], "install-info");
    assert_eq!(
        detail["description"],
        "Manage installed documentation in info format\n \
         The install-info utility creates the index of all installed documentation\n \
         in info format and makes it available to info readers."
    );

    let deps = detail["dependencies"].as_array().unwrap();
    assert_eq!(deps.len(), 3);
    assert_eq!(deps[0]["name"], "libc6");
    assert_eq!(deps[0]["isInstalled"], true);
    assert_eq!(deps[1]["name"], "dpkg");
    assert_eq!(deps[1]["alternatives"][0]["name"], "perl-base");
    assert_eq!(deps[1]["alternatives"][0]["isInstalled"], false);
    assert_eq!(deps[2]["name"], "python3:any");
    assert_eq!(deps[2]["isInstalled"], false);

    assert!(detail["dependedOnBy"].as_array().unwrap().is_empty());
}

#[test]
fn test_show_json_reverse_dependencies() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let detail = show_json(&fixture, "libc6");

    let names: Vec<&str> = detail["dependedOnBy"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["install-info", "libgcc-s1"]);
    assert!(detail["dependedOnBy"].as_array().unwrap().iter().all(|e| e["isInstalled"] == true));
}

/// Mutual dependencies show up on both sides
#[test]
fn test_show_cycle() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    let libc = show_json(&fixture, "libc6");
    assert_eq!(libc["dependencies"][0]["name"], "libgcc-s1");

    let libgcc = show_json(&fixture, "libgcc-s1");
    assert_eq!(libgcc["dependedOnBy"][0]["name"], "libc6");
}

#[test]
fn test_show_without_dependencies() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .args(["show", "gcc-12-base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)"))
        .stdout(predicate::str::contains("✓ libgcc-s1"));
}
