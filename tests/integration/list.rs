use predicates::prelude::*;

use crate::common::{SAMPLE_STATUS, StatusFixture, dpkg_index_with};

/// Names come out sorted, one per line
#[test]
fn test_list_sorted_names() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .arg("list")
        .assert()
        .success()
        .stdout("dpkg\ngcc-12-base\ninstall-info\nlibc6\nlibgcc-s1\ntar\n");
}

#[test]
fn test_list_long_shows_synopsis() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    dpkg_index_with(&fixture)
        .args(["list", "--long"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GNU C Library: Shared libraries"))
        .stdout(predicate::str::contains("the system.").not());
}

#[test]
fn test_list_json() {
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();

    let output = dpkg_index_with(&fixture).args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names.len(), 6);
    assert_eq!(names.first().map(String::as_str), Some("dpkg"));
    assert_eq!(names.last().map(String::as_str), Some("tar"));
}

#[test]
fn test_list_empty_file() {
    let fixture = StatusFixture::new("").unwrap();

    dpkg_index_with(&fixture)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No installed packages found."));
}

/// A package declared twice is listed once
#[test]
fn test_list_duplicate_stanzas() {
    let fixture = StatusFixture::new(
        "Package: a\nDescription: first\n\nPackage: a\nDescription: second\n",
    )
    .unwrap();

    dpkg_index_with(&fixture).arg("list").assert().success().stdout("a\n");
}
