//! Cache behavior against a real file on disk.

use std::sync::Arc;

use dpkg_index::core::DpkgError;
use dpkg_index::status::DpkgStatus;
use dpkg_index::test_utils::init_test_logging;

use crate::common::{SAMPLE_STATUS, StatusFixture};

#[test]
fn test_unchanged_file_reuses_snapshot() {
    init_test_logging(None);
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let status = DpkgStatus::new(&fixture.config());

    let first = status.snapshot().unwrap();
    let second = status.snapshot().unwrap();
    status.package_names().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(status.cache().stats().rebuilds, 1);
    assert_eq!(status.cache().stats().hits, 2);
}

#[test]
fn test_modified_file_is_reloaded() {
    init_test_logging(None);
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let status = DpkgStatus::new(&fixture.config());
    assert!(status.get_package("tar").is_ok());

    fixture.rewrite("Package: zsh\nDescription: shell\nDepends: tar\n").unwrap();

    assert_eq!(status.package_names().unwrap(), ["zsh"]);
    assert!(matches!(status.get_package("tar"), Err(DpkgError::PackageNotFound { .. })));
    assert!(!status.get_package("zsh").unwrap().dependencies[0].is_installed);
    assert_eq!(status.cache().stats().rebuilds, 2);
}

/// A rewrite that keeps the mtime goes unnoticed
#[test]
fn test_same_mtime_rewrite_is_not_detected() {
    init_test_logging(None);
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let status = DpkgStatus::new(&fixture.config());
    let before = status.snapshot().unwrap();

    fixture.rewrite_keeping_mtime("Package: zsh\nDescription: shell\n").unwrap();

    let after = status.snapshot().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert!(status.get_package("libc6").is_ok());

    status.cache().invalidate();
    assert_eq!(status.package_names().unwrap(), ["zsh"]);
}

#[test]
fn test_failed_rebuild_keeps_previous_snapshot() {
    init_test_logging(None);
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let status = DpkgStatus::new(&fixture.config());
    let good = status.snapshot().unwrap();

    fixture.rewrite("Description: no package line\n").unwrap();
    assert!(matches!(status.snapshot(), Err(DpkgError::InvalidStanza { index: 0, .. })));

    let last_good = status.cache().last_good().unwrap();
    assert!(Arc::ptr_eq(&good, &last_good));

    fixture.rewrite("Package: fixed\nDescription: ok\n").unwrap();
    assert_eq!(status.package_names().unwrap(), ["fixed"]);
}

#[test]
fn test_concurrent_queries_share_one_build() {
    init_test_logging(None);
    let fixture = StatusFixture::new(SAMPLE_STATUS).unwrap();
    let status = Arc::new(DpkgStatus::new(&fixture.config()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let status = Arc::clone(&status);
            std::thread::spawn(move || status.get_package("libc6").unwrap().depended_on_by.len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(status.cache().stats().rebuilds, 1);
}

/// Bytes that are not UTF-8 in unparsed fields do not block queries
#[test]
fn test_non_utf8_maintainer_is_tolerated() {
    init_test_logging(None);
    let fixture = StatusFixture::new("").unwrap();
    std::fs::write(
        fixture.path(),
        b"Package: a\nMaintainer: Jos\xe9 Garc\xeda\nDescription: A\nDepends: b\n\nPackage: b\nDescription: B\n",
    )
    .unwrap();
    let status = DpkgStatus::new(&fixture.config());

    assert_eq!(status.package_names().unwrap(), ["a", "b"]);
    assert_eq!(status.get_package("b").unwrap().depended_on_by[0].name, "a");
}
