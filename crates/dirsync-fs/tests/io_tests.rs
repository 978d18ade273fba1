use assert_fs::prelude::*;
use dirsync_fs::io::{self, Placement, Removal};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_create_dir_creates_parents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("a/b/c");

    let placement = io::create_dir(target.path()).unwrap();

    assert_eq!(placement, Placement::Done);
    target.assert(predicate::path::is_dir());
}

#[test]
fn test_create_dir_existing_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a").create_dir_all().unwrap();

    let placement = io::create_dir(temp.child("a").path()).unwrap();

    assert_eq!(placement, Placement::DestinationExists);
}

#[test]
fn test_create_dir_over_file_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a").write_str("file").unwrap();

    let placement = io::create_dir(temp.child("a").path()).unwrap();

    assert_eq!(placement, Placement::DestinationExists);
    temp.child("a").assert("file");
}

#[test]
fn test_copy_file_copies_bytes() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src.txt").write_str("hello world").unwrap();

    let placement =
        io::copy_file(temp.child("src.txt").path(), temp.child("dst.txt").path()).unwrap();

    assert_eq!(placement, Placement::Done);
    temp.child("dst.txt").assert("hello world");
    temp.child("src.txt").assert("hello world");
}

#[test]
fn test_copy_file_never_overwrites() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src.txt").write_str("new").unwrap();
    temp.child("dst.txt").write_str("original").unwrap();

    let placement =
        io::copy_file(temp.child("src.txt").path(), temp.child("dst.txt").path()).unwrap();

    assert_eq!(placement, Placement::DestinationExists);
    temp.child("dst.txt").assert("original");
}

#[test]
fn test_copy_file_missing_source() {
    let temp = assert_fs::TempDir::new().unwrap();

    let placement =
        io::copy_file(temp.child("gone.txt").path(), temp.child("dst.txt").path()).unwrap();

    assert_eq!(placement, Placement::SourceMissing);
    temp.child("dst.txt").assert(predicate::path::missing());
}

#[test]
fn test_move_file_relocates() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a/x.txt").write_str("payload").unwrap();
    temp.child("b").create_dir_all().unwrap();

    let placement =
        io::move_file(temp.child("a/x.txt").path(), temp.child("b/x.txt").path()).unwrap();

    assert_eq!(placement, Placement::Done);
    temp.child("a/x.txt").assert(predicate::path::missing());
    temp.child("b/x.txt").assert("payload");
}

#[test]
fn test_move_file_never_overwrites() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("x.txt").write_str("mover").unwrap();
    temp.child("y.txt").write_str("resident").unwrap();

    let placement =
        io::move_file(temp.child("x.txt").path(), temp.child("y.txt").path()).unwrap();

    assert_eq!(placement, Placement::DestinationExists);
    temp.child("x.txt").assert("mover");
    temp.child("y.txt").assert("resident");
}

#[test]
fn test_move_file_missing_source() {
    let temp = assert_fs::TempDir::new().unwrap();

    let placement =
        io::move_file(temp.child("x.txt").path(), temp.child("y.txt").path()).unwrap();

    assert_eq!(placement, Placement::SourceMissing);
}

#[test]
fn test_remove_empty_dir_outcomes() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("empty").create_dir_all().unwrap();
    temp.child("full/inner.txt").write_str("x").unwrap();

    assert_eq!(
        io::remove_empty_dir(temp.child("empty").path()).unwrap(),
        Removal::Removed
    );
    assert_eq!(
        io::remove_empty_dir(temp.child("empty").path()).unwrap(),
        Removal::Missing
    );
    assert_eq!(
        io::remove_empty_dir(temp.child("full").path()).unwrap(),
        Removal::NotEmpty
    );
    temp.child("full/inner.txt").assert("x");
}

#[test]
fn test_remove_empty_dir_on_file_is_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.path().join("plain.txt");
    fs::write(&file, "x").unwrap();

    let result = io::remove_empty_dir(&file);

    assert!(matches!(result, Err(dirsync_fs::Error::Io { .. })));
}

#[cfg(unix)]
#[test]
fn test_copy_file_failure_leaves_no_partial_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    // Opening a directory succeeds on unix but reading it fails
    temp.child("unreadable").create_dir_all().unwrap();

    let result = io::copy_file(temp.child("unreadable").path(), temp.child("dst.txt").path());

    assert!(matches!(result, Err(dirsync_fs::Error::Io { .. })));
    temp.child("dst.txt").assert(predicate::path::missing());
}
