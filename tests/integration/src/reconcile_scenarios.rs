//! End-to-end reconciliation scenarios
//!
//! Each test builds a source and destination tree, runs a full pass, and
//! checks the destination, the source, and the quarantine afterwards.

use dirsync_core::{
    Changes, ConfigFile, Error, Reconciler, ScanOptions, SyncConfig, SyncExecutor, scan,
};
use dirsync_fs::RelPath;
use dirsync_test_utils::{TestTree, TreeItem, listing};
use pretty_assertions::assert_eq;
use std::fs;

fn sync_config(tree: &TestTree) -> SyncConfig {
    SyncConfig::new(tree.src(), tree.dest()).with_sync(true)
}

/// A photo library whose backup was laid out by year and has since been
/// reorganised by album in the source.
fn photo_library() -> TestTree {
    let tree = TestTree::new();
    tree.src_file("albums/beach/sunset.jpg", "sunset")
        .src_file("albums/beach/waves.jpg", "waves")
        .src_file("albums/city/tower.jpg", "tower")
        .src_file("albums/city/night/neon.jpg", "neon")
        .src_file("inbox/new.jpg", "new")
        .src_dir("albums/empty");
    tree.dest_file("2021/sunset.jpg", "sunset")
        .dest_file("2021/waves.jpg", "waves")
        .dest_file("2022/tower.jpg", "tower")
        .dest_file("2022/night/neon.jpg", "neon")
        .dest_file("2022/blurry.jpg", "blurry")
        .dest_file("thumbs.db", "cache");
    tree
}

#[test]
fn test_reorganised_library_converges() {
    let tree = photo_library();
    let source_before = tree.src_listing();
    let reconciler = Reconciler::new(sync_config(&tree)).unwrap();

    let outcome = reconciler.run().unwrap();

    let report = outcome.report.unwrap();
    assert!(report.is_clean(), "report: {:#?}", report);
    assert!(reconciler.verify().unwrap().is_empty());
    assert_eq!(tree.src_listing(), source_before);

    // Destination minus quarantine is now byte-identical to the source
    let dest: Vec<TreeItem> = tree
        .dest_listing()
        .into_iter()
        .filter(|item| match item {
            TreeItem::Dir(path) | TreeItem::File(path, _) => !path.starts_with("deleted"),
        })
        .collect();
    assert_eq!(dest, source_before);

    let quarantine = listing(&tree.dest().join("deleted"));
    assert_eq!(
        quarantine,
        vec![
            TreeItem::File("blurry.jpg".into(), b"blurry".to_vec()),
            TreeItem::File("thumbs.db".into(), b"cache".to_vec()),
        ]
    );
}

#[test]
fn test_moved_directory_is_recreated_not_renamed() {
    let tree = photo_library();
    let changes = Reconciler::new(SyncConfig::new(tree.src(), tree.dest()))
        .unwrap()
        .compute()
        .unwrap();

    let moved: Vec<String> = changes.moved_dirs().iter().map(|m| m.to_string()).collect();
    assert_eq!(moved, vec!["2022/night -> albums/city/night"]);
    let moved_files: Vec<String> = changes.moved_files().iter().map(|m| m.to_string()).collect();
    assert!(moved_files.contains(&"2022/night/neon.jpg -> albums/city/night/neon.jpg".to_string()));

    let report = Reconciler::new(sync_config(&tree)).unwrap().run().unwrap().report.unwrap();
    assert!(report.undeleted_dirs.is_empty());
    tree.assert_dest_missing("2022");
    tree.assert_dest_file("albums/city/night/neon.jpg", "neon");
}

#[test]
fn test_manual_pipeline_matches_reconciler() {
    let tree = photo_library();
    let dest_options = ScanOptions {
        exclude: vec![RelPath::new("deleted")],
        ..Default::default()
    };

    let source = scan(&tree.src(), &ScanOptions::default());
    let destination = scan(&tree.dest(), &dest_options);
    let changes = Changes::compute(&source, &destination).unwrap();
    let computed = Reconciler::new(SyncConfig::new(tree.src(), tree.dest()))
        .unwrap()
        .compute()
        .unwrap();
    assert_eq!(changes, computed);

    let executor = SyncExecutor::new(tree.src(), tree.dest(), tree.dest().join("deleted"));
    let report = executor.execute(&changes).unwrap();

    assert!(report.is_clean());
    let after = Changes::compute(
        &scan(&tree.src(), &ScanOptions::default()),
        &scan(&tree.dest(), &dest_options),
    )
    .unwrap();
    assert!(after.is_empty());
}

#[test]
fn test_duplicate_in_source_aborts() {
    let tree = TestTree::new();
    tree.src_file("a/readme.md", "a").src_file("b/readme.md", "b");
    tree.dest_file("old.txt", "old");
    let before = tree.dest_listing();

    let result = Reconciler::new(sync_config(&tree)).unwrap().run();

    match result {
        Err(Error::DuplicateName { first, second, .. }) => {
            assert_eq!(first, RelPath::new("a/readme.md"));
            assert_eq!(second, RelPath::new("b/readme.md"));
        }
        other => panic!("expected duplicate name error, got {:?}", other),
    }
    assert_eq!(tree.dest_listing(), before);
}

#[test]
fn test_quarantine_collision_across_runs() {
    let tree = TestTree::new();
    tree.dest_file("notes.txt", "first");
    let reconciler = Reconciler::new(sync_config(&tree)).unwrap();
    reconciler.run().unwrap();
    tree.assert_dest_file("deleted/notes.txt", "first");

    // The same name shows up again and is deleted again
    tree.dest_file("notes.txt", "second");
    let report = reconciler.run().unwrap().report.unwrap();

    assert_eq!(report.issues.len(), 1);
    tree.assert_dest_file("notes.txt", "second");
    tree.assert_dest_file("deleted/notes.txt", "first");
}

#[test]
fn test_yaml_config_file() {
    let tree = photo_library();
    let trash = tree.root().join("trash");
    let config_path = tree.root().join("dirsync.yaml");
    fs::write(
        &config_path,
        format!("quarantine_dir: {}\nfollow_symlinks: false\n", trash.display()),
    )
    .unwrap();

    let config = sync_config(&tree).merge_file(ConfigFile::load(&config_path).unwrap());
    Reconciler::new(config).unwrap().run().unwrap();

    assert!(trash.join("thumbs.db").is_file());
    tree.assert_dest_missing("deleted");
}

#[test]
fn test_json_shape_of_reconciliation() {
    let tree = photo_library();
    let outcome = Reconciler::new(sync_config(&tree)).unwrap().run().unwrap();

    let value = serde_json::to_value(&outcome).unwrap();

    let deleted = value["changes"]["files"]["deleted"].as_array().unwrap();
    assert_eq!(deleted.len(), 2);
    assert_eq!(value["changes"]["dirs"]["moved"][0]["destination"]["name"], "night");
    let actions = value["report"]["actions"].as_array().unwrap();
    assert_eq!(actions[0]["action"], "created_quarantine");
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_is_scanned() {
    let tree = TestTree::new();
    let outside = tree.root().join("outside");
    fs::create_dir(&outside).unwrap();
    fs::write(outside.join("linked.txt"), "l").unwrap();
    std::os::unix::fs::symlink(&outside, tree.src().join("shared")).unwrap();

    let config = SyncConfig::new(tree.src(), tree.dest()).with_follow_symlinks(true);
    let changes = Reconciler::new(config).unwrap().compute().unwrap();

    assert_eq!(changes.missing_dirs().len(), 1);
    assert_eq!(changes.missing_files()[0].path(), RelPath::new("shared/linked.txt"));
}
