//! [`TestTree`] builder for reconciliation scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// One item of a tree listing: a directory, or a file with its bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TreeItem {
    Dir(String),
    File(String, Vec<u8>),
}

/// A temporary directory holding a `src/` and a `dest/` tree.
///
/// # Example
///
/// ```rust,no_run
/// use dirsync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.src_file("a/x.txt", "hello");
/// tree.dest_file("b/x.txt", "hello");
/// tree.assert_dest_file("b/x.txt", "hello");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create a temp dir with empty `src/` and `dest/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::create_dir(temp_dir.path().join("dest")).unwrap();
        Self { temp_dir }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn dest(&self) -> PathBuf {
        self.root().join("dest")
    }

    /// Create a directory (and parents) under `src/`.
    pub fn src_dir(&self, path: &str) -> &Self {
        fs::create_dir_all(self.src().join(path)).unwrap();
        self
    }

    /// Create a directory (and parents) under `dest/`.
    pub fn dest_dir(&self, path: &str) -> &Self {
        fs::create_dir_all(self.dest().join(path)).unwrap();
        self
    }

    /// Write a file (creating parents) under `src/`.
    pub fn src_file(&self, path: &str, content: &str) -> &Self {
        write_file(&self.src().join(path), content);
        self
    }

    /// Write a file (creating parents) under `dest/`.
    pub fn dest_file(&self, path: &str, content: &str) -> &Self {
        write_file(&self.dest().join(path), content);
        self
    }

    /// Full listing of `src/`.
    pub fn src_listing(&self) -> Vec<TreeItem> {
        listing(&self.src())
    }

    /// Full listing of `dest/`.
    pub fn dest_listing(&self) -> Vec<TreeItem> {
        listing(&self.dest())
    }

    /// Assert that `path` under `dest/` is a file with exactly `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or its content differs.
    pub fn assert_dest_file(&self, path: &str, content: &str) {
        let full_path = self.dest().join(path);
        let actual = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert_eq!(
            actual,
            content,
            "Unexpected content in {}",
            full_path.display()
        );
    }

    /// Assert that `path` under `dest/` is a directory.
    pub fn assert_dest_dir(&self, path: &str) {
        let full_path = self.dest().join(path);
        assert!(
            full_path.is_dir(),
            "Expected directory to exist: {}",
            full_path.display()
        );
    }

    /// Assert that nothing exists at `path` under `dest/`.
    pub fn assert_dest_missing(&self, path: &str) {
        let full_path = self.dest().join(path);
        assert!(
            fs::symlink_metadata(&full_path).is_err(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }
}

/// Sorted listing of every directory and file below `root`, with file bytes.
///
/// Two listings are equal iff the trees are structurally and byte-for-byte
/// identical.
pub fn listing(root: &Path) -> Vec<TreeItem> {
    let mut items: Vec<TreeItem> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            if entry.file_type().is_dir() {
                TreeItem::Dir(relative)
            } else {
                TreeItem::File(relative, fs::read(entry.path()).unwrap())
            }
        })
        .collect();
    items.sort();
    items
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
