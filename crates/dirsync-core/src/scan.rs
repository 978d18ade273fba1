//! Entry scanner
//!
//! Recursively lists every directory and file under a root. Scanning is
//! read-only and never fails: a missing or unreadable root produces an empty
//! [`Snapshot`], and unreadable entries below the root are skipped.

use std::fs::Metadata;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use walkdir::WalkDir;

use dirsync_fs::RelPath;

use crate::entry::Entry;

/// Options controlling a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Follow symbolic links instead of reporting them as files
    pub follow_symlinks: bool,
    /// Subtrees to prune, relative to the scan root
    pub exclude: Vec<RelPath>,
}

/// All entries found under one root, in traversal order.
///
/// Traversal is depth-first with siblings sorted by name, so a directory
/// always precedes its descendants.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub dirs: Vec<Entry>,
    pub files: Vec<Entry>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len() + self.files.len()
    }
}

/// Scan `root` and return every directory and file below it.
pub fn scan(root: &Path, options: &ScanOptions) -> Snapshot {
    let mut snapshot = Snapshot::default();

    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "scan root missing or not a directory");
        return snapshot;
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(root, entry.path(), &options.exclude));

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative_path = relative
            .parent()
            .map(RelPath::from_components)
            .unwrap_or_default();
        let name = entry.file_name().to_string_lossy().into_owned();

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), error = %err, "skipping entry without metadata");
                continue;
            }
        };
        let created = creation_time(&metadata);

        if entry.file_type().is_dir() {
            snapshot
                .dirs
                .push(Entry::directory(relative_path, name, created));
        } else {
            snapshot
                .files
                .push(Entry::file(relative_path, name, created, metadata.len()));
        }
    }

    tracing::debug!(
        root = %root.display(),
        dirs = snapshot.dirs.len(),
        files = snapshot.files.len(),
        "scan complete"
    );
    snapshot
}

fn is_excluded(root: &Path, path: &Path, exclude: &[RelPath]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    match path.strip_prefix(root) {
        Ok(relative) => {
            let relative = RelPath::from_components(relative);
            exclude.iter().any(|excluded| *excluded == relative)
        }
        Err(_) => false,
    }
}

fn creation_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
