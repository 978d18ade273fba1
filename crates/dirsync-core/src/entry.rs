//! Identity model for scanned filesystem entries
//!
//! An [`Entry`] has two notions of sameness:
//!
//! - **Location**: `(relative_path, name)`. This is what `==` and `Hash`
//!   compare, so entries can be used in sets keyed by where they live.
//! - **Identity**: the [`EntryKey`] fingerprint of name, creation time and
//!   (for files) size. Compared through [`Entry::same_identity`].
//!
//! File contents are never hashed. Two files with the same name, creation
//! time and size are indistinguishable to this model.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::Serialize;

use dirsync_fs::RelPath;

/// Kind of a scanned entry. Entries of different kinds are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Identity fingerprint of an entry.
///
/// Equal iff every field is equal. `size` is `None` for directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntryKey {
    pub name: String,
    /// Filesystem-reported creation time (modification time where the
    /// filesystem has no birth time)
    pub created: Option<DateTime<Utc>>,
    pub size: Option<u64>,
}

/// One filesystem object discovered under a scan root.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Directory containing the entry, relative to the scan root
    relative_path: RelPath,
    name: String,
    key: EntryKey,
    kind: EntryKind,
}

impl Entry {
    /// Create a directory entry.
    pub fn directory(
        relative_path: impl Into<RelPath>,
        name: impl Into<String>,
        created: Option<DateTime<Utc>>,
    ) -> Self {
        let name = name.into();
        Self {
            relative_path: relative_path.into(),
            key: EntryKey {
                name: name.clone(),
                created,
                size: None,
            },
            name,
            kind: EntryKind::Directory,
        }
    }

    /// Create a file entry.
    pub fn file(
        relative_path: impl Into<RelPath>,
        name: impl Into<String>,
        created: Option<DateTime<Utc>>,
        size: u64,
    ) -> Self {
        let name = name.into();
        Self {
            relative_path: relative_path.into(),
            key: EntryKey {
                name: name.clone(),
                created,
                size: Some(size),
            },
            name,
            kind: EntryKind::File,
        }
    }

    pub fn relative_path(&self) -> &RelPath {
        &self.relative_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Full location of the entry relative to its scan root.
    pub fn path(&self) -> RelPath {
        self.relative_path.join(&self.name)
    }

    /// Whether both entries carry the same identity fingerprint.
    pub fn same_identity(&self, other: &Entry) -> bool {
        self.key == other.key
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.relative_path == other.relative_path && self.name == other.name
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.relative_path.hash(state);
        self.name.hash(state);
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
