//! Change set computation
//!
//! Compares a source and a destination entry collection of one kind and
//! classifies the differences:
//!
//! - **missing**: source entries whose name appears nowhere in the destination
//! - **moved**: source entries not at their source location in the
//!   destination, but whose name appears elsewhere there
//! - **deleted**: destination entries whose name appears nowhere in the source
//!
//! Matching is by name only, so a collection that contains the same name
//! twice makes the match ambiguous. Computation then fails with
//! [`Error::DuplicateName`] instead of guessing.
//!
//! An entry present at the same location on both sides counts as unchanged
//! even when its identity key differs (for example a file edited in place).

use std::collections::hash_map::Entry as MapEntry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;

use dirsync_fs::RelPath;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::scan::{ScanOptions, Snapshot, scan};

/// A source entry whose name exists at a different location in the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Moved {
    /// Where the entry lives in the source; the location it must end up at
    pub source: Entry,
    /// Where the same-named entry currently lives in the destination
    pub destination: Entry,
}

impl Moved {
    /// Destination-relative path the entry must be moved to.
    pub fn target(&self) -> RelPath {
        self.source.path()
    }

    /// Destination-relative path the entry currently occupies.
    pub fn current(&self) -> RelPath {
        self.destination.path()
    }
}

impl std::fmt::Display for Moved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.current(), self.target())
    }
}

/// Classified differences between two collections of one entry kind.
///
/// `missing` and `deleted` keep scan order; `moved` keeps source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub missing: Vec<Entry>,
    pub moved: Vec<Moved>,
    pub deleted: Vec<Entry>,
}

impl ChangeSet {
    /// Compare `source` against `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if either side contains a repeated
    /// name.
    pub fn compute(source: &[Entry], destination: &[Entry]) -> Result<Self> {
        let (missing, moved) = find_missing_and_moved(source, destination)?;
        let deleted = find_deleted(source, destination)?;
        Ok(Self {
            missing,
            moved,
            deleted,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.moved.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len() + self.moved.len() + self.deleted.len()
    }
}

/// Change sets for directories and files from one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changes {
    pub dirs: ChangeSet,
    pub files: ChangeSet,
}

impl Changes {
    /// Compare two snapshots.
    ///
    /// Either every list is computed or an error is returned; there is no
    /// partial result.
    pub fn compute(source: &Snapshot, destination: &Snapshot) -> Result<Self> {
        let (missing_dirs, moved_dirs) = find_missing_and_moved(&source.dirs, &destination.dirs)?;
        let (missing_files, moved_files) =
            find_missing_and_moved(&source.files, &destination.files)?;
        let deleted_dirs = find_deleted(&source.dirs, &destination.dirs)?;
        let deleted_files = find_deleted(&source.files, &destination.files)?;

        Ok(Self {
            dirs: ChangeSet {
                missing: missing_dirs,
                moved: moved_dirs,
                deleted: deleted_dirs,
            },
            files: ChangeSet {
                missing: missing_files,
                moved: moved_files,
                deleted: deleted_files,
            },
        })
    }

    /// Scan both roots and compare them.
    pub fn scan(
        source_root: &Path,
        destination_root: &Path,
        source_options: &ScanOptions,
        destination_options: &ScanOptions,
    ) -> Result<Self> {
        let source = scan(source_root, source_options);
        let destination = scan(destination_root, destination_options);
        Self::compute(&source, &destination)
    }

    pub fn missing_dirs(&self) -> &[Entry] {
        &self.dirs.missing
    }

    pub fn missing_files(&self) -> &[Entry] {
        &self.files.missing
    }

    pub fn moved_dirs(&self) -> &[Moved] {
        &self.dirs.moved
    }

    pub fn moved_files(&self) -> &[Moved] {
        &self.files.moved
    }

    pub fn deleted_dirs(&self) -> &[Entry] {
        &self.dirs.deleted
    }

    pub fn deleted_files(&self) -> &[Entry] {
        &self.files.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len() + self.files.len()
    }
}

/// Classify source entries as missing from or moved within `destination`.
///
/// Entries already at their source location in the destination are skipped.
///
/// # Errors
///
/// Returns [`Error::DuplicateName`] if two destination entries share a name.
pub fn find_missing_and_moved(
    source: &[Entry],
    destination: &[Entry],
) -> Result<(Vec<Entry>, Vec<Moved>)> {
    let by_name = index_by_name(destination)?;
    let locations: HashSet<&Entry> = destination.iter().collect();

    let mut missing = Vec::new();
    let mut moved = Vec::new();

    for entry in source {
        if locations.contains(entry) {
            continue;
        }
        match by_name.get(entry.name()) {
            Some(existing) => moved.push(Moved {
                source: entry.clone(),
                destination: (*existing).clone(),
            }),
            None => missing.push(entry.clone()),
        }
    }

    Ok((missing, moved))
}

/// Destination entries whose name appears nowhere in `source`.
///
/// # Errors
///
/// Returns [`Error::DuplicateName`] if two source entries share a name.
pub fn find_deleted(source: &[Entry], destination: &[Entry]) -> Result<Vec<Entry>> {
    let names = index_by_name(source)?;

    Ok(destination
        .iter()
        .filter(|entry| !names.contains_key(entry.name()))
        .cloned()
        .collect())
}

/// Index entries by name, failing on the first name seen twice.
///
/// The error names the earlier entry first, in traversal order.
fn index_by_name(entries: &[Entry]) -> Result<HashMap<&str, &Entry>> {
    let mut index: HashMap<&str, &Entry> = HashMap::with_capacity(entries.len());

    for entry in entries {
        match index.entry(entry.name()) {
            MapEntry::Occupied(existing) => {
                return Err(Error::DuplicateName {
                    kind: entry.kind(),
                    first: existing.get().path(),
                    second: entry.path(),
                });
            }
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    Ok(index)
}
