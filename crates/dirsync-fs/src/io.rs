//! Guarded filesystem operations
//!
//! None of these operations overwrite an existing path. Conditions a caller
//! is expected to report and skip are returned as [`Placement`] or
//! [`Removal`] values; every other I/O failure is an [`Error`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;

use serde::Serialize;

use crate::{Error, Result};

/// Outcome of an operation that places something at a destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// The operation was carried out
    Done,
    /// The path to read from does not exist
    SourceMissing,
    /// Something already occupies the destination path
    DestinationExists,
}

/// Outcome of an attempt to remove an empty directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    Removed,
    Missing,
    /// The directory still has children
    NotEmpty,
}

/// Whether anything (including a dangling symlink) exists at `path`.
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create a directory and any missing parents.
///
/// Returns [`Placement::DestinationExists`] without touching anything if the
/// path is already occupied.
pub fn create_dir(path: &Path) -> Result<Placement> {
    if occupied(path) {
        return Ok(Placement::DestinationExists);
    }
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    Ok(Placement::Done)
}

/// Copy a file's bytes to a new file.
///
/// The destination is opened with create-new semantics, so an existing file
/// is never truncated even if it appears after the existence check.
pub fn copy_file(from: &Path, to: &Path) -> Result<Placement> {
    let mut reader = match File::open(from) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Placement::SourceMissing),
        Err(e) => return Err(Error::io(from, e)),
    };
    if occupied(to) {
        return Ok(Placement::DestinationExists);
    }

    let mut writer = match OpenOptions::new().write(true).create_new(true).open(to) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Ok(Placement::DestinationExists);
        }
        Err(e) => return Err(Error::io(to, e)),
    };

    let written = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    if let Err(e) = written {
        // A partial file would block every later copy to this path
        drop(writer);
        if let Err(cleanup) = fs::remove_file(to) {
            tracing::warn!(path = %to.display(), error = %cleanup, "failed to remove partial copy");
        }
        return Err(Error::io(to, e));
    }

    Ok(Placement::Done)
}

/// Move a file to a new location.
///
/// Uses a rename; when source and destination sit on different devices the
/// file is copied and the original removed instead.
pub fn move_file(from: &Path, to: &Path) -> Result<Placement> {
    if !occupied(from) {
        return Ok(Placement::SourceMissing);
    }
    if occupied(to) {
        return Ok(Placement::DestinationExists);
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(Placement::Done),
        Err(e) if e.kind() == ErrorKind::NotFound && !occupied(from) => {
            Ok(Placement::SourceMissing)
        }
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(from = %from.display(), to = %to.display(), "rename crosses devices, copying");
            let placement = copy_file(from, to)?;
            if placement == Placement::Done {
                fs::remove_file(from).map_err(|e| Error::io(from, e))?;
            }
            Ok(placement)
        }
        Err(e) => Err(Error::io(from, e)),
    }
}

/// Remove a directory only if it is empty.
pub fn remove_empty_dir(path: &Path) -> Result<Removal> {
    match fs::remove_dir(path) {
        Ok(()) => Ok(Removal::Removed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::Missing),
        Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => Ok(Removal::NotEmpty),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
