//! Error types for dirsync-core

use std::path::PathBuf;

use dirsync_fs::RelPath;

use crate::entry::EntryKind;

/// Result type for dirsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dirsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two entries of one kind share a name, so matching by name is ambiguous
    #[error("Duplicate {kind} name found: {first} and {second}")]
    DuplicateName {
        kind: EntryKind,
        first: RelPath,
        second: RelPath,
    },

    /// Source and destination are the same tree or one contains the other
    #[error("Source {src} and destination {dest} overlap")]
    OverlappingRoots { src: PathBuf, dest: PathBuf },

    /// The quarantine directory is the source tree or lies inside it
    #[error("Quarantine directory {quarantine} is inside source {src}")]
    QuarantineInSource { quarantine: PathBuf, src: PathBuf },

    /// Filesystem error from dirsync-fs
    #[error(transparent)]
    Fs(#[from] dirsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
