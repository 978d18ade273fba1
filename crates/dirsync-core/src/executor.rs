//! Sync executor
//!
//! Applies [`Changes`] to the destination tree in five ordered phases:
//!
//! 1. create missing directories and the target side of moved directories
//! 2. copy missing files from the source
//! 3. move files within the destination
//! 4. relocate deleted files into the quarantine directory
//! 5. remove deleted directories and the old side of moved directories
//!
//! Nothing is ever overwritten. Paths that already exist or have vanished
//! are reported in the [`SyncReport`] and skipped. Non-empty directories are
//! retried until a full sweep removes nothing. Any other I/O failure aborts
//! the run. The source tree is only read.

use std::path::{Path, PathBuf};

use dirsync_fs::{Placement, RelPath, Removal, io};

use crate::Result;
use crate::changes::{ChangeSet, Changes, Moved};
use crate::entry::Entry;
use crate::report::{IssueReason, Operation, SyncAction, SyncReport};

/// Applies computed changes to a destination tree.
#[derive(Debug, Clone)]
pub struct SyncExecutor {
    source_root: PathBuf,
    destination_root: PathBuf,
    quarantine_dir: PathBuf,
}

impl SyncExecutor {
    pub fn new(
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        quarantine_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            quarantine_dir: quarantine_dir.into(),
        }
    }

    pub fn quarantine_dir(&self) -> &Path {
        &self.quarantine_dir
    }

    /// Run all phases in order.
    ///
    /// # Errors
    ///
    /// Returns an error on any I/O failure other than the reportable
    /// already-exists, does-not-exist and directory-not-empty conditions.
    pub fn execute(&self, changes: &Changes) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        self.prepare_quarantine(&mut report)?;
        self.create_required_dirs(&changes.dirs, &mut report)?;
        self.copy_missing_files(&changes.files.missing, &mut report)?;
        self.move_files(&changes.files.moved, &mut report)?;
        self.quarantine_files(&changes.files.deleted, &mut report)?;
        self.remove_dirs(&changes.dirs, &mut report)?;

        tracing::info!(
            actions = report.actions.len(),
            issues = report.issues.len(),
            undeleted = report.undeleted_dirs.len(),
            "sync finished"
        );
        Ok(report)
    }

    fn prepare_quarantine(&self, report: &mut SyncReport) -> Result<()> {
        if self.quarantine_dir.is_dir() {
            return Ok(());
        }
        if io::create_dir(&self.quarantine_dir)? == Placement::Done {
            report.action(SyncAction::CreatedQuarantine {
                path: self.quarantine_dir.clone(),
            });
        } else {
            // Occupied by something that is not a directory
            report.issue(
                Operation::CreateDir,
                IssueReason::AlreadyExists,
                self.quarantine_dir.clone(),
            );
        }
        Ok(())
    }

    fn create_required_dirs(&self, dirs: &ChangeSet, report: &mut SyncReport) -> Result<()> {
        tracing::info!("creating required directories");

        let required = dirs
            .missing
            .iter()
            .map(Entry::path)
            .chain(dirs.moved.iter().map(Moved::target));

        for path in required {
            let native = path.under(&self.destination_root);
            match io::create_dir(&native)? {
                Placement::Done => report.action(SyncAction::CreatedDir { path }),
                Placement::DestinationExists => {
                    report.issue(Operation::CreateDir, IssueReason::AlreadyExists, native)
                }
                Placement::SourceMissing => {
                    report.issue(Operation::CreateDir, IssueReason::DoesNotExist, native)
                }
            }
        }
        Ok(())
    }

    fn copy_missing_files(&self, missing: &[Entry], report: &mut SyncReport) -> Result<()> {
        tracing::info!(count = missing.len(), "copying missing files");

        for entry in missing {
            let path = entry.path();
            let from = path.under(&self.source_root);
            let to = path.under(&self.destination_root);
            match io::copy_file(&from, &to)? {
                Placement::Done => report.action(SyncAction::CopiedFile { path }),
                Placement::SourceMissing => {
                    report.issue(Operation::CopyFile, IssueReason::DoesNotExist, from)
                }
                Placement::DestinationExists => {
                    report.issue(Operation::CopyFile, IssueReason::AlreadyExists, to)
                }
            }
        }
        Ok(())
    }

    fn move_files(&self, moved: &[Moved], report: &mut SyncReport) -> Result<()> {
        tracing::info!(count = moved.len(), "moving files");

        for pair in moved {
            let current = pair.current();
            let target = pair.target();
            let from = current.under(&self.destination_root);
            let to = target.under(&self.destination_root);
            match io::move_file(&from, &to)? {
                Placement::Done => report.action(SyncAction::MovedFile {
                    from: current,
                    to: target,
                }),
                Placement::SourceMissing => {
                    report.issue(Operation::MoveFile, IssueReason::DoesNotExist, from)
                }
                Placement::DestinationExists => {
                    report.issue(Operation::MoveFile, IssueReason::AlreadyExists, to)
                }
            }
        }
        Ok(())
    }

    fn quarantine_files(&self, deleted: &[Entry], report: &mut SyncReport) -> Result<()> {
        tracing::info!(count = deleted.len(), quarantine = %self.quarantine_dir.display(), "quarantining deleted files");

        for entry in deleted {
            let path = entry.path();
            let from = path.under(&self.destination_root);
            // Flattened: only the file name survives
            let to = self.quarantine_dir.join(entry.name());
            match io::move_file(&from, &to)? {
                Placement::Done => report.action(SyncAction::QuarantinedFile { from: path, to }),
                Placement::SourceMissing => {
                    report.issue(Operation::QuarantineFile, IssueReason::DoesNotExist, from)
                }
                Placement::DestinationExists => {
                    report.issue(Operation::QuarantineFile, IssueReason::AlreadyExists, to)
                }
            }
        }
        Ok(())
    }

    /// Remove obsolete directories deepest first, sweeping until a pass
    /// removes nothing.
    fn remove_dirs(&self, dirs: &ChangeSet, report: &mut SyncReport) -> Result<()> {
        tracing::info!("removing directories");

        // Scan order puts parents before children, so reversed is
        // children first
        let mut pending: Vec<RelPath> = dirs
            .deleted
            .iter()
            .rev()
            .map(Entry::path)
            .chain(dirs.moved.iter().rev().map(Moved::current))
            .collect();

        let mut sweep = 1;
        while !pending.is_empty() {
            let before = pending.len();
            let mut remaining = Vec::new();

            for path in pending {
                let native = path.under(&self.destination_root);
                match io::remove_empty_dir(&native)? {
                    Removal::Removed => report.action(SyncAction::RemovedDir { path }),
                    Removal::Missing => {
                        report.issue(Operation::RemoveDir, IssueReason::DoesNotExist, native)
                    }
                    Removal::NotEmpty => remaining.push(path),
                }
            }

            if remaining.len() == before {
                tracing::warn!(
                    sweep,
                    remaining = remaining.len(),
                    "no progress removing directories, giving up"
                );
                report.undeleted_dirs = remaining;
                break;
            }

            tracing::debug!(sweep, remaining = remaining.len(), "directory sweep done");
            pending = remaining;
            sweep += 1;
        }
        Ok(())
    }
}
