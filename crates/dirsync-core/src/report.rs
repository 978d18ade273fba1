//! Report types for the sync executor

use std::path::PathBuf;

use serde::Serialize;

use dirsync_fs::RelPath;

/// A filesystem mutation performed during a sync.
///
/// Paths are relative to the destination root, except quarantine locations
/// which may live anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    CreatedQuarantine { path: PathBuf },
    CreatedDir { path: RelPath },
    CopiedFile { path: RelPath },
    MovedFile { from: RelPath, to: RelPath },
    QuarantinedFile { from: RelPath, to: PathBuf },
    RemovedDir { path: RelPath },
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedQuarantine { path } => {
                write!(f, "created quarantine directory {}", path.display())
            }
            Self::CreatedDir { path } => write!(f, "created directory {}", path),
            Self::CopiedFile { path } => write!(f, "copied {}", path),
            Self::MovedFile { from, to } => write!(f, "moved {} -> {}", from, to),
            Self::QuarantinedFile { from, to } => {
                write!(f, "quarantined {} -> {}", from, to.display())
            }
            Self::RemovedDir { path } => write!(f, "removed directory {}", path),
        }
    }
}

/// The executor step an issue was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateDir,
    CopyFile,
    MoveFile,
    QuarantineFile,
    RemoveDir,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Self::CreateDir => "create directory",
            Self::CopyFile => "copy file",
            Self::MoveFile => "move file",
            Self::QuarantineFile => "quarantine file",
            Self::RemoveDir => "remove directory",
        };
        write!(f, "{}", verb)
    }
}

/// Why an item was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    AlreadyExists,
    DoesNotExist,
}

/// A per-item condition that was reported and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncIssue {
    pub operation: Operation,
    pub reason: IssueReason,
    /// The offending location: the occupied destination for
    /// `AlreadyExists`, the absent path for `DoesNotExist`
    pub path: PathBuf,
}

impl std::fmt::Display for SyncIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.reason {
            IssueReason::AlreadyExists => "already exists",
            IssueReason::DoesNotExist => "does not exist",
        };
        write!(
            f,
            "{} {}, cannot {}",
            self.path.display(),
            state,
            self.operation
        )
    }
}

/// Report from a sync run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Mutations carried out, in execution order
    pub actions: Vec<SyncAction>,
    /// Items skipped because a path already existed or had vanished
    pub issues: Vec<SyncIssue>,
    /// Directories still non-empty once removal stopped making progress
    pub undeleted_dirs: Vec<RelPath>,
}

impl SyncReport {
    /// True when every item was applied.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.undeleted_dirs.is_empty()
    }

    pub(crate) fn action(&mut self, action: SyncAction) {
        tracing::debug!(%action, "applied");
        self.actions.push(action);
    }

    pub(crate) fn issue(&mut self, operation: Operation, reason: IssueReason, path: PathBuf) {
        let issue = SyncIssue {
            operation,
            reason,
            path,
        };
        tracing::warn!(%issue, "skipped");
        self.issues.push(issue);
    }
}
