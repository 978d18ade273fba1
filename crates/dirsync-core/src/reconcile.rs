//! One reconciliation pass: scan, compare, and optionally apply.

use std::path::{Path, PathBuf};

use serde::Serialize;

use dirsync_fs::RelPath;

use crate::changes::Changes;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::executor::SyncExecutor;
use crate::report::SyncReport;
use crate::scan::ScanOptions;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub changes: Changes,
    /// Present only when the changes were applied
    pub report: Option<SyncReport>,
}

/// Drives scanning, change computation and execution for one config.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: SyncConfig,
}

impl Reconciler {
    /// Create a reconciler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OverlappingRoots`] if source and destination are the
    /// same directory or one contains the other, and
    /// [`Error::QuarantineInSource`] if deleted files would land in the
    /// source tree.
    pub fn new(config: SyncConfig) -> Result<Self> {
        let src = resolve(&config.source);
        let dest = resolve(&config.destination);
        if src.starts_with(&dest) || dest.starts_with(&src) {
            return Err(Error::OverlappingRoots {
                src: config.source.clone(),
                dest: config.destination.clone(),
            });
        }

        let quarantine = config.quarantine_dir();
        if resolve(&quarantine).starts_with(&src) {
            return Err(Error::QuarantineInSource {
                quarantine,
                src: config.source.clone(),
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Compute the changes without touching either tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if either tree repeats a name within
    /// one entry kind.
    pub fn compute(&self) -> Result<Changes> {
        Changes::scan(
            &self.config.source,
            &self.config.destination,
            &self.source_options(),
            &self.destination_options(),
        )
    }

    /// Compute the changes and, if configured to sync, apply them.
    ///
    /// Change computation finishes before anything is mutated, so a
    /// duplicate name aborts with both trees untouched.
    pub fn run(&self) -> Result<Reconciliation> {
        let changes = self.compute()?;
        tracing::info!(
            changes = changes.len(),
            sync = self.config.sync,
            "changes computed"
        );

        let report = if self.config.sync {
            let executor = SyncExecutor::new(
                &self.config.source,
                &self.config.destination,
                self.config.quarantine_dir(),
            );
            Some(executor.execute(&changes)?)
        } else {
            None
        };

        Ok(Reconciliation { changes, report })
    }

    /// Re-scan after a sync and return whatever still differs.
    pub fn verify(&self) -> Result<Changes> {
        self.compute()
    }

    fn source_options(&self) -> ScanOptions {
        ScanOptions {
            follow_symlinks: self.config.follow_symlinks,
            exclude: Vec::new(),
        }
    }

    /// Destination scan options, pruning a quarantine directory that lives
    /// inside the destination.
    fn destination_options(&self) -> ScanOptions {
        let dest = resolve(&self.config.destination);
        let quarantine = resolve(&self.config.quarantine_dir());

        let exclude = match quarantine.strip_prefix(&dest) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                vec![RelPath::from_components(relative)]
            }
            _ => Vec::new(),
        };

        ScanOptions {
            follow_symlinks: self.config.follow_symlinks,
            exclude,
        }
    }
}

/// Canonicalize a path that may not exist yet by resolving its nearest
/// existing ancestor.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => resolve(parent).join(name),
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}
