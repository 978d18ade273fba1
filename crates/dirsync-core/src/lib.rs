//! Core reconciliation layer for dirsync
//!
//! Makes a destination directory tree match the set of entries in a source
//! tree, in one direction only:
//!
//! - **Identity model**: [`Entry`] location vs [`EntryKey`] fingerprint
//! - **Scanner**: recursive, read-only listing of a tree into a [`Snapshot`]
//! - **Change computation**: missing, moved and deleted entries per kind
//! - **Executor**: ordered, non-overwriting application of [`Changes`]
//!
//! # Architecture
//!
//! ```text
//!   scan(source)   scan(destination)
//!         \            /
//!        Changes::compute            (fails before any mutation)
//!               |
//!        SyncExecutor::execute       (only when syncing)
//!               |
//!          SyncReport
//! ```
//!
//! File contents are never compared. An entry at the same location on both
//! sides is treated as unchanged even if its size or timestamp differ.
//!
//! # Example
//!
//! ```no_run
//! use dirsync_core::{Reconciler, SyncConfig};
//!
//! fn example() -> dirsync_core::Result<()> {
//!     let config = SyncConfig::new("/data/src", "/data/backup").with_sync(true);
//!     let outcome = Reconciler::new(config)?.run()?;
//!     println!("{} changes", outcome.changes.len());
//!     Ok(())
//! }
//! ```

pub mod changes;
pub mod config;
pub mod entry;
pub mod error;
pub mod executor;
pub mod reconcile;
pub mod report;
pub mod scan;

pub use changes::{ChangeSet, Changes, Moved, find_deleted, find_missing_and_moved};
pub use config::{ConfigFile, DEFAULT_QUARANTINE_DIR, SyncConfig};
pub use entry::{Entry, EntryKey, EntryKind};
pub use error::{Error, Result};
pub use executor::SyncExecutor;
pub use reconcile::{Reconciler, Reconciliation};
pub use report::{IssueReason, Operation, SyncAction, SyncIssue, SyncReport};
pub use scan::{ScanOptions, Snapshot, scan};
