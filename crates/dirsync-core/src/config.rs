//! Reconciliation configuration
//!
//! Settings come from the command line, optionally backed by a config file
//! loaded through [`dirsync_fs::ConfigStore`]. Explicit settings win over the
//! file, and the file wins over defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use dirsync_fs::ConfigStore;

use crate::Result;

/// Name of the quarantine directory created under the destination by default.
pub const DEFAULT_QUARANTINE_DIR: &str = "deleted";

/// Settings read from a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub quarantine_dir: Option<PathBuf>,
    pub follow_symlinks: Option<bool>,
}

impl ConfigFile {
    /// Load a config file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }
}

/// Resolved settings for one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Where deleted files go; `None` means `<destination>/deleted`
    pub quarantine_dir: Option<PathBuf>,
    /// Apply the changes; when false only compute them
    pub sync: bool,
    pub follow_symlinks: bool,
}

impl SyncConfig {
    /// A dry-run configuration with defaults.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            quarantine_dir: None,
            sync: false,
            follow_symlinks: false,
        }
    }

    pub fn with_quarantine_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.quarantine_dir = Some(dir.into());
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Fill settings left at their defaults from a config file.
    pub fn merge_file(mut self, file: ConfigFile) -> Self {
        if self.quarantine_dir.is_none() {
            self.quarantine_dir = file.quarantine_dir;
        }
        if !self.follow_symlinks {
            self.follow_symlinks = file.follow_symlinks.unwrap_or(false);
        }
        self
    }

    /// The effective quarantine directory.
    pub fn quarantine_dir(&self) -> PathBuf {
        self.quarantine_dir
            .clone()
            .unwrap_or_else(|| self.destination.join(DEFAULT_QUARANTINE_DIR))
    }
}
