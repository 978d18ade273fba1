//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

/// dirsync - Make a destination directory tree match a source tree
///
/// Entries are matched by name: anything missing is copied from the source,
/// anything found elsewhere in the destination is moved into place, and
/// anything the source no longer has is moved to a quarantine directory.
/// Without --sync only the changes are reported.
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source root, never modified. It must exist: an absent source is refused, not scanned as empty
    #[arg(long, env = "DIRSYNC_SRC", value_name = "PATH")]
    pub src: PathBuf,

    /// Destination root to reconcile
    #[arg(long, env = "DIRSYNC_DEST", value_name = "PATH")]
    pub dest: PathBuf,

    /// Quarantine directory for deleted files [default: <DEST>/deleted]
    #[arg(long, env = "DIRSYNC_DELETE_DIR", value_name = "PATH")]
    pub delete_dir: Option<PathBuf>,

    /// Apply the changes instead of only reporting them
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub sync: bool,

    /// Config file (.toml, .json, .yaml) with quarantine_dir and follow_symlinks
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 if the sync skipped any item
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
