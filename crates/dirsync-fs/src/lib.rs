//! Filesystem primitives for dirsync
//!
//! Provides normalized relative paths, guarded non-overwriting I/O
//! operations, and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{Placement, Removal};
pub use path::RelPath;
