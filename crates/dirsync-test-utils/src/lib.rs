//! Shared test utilities for the dirsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for source/destination fixtures

pub mod tree;

pub use tree::{TestTree, TreeItem, listing};
