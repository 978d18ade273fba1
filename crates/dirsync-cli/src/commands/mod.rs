//! Command implementations for dirsync-cli

pub mod reconcile;
pub mod render;

pub use reconcile::run_reconcile;
