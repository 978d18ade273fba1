//! Report rendering
//!
//! The change listing is plain text so it reads the same piped or on a
//! terminal. Status lines around it are colored.

use colored::Colorize;
use serde::Serialize;

use dirsync_core::{Changes, Reconciliation, SyncReport};

const RULE_WIDTH: usize = 40;

/// Machine-readable output for `--json`.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    #[serde(flatten)]
    pub reconciliation: &'a Reconciliation,
    /// Whether the destination matched the source after syncing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_sync: Option<bool>,
}

/// Render the six change categories, empty ones included.
pub fn render_changes(changes: &Changes) -> String {
    let mut out = String::new();
    block(&mut out, "Missing dirs", changes.missing_dirs());
    block(&mut out, "Missing files", changes.missing_files());
    block(&mut out, "Moved dirs", changes.moved_dirs());
    block(&mut out, "Moved files", changes.moved_files());
    block(&mut out, "Deleted dirs", changes.deleted_dirs());
    block(&mut out, "Deleted files", changes.deleted_files());
    out
}

fn block<T: std::fmt::Display>(out: &mut String, title: &str, items: &[T]) {
    out.push_str(&format!("{:-^width$}\n", format!(" {} ", title), width = RULE_WIDTH));
    for item in items {
        out.push_str(&format!("{}\n", item));
    }
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

/// Print what a sync did and what it skipped.
pub fn print_report(report: &SyncReport) {
    if report.actions.is_empty() && report.issues.is_empty() {
        println!("{} Nothing to apply.", "OK".green().bold());
    }

    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for issue in &report.issues {
        println!("   {} {}", "!".yellow(), issue);
    }

    if !report.undeleted_dirs.is_empty() {
        println!();
        println!(
            "{} Directories that could not be removed:",
            "WARN".yellow().bold()
        );
        for dir in &report.undeleted_dirs {
            println!("   {} {}", "-".yellow(), dir.to_string().cyan());
        }
    }
}

/// Print the outcome of the post-sync re-scan.
pub fn print_verification(remaining: &Changes) {
    if remaining.is_empty() {
        println!(
            "{} Destination matches source.",
            "OK".green().bold()
        );
    } else {
        println!(
            "{} Destination still differs from source ({} changes).",
            "DIFF".red().bold(),
            remaining.len()
        );
    }
}
