//! The reconcile command: report the changes and, with --sync, apply them

use colored::Colorize;

use dirsync_core::{Changes, ConfigFile, Reconciler, SyncConfig};

use super::render::{JsonOutput, print_report, print_verification, render_changes};
use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Exit status for a `--strict` sync that skipped items.
pub const EXIT_UNCLEAN: i32 = 2;

/// Build the effective configuration: flags first, then the config file.
pub fn build_config(cli: &Cli) -> Result<SyncConfig> {
    if !cli.src.is_dir() {
        return Err(CliError::user(format!(
            "Source directory does not exist: {}",
            cli.src.display()
        )));
    }

    let mut config = SyncConfig::new(&cli.src, &cli.dest)
        .with_sync(cli.sync)
        .with_follow_symlinks(cli.follow_symlinks);
    if let Some(dir) = &cli.delete_dir {
        config = config.with_quarantine_dir(dir);
    }
    if let Some(path) = &cli.config {
        config = config.merge_file(ConfigFile::load(path)?);
    }
    Ok(config)
}

/// Run one reconciliation pass and print the result.
///
/// Returns the process exit status.
pub fn run_reconcile(cli: &Cli) -> Result<i32> {
    let config = build_config(cli)?;
    let reconciler = Reconciler::new(config)?;

    if !cli.json {
        println!(
            "{} Comparing {} with {}",
            "=>".blue().bold(),
            cli.dest.display().to_string().cyan(),
            cli.src.display().to_string().cyan()
        );
    }

    let outcome = reconciler.run()?;
    let remaining = if outcome.report.is_some() {
        Some(reconciler.verify()?)
    } else {
        None
    };

    if cli.json {
        let output = JsonOutput {
            reconciliation: &outcome,
            in_sync: remaining.as_ref().map(Changes::is_empty),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_changes(&outcome.changes));

        match (&outcome.report, &remaining) {
            (Some(report), Some(remaining)) => {
                println!();
                println!("{} Applying changes...", "=>".blue().bold());
                print_report(report);
                println!();
                print_verification(remaining);
            }
            _ if !outcome.changes.is_empty() => {
                println!();
                println!(
                    "Dry run: {} changes. Run with {} to apply.",
                    outcome.changes.len(),
                    "--sync".cyan()
                );
            }
            _ => {
                println!("{} Destination matches source.", "OK".green().bold());
            }
        }
    }

    let unclean = outcome.report.as_ref().is_some_and(|r| !r.is_clean());
    if cli.strict && unclean {
        tracing::warn!("sync skipped items, exiting with status {}", EXIT_UNCLEAN);
        return Ok(EXIT_UNCLEAN);
    }
    Ok(0)
}
