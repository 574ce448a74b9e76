//! Batch command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::batch::hash_directory;

/// Execute the batch command
pub fn execute(directory: PathBuf, output: PathBuf, quiet: bool) -> Result<()> {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} {bar:40.cyan/blue} {pos:>7}/{len:7} files")?,
        );
        pb.set_message("Hashing files...");
        pb
    };

    let outcome = hash_directory(&directory, Some(&progress))
        .with_context(|| format!("couldn't hash {}", directory.display()))?;
    progress.finish_and_clear();

    for (path, reason) in &outcome.skipped {
        eprintln!(
            "{} {} ({})",
            "Skipping".yellow(),
            path.display(),
            reason
        );
    }

    outcome
        .batch
        .save(&output)
        .with_context(|| format!("couldn't write {}", output.display()))?;

    if !quiet {
        println!(
            "{} Hashed {} files. Saved hashes to {}",
            "✓".green(),
            outcome.batch.len(),
            output.display().to_string().cyan()
        );
    }

    Ok(())
}
