//! Finalize command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::{FINAL_SUFFIX, PENDING_SUFFIX};
use crate::config::GlobalConfig;
use crate::core::types::Network;
use crate::proofs::{normalize_txid, PendingProof};

/// Execute the finalize command
pub fn execute(
    proof_dir: PathBuf,
    txid: String,
    network: Option<Network>,
    block_height: Option<u64>,
    quiet: bool,
) -> Result<()> {
    if !proof_dir.is_dir() {
        anyhow::bail!("{} is not a directory", proof_dir.display());
    }

    // Reject a bad txid before touching any file
    let txid = normalize_txid(&txid)?;
    let network = match network {
        Some(network) => network,
        None => GlobalConfig::load()?.network.default,
    };

    let pattern = proof_dir.join(format!("*{}", PENDING_SUFFIX));
    let pattern = pattern.to_string_lossy();
    let pending_files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid proof directory {}", proof_dir.display()))?
        .filter_map(|entry| entry.ok())
        .collect();

    let mut updated = 0usize;
    let mut failed = 0usize;
    for pending_path in &pending_files {
        match finalize_file(pending_path, network, &txid, block_height) {
            Ok(final_path) => {
                tracing::debug!(from = %pending_path.display(), to = %final_path.display(), "finalized proof");
                updated += 1;
            },
            Err(e) => {
                eprintln!("{} {}: {:#}", "Skipping".yellow(), pending_path.display(), e);
                failed += 1;
            },
        }
    }

    if !quiet {
        println!(
            "{} Updated {} proofs in {} ({} network)",
            "✓".green(),
            updated,
            proof_dir.display(),
            network
        );
    }

    if failed > 0 {
        anyhow::bail!("{} pending proofs could not be finalized", failed);
    }
    Ok(())
}

/// Write the final record next to the pending one and remove the pending file
fn finalize_file(
    pending_path: &Path,
    network: Network,
    txid: &str,
    block_height: Option<u64>,
) -> Result<PathBuf> {
    let pending = PendingProof::load(pending_path)?;
    let record = pending.finalize(network, txid, block_height)?;

    let final_path = final_path_for(pending_path);
    record.save(&final_path)?;
    std::fs::remove_file(pending_path)?;
    Ok(final_path)
}

fn final_path_for(pending_path: &Path) -> PathBuf {
    let name = pending_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(PENDING_SUFFIX).unwrap_or(&name);
    pending_path.with_file_name(format!("{}{}", stem, FINAL_SUFFIX))
}
