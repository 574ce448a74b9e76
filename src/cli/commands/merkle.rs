//! Merkle command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashSet;
use std::path::PathBuf;

use super::{unique_proof_stem, PENDING_SUFFIX};
use crate::batch::HashBatch;
use crate::config::GlobalConfig;
use crate::proofs::ProofGenerator;

/// Execute the merkle command
pub fn execute(
    hashes_file: PathBuf,
    output_dir: Option<PathBuf>,
    no_save_proofs: bool,
    quiet: bool,
) -> Result<()> {
    let batch = HashBatch::load(&hashes_file)
        .with_context(|| format!("couldn't read {}", hashes_file.display()))?;

    if batch.is_empty() {
        anyhow::bail!("No hashes found in {}", hashes_file.display());
    }

    let generator = ProofGenerator::from_batch(&batch)?;
    let root = generator.root();

    if quiet {
        println!("{}", root);
    } else {
        println!("{}: {}", "Merkle Root".bold(), root.to_string().cyan());
    }

    if no_save_proofs {
        return Ok(());
    }

    let output_dir = match output_dir {
        Some(dir) => dir,
        None => GlobalConfig::load()?.output.proofs_dir,
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("couldn't create {}", output_dir.display()))?;

    let mut used_stems = HashSet::new();
    for (path, pending) in generator.prove_batch(&batch)? {
        let stem = unique_proof_stem(&path, &mut used_stems);
        let proof_path = output_dir.join(format!("{}{}", stem, PENDING_SUFFIX));
        pending
            .save(&proof_path)
            .with_context(|| format!("couldn't write {}", proof_path.display()))?;
        tracing::debug!(file = %path, proof = %proof_path.display(), "wrote pending proof");
    }

    if quiet {
        return Ok(());
    }
    println!(
        "{} Saved {} pending proofs to {}",
        "✓".green(),
        batch.len(),
        output_dir.join(format!("*{}", PENDING_SUFFIX)).display()
    );
    println!("Next step: run 'dfts anchor {}' to put this on the blockchain.", root);

    Ok(())
}
