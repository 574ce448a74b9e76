//! Verify command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::anchor::{
    check_integrity, check_membership, AnchorVerifier, EsploraClient, VerificationFailure,
};
use crate::config::GlobalConfig;
use crate::core::hash::hash_file;
use crate::proofs::ProofRecord;

/// Execute the verify command
pub fn execute(file_path: PathBuf, proof_path: PathBuf, json: bool, quiet: bool) -> Result<()> {
    let config = GlobalConfig::load()?;
    let record = ProofRecord::load(&proof_path)
        .with_context(|| format!("couldn't load proof {}", proof_path.display()))?;
    let client = EsploraClient::new(config.explorer.clone())?;
    let verifier = AnchorVerifier::new(client).with_root_match(config.anchor.root_match);

    let say = |line: String| {
        if !json && !quiet {
            println!("{}", line);
        }
    };

    say("1. Checking file integrity...".to_string());
    let file_hash = hash_file(&file_path)
        .with_context(|| format!("couldn't hash {}", file_path.display()))?;
    let outcome = check_integrity(&file_hash, &record)
        .and_then(|()| {
            say(format!("   Matches! {}", "✓".green()));
            say("2. Checking Merkle proof...".to_string());
            check_membership(&file_hash, &record)
        })
        .and_then(|()| {
            say(format!("   Valid! {}", "✓".green()));
            say(format!(
                "3. Checking blockchain (TX: {} on {})...",
                record.transaction_id, record.network
            ));
            verifier.check_anchor(&record)
        });

    match outcome {
        Ok(report) => {
            if json {
                let value = serde_json::json!({
                    "verified": true,
                    "report": report,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if !quiet {
                println!("   Found it! {} ({})", "✓".green(), report.status);
                println!();
                println!("{}", "Verification Successful!".green().bold());
            }
            Ok(())
        },
        Err(failure) => {
            if json {
                let value = serde_json::json!({
                    "verified": false,
                    "stage": failure.stage(),
                    "failure": failure.kind(),
                    "message": failure.to_string(),
                    "retryable": failure.is_retryable(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            Err(describe(failure))
        },
    }
}

fn describe(failure: VerificationFailure) -> anyhow::Error {
    let stage = failure.stage();
    anyhow::Error::new(failure).context(format!("{} check failed", stage))
}
