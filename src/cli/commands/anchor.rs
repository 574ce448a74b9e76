//! Anchor command implementation
//!
//! dfts never builds transactions itself. This command tells the user what to
//! put in the OP_RETURN output and collects the resulting transaction id.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;

use crate::config::GlobalConfig;
use crate::core::types::Digest;
use crate::proofs::normalize_txid;

/// Execute the anchor command
pub fn execute(merkle_root: String, txid: Option<String>, quiet: bool) -> Result<()> {
    let root = Digest::from_hex(merkle_root.trim())
        .with_context(|| format!("'{}' is not a 64-character hex digest", merkle_root))?;
    let proofs_dir = GlobalConfig::load()?.output.proofs_dir;

    if !quiet {
        println!();
        println!("{}: {}", "Merkle Root".bold(), root.to_string().cyan());
        println!();
        println!("{}", "Instructions:".bold());
        println!("1. Open your wallet (for example Electrum on testnet).");
        println!("2. Create a new transaction with an OP_RETURN output.");
        println!("   Use this hex data: {}", root.to_string().cyan());
        println!("3. Broadcast it.");
    }

    let txid = match txid {
        Some(txid) => txid,
        None => Input::<String>::new()
            .with_prompt("\nPaste the transaction id (TXID) here")
            .allow_empty(true)
            .interact_text()?,
    };

    if txid.trim().is_empty() {
        if !quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    let txid = normalize_txid(&txid)?;
    if quiet {
        println!("{}", txid);
        return Ok(());
    }
    println!();
    println!("{} Anchoring recorded. TXID: {}", "✓".green(), txid);
    println!("Now run: dfts finalize {} {}", proofs_dir.display(), txid);

    Ok(())
}
