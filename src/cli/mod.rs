//! Command-line interface for dfts

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::Network;

pub mod commands;

/// dfts - timestamp files on Bitcoin
#[derive(Parser)]
#[command(
    name = "dfts",
    version,
    about = "Timestamp files on Bitcoin with Merkle proofs",
    long_about = "dfts hashes your files, commits them to a single Merkle root you anchor in a Bitcoin OP_RETURN output, and verifies each file later against its own proof."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress and status output; results and errors are still printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the SHA-256 digest of a file
    Hash {
        /// File to hash
        file: PathBuf,
    },

    /// Hash every file in a directory, recursively
    Batch {
        /// Directory to hash
        directory: PathBuf,

        /// Where to save the hashes
        #[arg(short, long, default_value = "hashes.json")]
        output: PathBuf,
    },

    /// Build the Merkle tree from a hash batch and write pending proofs
    Merkle {
        /// Hash batch produced by `dfts batch`
        hashes_file: PathBuf,

        /// Directory for pending proofs (default: output.proofs_dir from config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Only print the root
        #[arg(long)]
        no_save_proofs: bool,
    },

    /// Walk through anchoring a Merkle root in a transaction
    Anchor {
        /// Merkle root to anchor
        merkle_root: String,

        /// Transaction id, if already broadcast (skips the prompt)
        #[arg(long)]
        txid: Option<String>,
    },

    /// Turn pending proofs into final proofs for a transaction
    Finalize {
        /// Directory containing *.pending.json files
        proof_dir: PathBuf,

        /// Anchoring transaction id
        txid: String,

        /// Network the transaction was broadcast on (default: network.default from config)
        #[arg(long, env = "DFTS_NETWORK")]
        network: Option<Network>,

        /// Block height of the transaction, if already mined
        #[arg(long)]
        block_height: Option<u64>,
    },

    /// Check a file against its proof and the blockchain
    Verify {
        /// File to verify
        file_path: PathBuf,

        /// Proof file for it
        proof_path: PathBuf,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get and set configuration values
    Config {
        /// Configuration key (e.g. network.default)
        key: Option<String>,

        /// Value to set
        value: Option<String>,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,

        /// Reset the key to its default
        #[arg(long)]
        unset: bool,

        /// Show configuration file location
        #[arg(long)]
        show_origin: bool,
    },
}
