//! dfts CLI
//!
//! Command-line interface for timestamping files on Bitcoin.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use dfts::cli::{self, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Hash { file } => cli::commands::hash::execute(file),
        Commands::Batch { directory, output } => {
            cli::commands::batch::execute(directory, output, cli.quiet)
        },
        Commands::Merkle {
            hashes_file,
            output_dir,
            no_save_proofs,
        } => cli::commands::merkle::execute(hashes_file, output_dir, no_save_proofs, cli.quiet),
        Commands::Anchor { merkle_root, txid } => {
            cli::commands::anchor::execute(merkle_root, txid, cli.quiet)
        },
        Commands::Finalize {
            proof_dir,
            txid,
            network,
            block_height,
        } => cli::commands::finalize::execute(proof_dir, txid, network, block_height, cli.quiet),
        Commands::Verify {
            file_path,
            proof_path,
            json,
        } => cli::commands::verify::execute(file_path, proof_path, json, cli.quiet),
        Commands::Config {
            key,
            value,
            list,
            unset,
            show_origin,
        } => cli::commands::config::execute(key, value, list, unset, show_origin),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Fail:".red().bold(), e);
            ExitCode::FAILURE
        },
    }
}
