//! Merkle proof system for dfts
//!
//! This module builds the commitment tree over a batch of file digests and
//! produces the per-file proof records that are later verified on their own.

pub mod generator;
pub mod merkle;
pub mod proof;

// Re-export commonly used items
pub use generator::ProofGenerator;
pub use merkle::MerkleTree;
pub use proof::{
    normalize_txid, PendingProof, ProofPosition, ProofRecord, ProofStep, PROOF_FORMAT_VERSION,
};
