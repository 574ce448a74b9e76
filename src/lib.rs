//! dfts - Timestamp files on Bitcoin
//!
//! dfts proves that a file existed, unmodified, no later than a given Bitcoin
//! transaction. Digests of many files are committed to a single Merkle root,
//! the root is placed in an `OP_RETURN` output by the user, and each file
//! keeps a small proof record that can be verified on its own.
//!
//! # Core Features
//!
//! - **Deterministic Merkle trees**: leaves are sorted before building, so the
//!   same set of digests always yields the same root
//! - **Self-contained proofs**: one JSON record per file, verifiable without
//!   the rest of the batch
//! - **Anchor checks**: the recorded transaction is fetched from a block
//!   explorer and searched for the root
//!
//! # Example Usage
//!
//! ```rust
//! use dfts::{sha256, MerkleTree};
//!
//! let leaves = vec![sha256(b"a"), sha256(b"b"), sha256(b"c")];
//! let tree = MerkleTree::from_hashes(&leaves);
//! let root = tree.root().unwrap();
//!
//! let proof = tree.generate_proof(&leaves[0])?;
//! assert!(MerkleTree::verify_proof(&leaves[0], &proof, &root));
//! # Ok::<(), dfts::DftsError>(())
//! ```

pub mod anchor;
pub mod batch;
pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;

// Re-export commonly used types
pub use crate::core::{
    error::{DftsError, Result},
    hash::{hash_file, hash_pair, sha256},
    types::{AnchorStatus, Digest, Network},
};

pub use proofs::{
    merkle::MerkleTree,
    proof::{PendingProof, ProofPosition, ProofRecord, ProofStep},
    ProofGenerator,
};

pub use anchor::{
    AnchorVerifier, EsploraClient, LedgerError, LedgerQuery, RootMatch, TransactionInfo,
    VerificationFailure, VerificationReport,
};

pub use batch::HashBatch;

/// Current version of dfts
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
