//! Three-stage verification of a file against its proof record
//!
//! 1. integrity: the freshly computed digest equals the recorded one
//! 2. membership: the inclusion path leads from that digest to the root
//! 3. anchor: the recorded transaction carries the root in an output
//!
//! Stages run in order and the first failure ends verification.

use crate::anchor::ledger::{LedgerError, LedgerQuery, TransactionInfo};
use crate::core::types::{AnchorStatus, Digest, Network};
use crate::proofs::{merkle::MerkleTree, proof::ProofRecord};
use bitcoin::opcodes::all::OP_RETURN;
use bitcoin::script::Instruction;
use bitcoin::ScriptBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How an output script is searched for the merkle root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootMatch {
    /// Root hex appears anywhere in the script hex
    #[default]
    Substring,
    /// Script is an `OP_RETURN` output and one of its pushes is exactly the root
    OpReturn,
}

impl RootMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootMatch::Substring => "substring",
            RootMatch::OpReturn => "op_return",
        }
    }

    /// Whether `script_hex` carries `root` under this policy
    pub fn matches(&self, script_hex: &str, root: &Digest) -> bool {
        match self {
            RootMatch::Substring => script_hex.to_ascii_lowercase().contains(&root.to_hex()),
            RootMatch::OpReturn => op_return_pushes_root(script_hex, root),
        }
    }
}

impl std::str::FromStr for RootMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "substring" => Ok(RootMatch::Substring),
            "op_return" | "op-return" => Ok(RootMatch::OpReturn),
            other => Err(format!(
                "unknown root match policy '{}' (expected substring or op_return)",
                other
            )),
        }
    }
}

fn op_return_pushes_root(script_hex: &str, root: &Digest) -> bool {
    let Ok(script) = ScriptBuf::from_hex(script_hex) else {
        return false;
    };

    let mut instructions = script.instructions();
    match instructions.next() {
        Some(Ok(Instruction::Op(op))) if op == OP_RETURN => {},
        _ => return false,
    }

    instructions.any(|instruction| match instruction {
        Ok(Instruction::PushBytes(data)) => data.as_bytes() == root.as_bytes().as_slice(),
        _ => false,
    })
}

/// Verification stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStage {
    Integrity,
    Membership,
    Anchor,
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerificationStage::Integrity => "file integrity",
            VerificationStage::Membership => "merkle proof",
            VerificationStage::Anchor => "blockchain anchor",
        })
    }
}

/// Why a file did not verify
#[derive(Error, Debug)]
pub enum VerificationFailure {
    #[error("File hash doesn't match.\nExpected: {expected}\nActual:   {actual}")]
    IntegrityMismatch { expected: Digest, actual: Digest },

    #[error("Merkle proof is invalid. Path leads to {computed}, record claims {expected}")]
    InvalidMerkleProof { computed: Digest, expected: Digest },

    #[error("Can't find transaction {txid} on {network}: {source}")]
    TransactionNotFound {
        txid: String,
        network: Network,
        source: LedgerError,
    },

    #[error("Couldn't find the Merkle root {root} in transaction {txid}")]
    RootNotAnchored { txid: String, root: Digest },
}

impl VerificationFailure {
    /// Stage that produced this failure
    pub fn stage(&self) -> VerificationStage {
        match self {
            VerificationFailure::IntegrityMismatch { .. } => VerificationStage::Integrity,
            VerificationFailure::InvalidMerkleProof { .. } => VerificationStage::Membership,
            VerificationFailure::TransactionNotFound { .. }
            | VerificationFailure::RootNotAnchored { .. } => VerificationStage::Anchor,
        }
    }

    /// Short machine-readable name
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationFailure::IntegrityMismatch { .. } => "integrity_mismatch",
            VerificationFailure::InvalidMerkleProof { .. } => "invalid_merkle_proof",
            VerificationFailure::TransactionNotFound { .. } => "transaction_not_found",
            VerificationFailure::RootNotAnchored { .. } => "root_not_anchored",
        }
    }

    /// Whether running verification again later could change the outcome
    pub fn is_retryable(&self) -> bool {
        match self {
            VerificationFailure::TransactionNotFound { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

/// Successful verification outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub file_hash: Digest,
    pub merkle_root: Digest,
    pub network: Network,
    pub transaction_id: String,
    /// Index of the first output carrying the root
    pub output_index: usize,
    pub status: AnchorStatus,
}

/// Verifies files against proof records using a ledger collaborator
pub struct AnchorVerifier<L> {
    ledger: L,
    root_match: RootMatch,
}

impl<L: LedgerQuery> AnchorVerifier<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            root_match: RootMatch::default(),
        }
    }

    pub fn with_root_match(mut self, root_match: RootMatch) -> Self {
        self.root_match = root_match;
        self
    }

    /// Run all three stages, stopping at the first failure
    pub fn verify_file(
        &self,
        file_digest: &Digest,
        record: &ProofRecord,
    ) -> Result<VerificationReport, VerificationFailure> {
        check_integrity(file_digest, record)?;
        check_membership(file_digest, record)?;
        self.check_anchor(record)
    }

    /// Stage 3: look the transaction up and search its outputs for the root
    pub fn check_anchor(
        &self,
        record: &ProofRecord,
    ) -> Result<VerificationReport, VerificationFailure> {
        let tx = self
            .ledger
            .fetch_transaction(record.network, &record.transaction_id)
            .map_err(|source| {
                tracing::debug!(txid = %record.transaction_id, error = %source, "ledger query failed");
                VerificationFailure::TransactionNotFound {
                    txid: record.transaction_id.clone(),
                    network: record.network,
                    source,
                }
            })?;

        let output_index = find_root_output(&tx, &record.merkle_root, self.root_match).ok_or_else(
            || VerificationFailure::RootNotAnchored {
                txid: record.transaction_id.clone(),
                root: record.merkle_root,
            },
        )?;

        Ok(VerificationReport {
            file_hash: record.file_hash,
            merkle_root: record.merkle_root,
            network: record.network,
            transaction_id: record.transaction_id.clone(),
            output_index,
            status: tx.status,
        })
    }
}

/// Stage 1: the caller's fresh digest must equal the recorded one
pub fn check_integrity(file_digest: &Digest, record: &ProofRecord) -> Result<(), VerificationFailure> {
    if *file_digest == record.file_hash {
        Ok(())
    } else {
        Err(VerificationFailure::IntegrityMismatch {
            expected: record.file_hash,
            actual: *file_digest,
        })
    }
}

/// Stage 2: the inclusion path must lead from the digest to the recorded root
pub fn check_membership(
    file_digest: &Digest,
    record: &ProofRecord,
) -> Result<(), VerificationFailure> {
    let computed = MerkleTree::compute_root(file_digest, &record.merkle_path);
    if computed == record.merkle_root {
        Ok(())
    } else {
        Err(VerificationFailure::InvalidMerkleProof {
            computed,
            expected: record.merkle_root,
        })
    }
}

/// Index of the first output whose script carries `root`
pub fn find_root_output(tx: &TransactionInfo, root: &Digest, root_match: RootMatch) -> Option<usize> {
    tx.output_scripts
        .iter()
        .position(|script| root_match.matches(script, root))
}

/// Verify with the default (substring) root matching
pub fn verify_file<L: LedgerQuery>(
    file_digest: &Digest,
    record: &ProofRecord,
    ledger: L,
) -> Result<VerificationReport, VerificationFailure> {
    AnchorVerifier::new(ledger).verify_file(file_digest, record)
}
