//! Proof records
//!
//! A [`PendingProof`] is written right after tree construction, when the root
//! and inclusion path are known but nothing has been anchored yet. Once the
//! user supplies the anchoring transaction it is turned into a
//! [`ProofRecord`], which is what verification reads.

use crate::core::{
    error::{DftsError, Result},
    types::{Digest, Network},
};
use bitcoin::Txid;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Version of the proof record format
pub const PROOF_FORMAT_VERSION: &str = "1.0";

/// Position of a sibling in a merkle proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofPosition {
    /// Sibling is the left operand; the carried hash goes on the right
    Left,
    /// Sibling is the right operand; the carried hash goes on the left
    Right,
}

impl ProofPosition {
    pub fn flipped(self) -> Self {
        match self {
            ProofPosition::Left => ProofPosition::Right,
            ProofPosition::Right => ProofPosition::Left,
        }
    }
}

/// A single element in a merkle proof path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Whether the sibling is on the left or right
    pub position: ProofPosition,
    /// Hash of the sibling node
    pub hash: Digest,
}

impl ProofStep {
    pub fn new(position: ProofPosition, hash: Digest) -> Self {
        Self { position, hash }
    }
}

/// Proof for a file whose root has not been anchored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingProof {
    pub file_hash: Digest,
    pub merkle_root: Digest,
    pub merkle_path: Vec<ProofStep>,
    /// Where the file lived when it was hashed; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path_hint: Option<String>,
}

impl PendingProof {
    /// Create a pending proof from a leaf, its root and its inclusion path
    pub fn new(file_hash: Digest, merkle_root: Digest, merkle_path: Vec<ProofStep>) -> Self {
        Self {
            file_hash,
            merkle_root,
            merkle_path,
            file_path_hint: None,
        }
    }

    /// Attach the operator-facing path hint
    pub fn with_path_hint(mut self, hint: impl Into<String>) -> Self {
        self.file_path_hint = Some(hint.into());
        self
    }

    /// Produce the final record for an anchoring transaction.
    ///
    /// `self` is left untouched.
    pub fn finalize(
        &self,
        network: Network,
        transaction_id: &str,
        block_height: Option<u64>,
    ) -> Result<ProofRecord> {
        let txid = normalize_txid(transaction_id)?;
        Ok(ProofRecord {
            version: PROOF_FORMAT_VERSION.to_string(),
            file_hash: self.file_hash,
            merkle_root: self.merkle_root,
            merkle_path: self.merkle_path.clone(),
            network,
            transaction_id: txid,
            block_height,
        })
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DftsError::JsonSerialization)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DftsError::malformed_record(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = read_record_file(path)?;
        Self::from_json(&content)
    }
}

/// Complete, anchored proof for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Version of the proof format
    pub version: String,
    /// Digest of the committed file
    pub file_hash: Digest,
    /// Root anchored in the transaction
    pub merkle_root: Digest,
    /// Inclusion path from the file digest to the root
    pub merkle_path: Vec<ProofStep>,
    /// Network the transaction lives on
    #[serde(rename = "bitcoin_network")]
    pub network: Network,
    /// Anchoring transaction id (hex)
    pub transaction_id: String,
    /// Block height, when known at finalization time
    #[serde(default)]
    pub block_height: Option<u64>,
}

impl ProofRecord {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DftsError::JsonSerialization)
    }

    /// Deserialize from JSON.
    ///
    /// Only the shape is checked here; whether the path actually leads to the
    /// root is a verification concern.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: ProofRecord =
            serde_json::from_str(json).map_err(|e| DftsError::malformed_record(e.to_string()))?;

        if record.version != PROOF_FORMAT_VERSION {
            return Err(DftsError::malformed_record(format!(
                "unsupported version {:?}, expected {:?}",
                record.version, PROOF_FORMAT_VERSION
            )));
        }
        if record.transaction_id.trim().is_empty() {
            return Err(DftsError::malformed_record("transaction_id is empty"));
        }

        Ok(record)
    }

    /// Save the record as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a record from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_record_file(path)?;
        Self::from_json(&content)
    }
}

fn read_record_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DftsError::file_not_found(path.to_path_buf()),
        _ => DftsError::Io(e),
    })
}

/// Check that `txid` is a 32-byte Bitcoin transaction id and return it in
/// lowercase hex.
pub fn normalize_txid(txid: &str) -> Result<String> {
    let trimmed = txid.trim();
    Txid::from_str(trimmed)
        .map(|parsed| parsed.to_string())
        .map_err(|e| DftsError::invalid_transaction_id(trimmed, e))
}
