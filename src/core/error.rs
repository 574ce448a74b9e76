//! Error types for dfts

use crate::core::types::Digest;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dfts operations
#[derive(Error, Debug)]
pub enum DftsError {
    /// File-related errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Digest-related errors
    #[error("Invalid digest '{value}': {reason}")]
    InvalidDigest { value: String, reason: String },

    /// Merkle tree errors
    #[error("Digest not found among tree leaves: {digest}")]
    LeafNotFound { digest: Digest },

    #[error("Cannot build a Merkle tree from an empty batch")]
    EmptyBatch,

    /// Proof record errors
    #[error("Malformed proof record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Invalid transaction id '{txid}': {reason}")]
    InvalidTransactionId { txid: String, reason: String },

    /// Hash batch errors
    #[error("Invalid hash batch: {reason}")]
    InvalidBatch { reason: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Network errors
    #[error("Network error: {reason}")]
    NetworkError { reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Hex encoding/decoding errors
    #[error("Hex encoding error: {0}")]
    HexError(#[from] hex::FromHexError),
}

impl DftsError {
    /// Create a new file not found error
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a new invalid digest error
    pub fn invalid_digest(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidDigest {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new leaf not found error
    pub fn leaf_not_found(digest: Digest) -> Self {
        Self::LeafNotFound { digest }
    }

    /// Create a new malformed record error
    pub fn malformed_record(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Create a new invalid transaction id error
    pub fn invalid_transaction_id(txid: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidTransactionId {
            txid: txid.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new invalid batch error
    pub fn invalid_batch(reason: impl Into<String>) -> Self {
        Self::InvalidBatch {
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for dfts operations
pub type Result<T> = std::result::Result<T, DftsError>;
