//! Ledger query contract

use crate::core::types::{AnchorStatus, Network};
use thiserror::Error;

/// What the verifier needs to know about a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Hex-encoded `scriptPubKey` of every output, in output order
    pub output_scripts: Vec<String>,
    /// Whether (and where) the transaction has been mined
    pub status: AnchorStatus,
}

/// Failure to obtain a transaction from the ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transaction not found")]
    NotFound,

    #[error("ledger returned HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("unexpected response: {reason}")]
    Decode { reason: String },
}

impl LedgerError {
    /// Whether asking again later could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LedgerError::Timeout | LedgerError::Transport { .. } => true,
            LedgerError::Status { status } => *status == 429 || *status >= 500,
            LedgerError::NotFound | LedgerError::Decode { .. } => false,
        }
    }
}

/// Source of transaction data for anchor checks.
///
/// Implementations may talk to a block explorer, a local node, or a fixture;
/// the verifier only relies on this contract.
pub trait LedgerQuery {
    fn fetch_transaction(
        &self,
        network: Network,
        txid: &str,
    ) -> std::result::Result<TransactionInfo, LedgerError>;
}

impl<T: LedgerQuery + ?Sized> LedgerQuery for &T {
    fn fetch_transaction(
        &self,
        network: Network,
        txid: &str,
    ) -> std::result::Result<TransactionInfo, LedgerError> {
        (**self).fetch_transaction(network, txid)
    }
}

impl<T: LedgerQuery + ?Sized> LedgerQuery for Box<T> {
    fn fetch_transaction(
        &self,
        network: Network,
        txid: &str,
    ) -> std::result::Result<TransactionInfo, LedgerError> {
        (**self).fetch_transaction(network, txid)
    }
}
