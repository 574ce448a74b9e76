//! Ledger anchor checks
//!
//! The verifier never builds or broadcasts transactions. It reads back what a
//! ledger collaborator reports about the anchoring transaction.

pub mod esplora;
pub mod ledger;
pub mod verifier;

pub use esplora::EsploraClient;
pub use ledger::{LedgerError, LedgerQuery, TransactionInfo};
pub use verifier::{
    check_integrity, check_membership, find_root_output, verify_file, AnchorVerifier, RootMatch,
    VerificationFailure, VerificationReport, VerificationStage,
};
