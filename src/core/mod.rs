//! Core types and utilities for dfts
//!
//! This module contains the fundamental data types, error handling,
//! and the digest provider used throughout the system.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{DftsError, Result};
pub use hash::{hash_file, hash_pair, sha256};
pub use types::{AnchorStatus, Digest, Network};
