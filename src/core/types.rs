//! Core data types for dfts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a SHA-256 digest in bytes
pub const DIGEST_LEN: usize = 32;

/// 32-byte SHA-256 digest, rendered as 64 lowercase hex characters.
///
/// Ordering is byte-wise, which is the same as lexicographic ordering of the
/// lowercase hex rendering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Create a Digest from a 32-byte array
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Create a Digest from a hex string (either case)
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut array = [0u8; DIGEST_LEN];
        hex::decode_to_slice(hex, &mut array)?;
        Ok(Digest(array))
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create a zero digest (for testing and special cases)
    pub fn zero() -> Self {
        Digest([0u8; DIGEST_LEN])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &hex::encode(self.0)[..8])
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_hex(s)
    }
}

// Digests travel as hex strings in every persisted format
impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Digest::from_hex(&hex_string).map_err(|e| {
            serde::de::Error::custom(format!("invalid digest {:?}: {}", hex_string, e))
        })
    }
}

/// Bitcoin network a root was anchored on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Signet,
}

impl Network {
    /// All supported networks
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Signet];

    /// Name used in proof files and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            other => Err(format!(
                "unknown network '{}' (expected mainnet, testnet or signet)",
                other
            )),
        }
    }
}

/// Confirmation state of an anchoring transaction as reported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AnchorStatus {
    /// Mined at the given block height
    Confirmed { block_height: u64 },
    /// Still waiting in the mempool
    Unconfirmed,
}

impl AnchorStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, AnchorStatus::Confirmed { .. })
    }

    pub fn block_height(&self) -> Option<u64> {
        match self {
            AnchorStatus::Confirmed { block_height } => Some(*block_height),
            AnchorStatus::Unconfirmed => None,
        }
    }
}

impl fmt::Display for AnchorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorStatus::Confirmed { block_height } => {
                write!(f, "Confirmed at block {}", block_height)
            },
            AnchorStatus::Unconfirmed => f.write_str("Unconfirmed (in mempool)"),
        }
    }
}
