//! Hash batches
//!
//! A hash batch maps file paths to their digests. It is written by the
//! directory hasher and read back when the Merkle tree is built. On disk it is
//! a single JSON object of `path -> hex digest`.

pub mod hasher;
pub mod scanner;

pub use hasher::{hash_directory, BatchOutcome};
pub use scanner::{scan_files, ScanResult};

use crate::core::{
    error::{DftsError, Result},
    types::Digest,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File path to digest mapping, ordered by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashBatch {
    entries: BTreeMap<String, Digest>,
}

impl HashBatch {
    pub fn insert(&mut self, path: impl Into<String>, digest: Digest) {
        self.entries.insert(path.into(), digest);
    }

    pub fn get(&self, path: &str) -> Option<&Digest> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Digest)> {
        self.entries.iter()
    }

    /// Every digest in the batch, duplicates included
    pub fn digests(&self) -> Vec<Digest> {
        self.entries.values().copied().collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DftsError::JsonSerialization)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            DftsError::invalid_batch(format!(
                "expected a JSON object mapping file paths to hex digests ({})",
                e
            ))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DftsError::file_not_found(path.to_path_buf()),
            _ => DftsError::Io(e),
        })?;
        Self::from_json(&content)
    }
}

impl FromIterator<(String, Digest)> for HashBatch {
    fn from_iter<I: IntoIterator<Item = (String, Digest)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
