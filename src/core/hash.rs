//! Hash utilities for dfts
//!
//! This is the digest provider: every digest in the system, for file contents
//! and for Merkle nodes alike, comes from one of these functions.

use crate::core::types::Digest;
use sha2::{Digest as _, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read buffer used when streaming files through the hasher
pub const READ_CHUNK_SIZE: usize = 8192;

/// Compute SHA-256 digest of data
pub fn sha256(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Digest::from_bytes(hasher.finalize().into())
}

/// Combine two digests into their parent node: SHA-256(left || right).
///
/// The operands are never swapped, so `hash_pair(a, b) != hash_pair(b, a)`
/// whenever `a != b`.
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Digest::from_bytes(hasher.finalize().into())
}

/// Compute SHA-256 digest of a file, reading it in fixed-size chunks
pub fn hash_file(path: &Path) -> io::Result<Digest> {
    let file = File::open(path)?;
    hash_reader(BufReader::new(file))
}

/// Compute SHA-256 digest of everything a reader yields
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; READ_CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Digest::from_bytes(hasher.finalize().into()))
}
