//! Merkle tree implementation
//!
//! Trees are built over the *sorted* leaf digests, so any two callers holding
//! the same multiset of digests derive the same root no matter what order
//! the digests were produced in. When a level has odd length its last node is
//! paired with itself.

use crate::core::{
    error::{DftsError, Result},
    hash::hash_pair,
    types::Digest,
};
use crate::proofs::proof::{ProofPosition, ProofStep};

/// Merkle tree for generating proofs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// All levels of the tree (sorted leaves at index 0, root level last)
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a merkle tree from a list of digests.
    ///
    /// Duplicates are kept. An empty input yields a tree without levels.
    pub fn from_hashes(hashes: &[Digest]) -> Self {
        let mut leaves = hashes.to_vec();
        leaves.sort_unstable();

        if leaves.is_empty() {
            return Self { levels: Vec::new() };
        }

        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Digest> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [last] => hash_pair(last, last),
                    _ => unreachable!("chunks(2) yields one or two elements"),
                })
                .collect();
            levels.push(next);
        }

        tracing::debug!(
            leaves = levels[0].len(),
            depth = levels.len(),
            "built merkle tree"
        );

        Self { levels }
    }

    /// Root digest, or `None` for an empty tree
    pub fn root(&self) -> Option<Digest> {
        self.levels.last().and_then(|level| level.first()).copied()
    }

    /// Sorted leaf digests
    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All levels, leaves first
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Number of levels including the leaf and root levels
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Generate an inclusion proof for `target`.
    ///
    /// When the digest occurs more than once the proof is for its first
    /// occurrence. The proof has `depth() - 1` steps.
    pub fn generate_proof(&self, target: &Digest) -> Result<Vec<ProofStep>> {
        let mut index = self
            .leaves()
            .binary_search(target)
            .map(|found| self.first_occurrence(found))
            .map_err(|_| DftsError::leaf_not_found(*target))?;

        let mut path = Vec::with_capacity(self.depth().saturating_sub(1));
        for level in &self.levels[..self.levels.len() - 1] {
            let step = if index % 2 == 1 {
                ProofStep::new(ProofPosition::Left, level[index - 1])
            } else {
                // The unpaired last node was combined with itself
                let sibling = level.get(index + 1).unwrap_or(&level[index]);
                ProofStep::new(ProofPosition::Right, *sibling)
            };
            path.push(step);
            index /= 2;
        }

        Ok(path)
    }

    /// Verify that `target` hashes up to `expected_root` along `proof`.
    ///
    /// Pure: only the proof itself is consulted.
    pub fn verify_proof(target: &Digest, proof: &[ProofStep], expected_root: &Digest) -> bool {
        Self::compute_root(target, proof) == *expected_root
    }

    /// Root implied by applying `proof` to `leaf`
    pub fn compute_root(leaf: &Digest, proof: &[ProofStep]) -> Digest {
        proof.iter().fold(*leaf, |current, step| match step.position {
            ProofPosition::Left => hash_pair(&step.hash, &current),
            ProofPosition::Right => hash_pair(&current, &step.hash),
        })
    }

    fn first_occurrence(&self, found: usize) -> usize {
        let leaves = self.leaves();
        let mut index = found;
        while index > 0 && leaves[index - 1] == leaves[found] {
            index -= 1;
        }
        index
    }
}
