//! Pending proof generation for a whole batch

use crate::batch::HashBatch;
use crate::core::{
    error::{DftsError, Result},
    types::Digest,
};
use crate::proofs::{merkle::MerkleTree, proof::PendingProof};

/// Proof generator for creating pending proofs from a built tree
pub struct ProofGenerator {
    tree: MerkleTree,
    root: Digest,
}

impl ProofGenerator {
    /// Build the tree for `batch`. Fails on an empty batch, which has no root.
    pub fn from_batch(batch: &HashBatch) -> Result<Self> {
        Self::from_tree(MerkleTree::from_hashes(&batch.digests()))
    }

    pub fn from_tree(tree: MerkleTree) -> Result<Self> {
        let root = tree.root().ok_or(DftsError::EmptyBatch)?;
        Ok(Self { tree, root })
    }

    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Generate the pending proof for one leaf
    pub fn prove(&self, file_hash: &Digest) -> Result<PendingProof> {
        let path = self.tree.generate_proof(file_hash)?;
        Ok(PendingProof::new(*file_hash, self.root, path))
    }

    /// One pending proof per batch entry, keyed by the entry's path
    pub fn prove_batch(&self, batch: &HashBatch) -> Result<Vec<(String, PendingProof)>> {
        batch
            .iter()
            .map(|(path, digest)| -> Result<(String, PendingProof)> {
                let proof = self.prove(digest)?.with_path_hint(path.clone());
                Ok((path.clone(), proof))
            })
            .collect()
    }
}
