//! Inclusion proofs and root recomputation

use serde::{Deserialize, Serialize};

use crate::{hasher::hash_pair, Digest};

/// Which side of the hash input the sibling digest occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Sibling is hashed before the running digest.
    Left,
    /// Sibling is hashed after the running digest. Also used when a node at
    /// the odd end of a level was paired with itself.
    Right,
}

/// One level of an inclusion proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Sibling digest at this level.
    pub sibling: Digest,
    /// Side the sibling occupied in the parent hash.
    pub side: Side,
}

/// Inclusion proof: sibling entries ordered from the leaf level up to the
/// level below the root. Its length equals the tree height, so a single-leaf
/// tree yields an empty proof.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Sibling entries, leaf-to-root.
    pub steps: Vec<ProofStep>,
}

impl MerkleProof {
    /// Number of levels the proof spans.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the single-leaf proof.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold the proof over `leaf`, producing the root it commits to.
    pub fn compute_root(&self, leaf: &Digest) -> Digest {
        let mut current = *leaf;
        for step in &self.steps {
            current = match step.side {
                Side::Left => hash_pair(&step.sibling, &current),
                Side::Right => hash_pair(&current, &step.sibling),
            };
        }
        current
    }

    /// Check the proof against a claimed root.
    pub fn verify(&self, leaf: &Digest, root: &Digest) -> bool {
        self.compute_root(leaf) == *root
    }
}

/// Verify an inclusion proof from nothing but the leaf, the proof, and the
/// claimed root. No live tree required; this is the verifier side of the
/// protocol.
pub fn verify_proof(leaf: &Digest, proof: &MerkleProof, root: &Digest) -> bool {
    proof.verify(leaf, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hasher::keccak256, MerkleTree};

    fn sample_tree() -> (Vec<Digest>, MerkleTree) {
        let leaves: Vec<Digest> = (0u8..5).map(|i| keccak256(&[i])).collect();
        let tree = MerkleTree::from_leaves(leaves.clone());
        (leaves, tree)
    }

    #[test]
    fn empty_proof_binds_leaf_to_itself() {
        let x = keccak256(b"x");
        let y = keccak256(b"y");
        assert!(verify_proof(&x, &MerkleProof::default(), &x));
        assert!(!verify_proof(&x, &MerkleProof::default(), &y));
    }

    #[test]
    fn tampered_leaf_fails() {
        let (leaves, tree) = sample_tree();
        let root = tree.root().unwrap();
        let proof = tree.proof(1).unwrap();

        let mut leaf = leaves[1];
        leaf[0] ^= 0x01;
        assert!(!verify_proof(&leaf, &proof, &root));
    }

    #[test]
    fn tampered_sibling_fails() {
        let (leaves, tree) = sample_tree();
        let root = tree.root().unwrap();

        let mut proof = tree.proof(1).unwrap();
        proof.steps[1].sibling[31] ^= 0x01;
        assert!(!verify_proof(&leaves[1], &proof, &root));
    }

    #[test]
    fn flipped_side_fails() {
        let (leaves, tree) = sample_tree();
        let root = tree.root().unwrap();

        // Index 1 sits next to a distinct sibling at every level, so the
        // side flag is load-bearing for each step.
        let mut proof = tree.proof(1).unwrap();
        proof.steps[0].side = match proof.steps[0].side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        assert!(!verify_proof(&leaves[1], &proof, &root));
    }

    #[test]
    fn tampered_root_fails() {
        let (leaves, tree) = sample_tree();
        let proof = tree.proof(0).unwrap();

        let mut root = tree.root().unwrap();
        root[16] ^= 0x01;
        assert!(!verify_proof(&leaves[0], &proof, &root));
    }

    #[test]
    fn proof_survives_json_transport() {
        let (leaves, tree) = sample_tree();
        let root = tree.root().unwrap();
        let proof = tree.proof(3).unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        let decoded: MerkleProof = serde_json::from_str(&json).unwrap();
        assert!(verify_proof(&leaves[3], &decoded, &root));
    }
}
