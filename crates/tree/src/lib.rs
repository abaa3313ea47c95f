//! Binary Merkle commitment over (address, balance) records
//!
//! This crate is the commitment core, with no knowledge of RPC endpoints or
//! contract ABIs:
//! - Leaf encoding: keccak256 of the raw 20-byte address followed by the
//!   balance as a 32-byte big-endian integer
//! - Tree construction: pairwise keccak256, bottom-up, with the
//!   duplicate-last-odd-node rule
//! - Inclusion proofs: sibling digest + side flag per level, verifiable by a
//!   party holding only the leaf, the proof, and the root

mod error;
mod hasher;
mod leaf;
mod proof;
mod tree;

pub use error::MerkleError;
pub use hasher::{hash_pair, keccak256};
pub use leaf::{encode_leaf, parse_address, ADDRESS_LEN, BALANCE_LEN};
pub use proof::{verify_proof, MerkleProof, ProofStep, Side};
pub use tree::MerkleTree;

/// 32-byte node digest
pub type Digest = [u8; 32];

/// Render a digest as lowercase hex, no prefix.
pub fn to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn commit_and_prove_holder_balances() {
        let records = [
            ([0x11u8; 20], 1_000u64),
            ([0x22u8; 20], 0),
            ([0x33u8; 20], 5),
        ];

        let leaves: Vec<Digest> = records
            .iter()
            .map(|(address, balance)| encode_leaf(address, U256::from(*balance)).unwrap())
            .collect();

        let tree = MerkleTree::from_leaves(leaves.clone());
        let root = tree.root().unwrap();

        for (i, leaf) in leaves.iter().enumerate() {
            let proof = tree.proof(i).unwrap();
            assert!(verify_proof(leaf, &proof, &root));
        }

        // A record with a different balance must not verify under the same proof.
        let forged = encode_leaf(&records[0].0, U256::from(2_000u64)).unwrap();
        assert!(!verify_proof(&forged, &tree.proof(0).unwrap(), &root));
    }
}
