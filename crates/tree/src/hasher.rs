//! Keccak-256 hashing for leaves and internal nodes

use tiny_keccak::{Hasher, Keccak};

use crate::Digest;

/// Hash arbitrary bytes with keccak256.
pub fn keccak256(data: &[u8]) -> Digest {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Hash two 32-byte nodes in left-to-right order.
///
/// Concatenation order is part of the protocol: `hash_pair(a, b)` and
/// `hash_pair(b, a)` commit to different parents.
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Keccak::v256();
    hasher.update(left);
    hasher.update(right);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}
