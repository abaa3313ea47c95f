//! Error types for the commitment core

use thiserror::Error;

/// Errors returned by leaf encoding and tree queries.
///
/// Every variant signals a caller mistake with the supplied input; retrying
/// the same call cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// Input failed validation before hashing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Root requested from a tree built with zero leaves.
    #[error("merkle tree has no leaves")]
    EmptyTree,

    /// Proof requested for a leaf index the tree does not contain.
    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },
}
