//! Binary Merkle tree construction and proof extraction

use crate::{
    hasher::hash_pair,
    proof::{MerkleProof, ProofStep, Side},
    Digest, MerkleError,
};

/// Binary Merkle tree over an ordered leaf sequence.
///
/// Levels are stored bottom-up: `levels[0]` holds the leaves and the last
/// level holds the single root. A tree built from zero leaves stays in an
/// explicit empty state where [`root`](Self::root) fails. Instances are
/// immutable once built; committing to a new leaf sequence means building a
/// new tree.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build the tree bottom-up from an ordered leaf sequence.
    ///
    /// Each level pairs nodes at positions (0,1), (2,3), and so on. A level
    /// of odd length pairs its last node with itself; carrying the node up
    /// unchanged would commit to a different root and is deliberately not
    /// done here.
    pub fn from_leaves(leaves: Vec<Digest>) -> Self {
        if leaves.is_empty() {
            return Self { levels: Vec::new() };
        }

        let mut levels = Vec::new();
        let mut current = leaves;
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                next.push(hash_pair(left, right));
            }
            levels.push(current);
            current = next;
        }
        levels.push(current);

        Self { levels }
    }

    /// Digest committing to the entire ordered leaf sequence.
    pub fn root(&self) -> Result<Digest, MerkleError> {
        match self.levels.last().and_then(|top| top.first()) {
            Some(root) => Ok(*root),
            None => Err(MerkleError::EmptyTree),
        }
    }

    /// Number of leaves the tree commits to.
    pub fn num_leaves(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of hashing levels between the leaves and the root. Zero for
    /// empty and single-leaf trees; equals the length of every proof.
    pub fn height(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// The ordered leaf sequence.
    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map_or(&[], Vec::as_slice)
    }

    /// All levels, leaves first, root last. Empty for the empty tree.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Inclusion proof for the leaf at `index`, sibling entries ordered
    /// leaf-to-root.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        let len = self.num_leaves();
        if index >= len {
            return Err(MerkleError::IndexOutOfRange { index, len });
        }

        let mut steps = Vec::with_capacity(self.height());
        let mut pos = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_pos = pos ^ 1;
            let (sibling, side) = if sibling_pos < level.len() {
                let side = if sibling_pos < pos { Side::Left } else { Side::Right };
                (level[sibling_pos], side)
            } else {
                // Unpaired node at the odd end of the level: its sibling is
                // itself, mirroring the build rule.
                (level[pos], Side::Right)
            };
            steps.push(ProofStep { sibling, side });
            pos /= 2;
        }

        Ok(MerkleProof { steps })
    }
}
