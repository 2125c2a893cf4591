//! # Allow-List Trees
//!
//! Builds sorted-pair trees the way off-system allow-list tooling does, for
//! fixtures, the CLI, and operators preparing a root. The claim path only
//! ever verifies against a stored root.
//!
//! Leaves keep their list order (they are not sorted). Each level pairs
//! adjacent nodes with [`node_hash`]; a trailing odd node is carried up to
//! the next level unchanged, so its proof simply has no sibling for that
//! level.

use passgate_core::{Digest, DigestAlgorithm, Identity};

use crate::error::CryptoError;
use crate::leaf::AllowListFormat;
use crate::merkle::{node_hash, ProofPath};

/// A fully materialized sorted-pair tree.
#[derive(Debug, Clone)]
pub struct AllowListTree {
    algorithm: DigestAlgorithm,
    /// `layers[0]` holds the leaves; the last layer holds only the root.
    layers: Vec<Vec<Digest>>,
}

impl AllowListTree {
    /// Build a tree over precomputed leaf digests.
    pub fn from_leaves(algorithm: DigestAlgorithm, leaves: Vec<Digest>) -> Result<Self, CryptoError> {
        if leaves.is_empty() {
            return Err(CryptoError::EmptyTree);
        }
        let mut layers = vec![leaves];
        while let Some(level) = layers.last().filter(|l| l.len() > 1) {
            let next = level
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => node_hash(algorithm, &pair[0], right),
                    None => pair[0],
                })
                .collect();
            layers.push(next);
        }
        Ok(Self { algorithm, layers })
    }

    /// Build a tree over identities in list order. For indexed encodings
    /// each identity's index is its list position.
    pub fn from_identities(format: AllowListFormat, identities: &[Identity]) -> Result<Self, CryptoError> {
        let leaves = identities
            .iter()
            .enumerate()
            .map(|(i, id)| format.leaf_hash(id, Some(i as u64)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_leaves(format.algorithm, leaves)
    }

    /// The hash algorithm this tree was built with.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        // from_leaves guarantees a non-empty final layer
        self.layers
            .last()
            .and_then(|l| l.first())
            .copied()
            .unwrap_or(Digest::ZERO)
    }

    /// The leaves in list order.
    pub fn leaves(&self) -> &[Digest] {
        &self.layers[0]
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Position of the first leaf equal to `leaf`.
    pub fn position_of(&self, leaf: &Digest) -> Option<usize> {
        self.leaves().iter().position(|l| l == leaf)
    }

    /// Sibling path for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<ProofPath, CryptoError> {
        let len = self.leaves().len();
        if index >= len {
            return Err(CryptoError::LeafOutOfRange { index, len });
        }
        let mut siblings = Vec::with_capacity(self.depth());
        let mut i = index;
        for level in &self.layers[..self.layers.len() - 1] {
            let sibling = i ^ 1;
            if let Some(node) = level.get(sibling) {
                siblings.push(*node);
            }
            i /= 2;
        }
        Ok(ProofPath::new(siblings))
    }
}
