//! Build once, read many Merkle Sum Tree.
//!
//! Buckets live in an arena and point at each other through [`NodeId`]s. The
//! first `leaf_count` slots hold the leaf buckets in their input order,
//! every merge appends one slot, and the root is the last slot written.

mod build;

use std::fmt::Debug;

use log::debug;

use crate::{
    node::{Bucket, Hasher, Leaf},
    Proof, ProofStep, Side, TreeError,
};

/// Index of a bucket in the tree arena.
pub type NodeId = usize;

/// The bucket a node was merged with, and on which side of it that bucket sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sibling {
    /// The sibling preceded this node.
    Left(NodeId),
    /// The sibling followed this node.
    Right(NodeId),
}

impl Sibling {
    pub fn id(&self) -> NodeId {
        match self {
            Self::Left(id) | Self::Right(id) => *id,
        }
    }

    /// Side of the sibling relative to the node holding the link.
    pub fn side(&self) -> Side {
        match self {
            Self::Left(_) => Side::Left,
            Self::Right(_) => Side::Right,
        }
    }
}

struct Slot<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    bucket: Bucket<HASH_SIZE, H>,
    parent: Option<NodeId>,
    sibling: Option<Sibling>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Slot<HASH_SIZE, H> {
    fn new(bucket: Bucket<HASH_SIZE, H>) -> Self {
        Self {
            bucket,
            parent: None,
            sibling: None,
        }
    }
}

/// Merkle sum tree.
/// * `HASH_SIZE` - size of the hash digest in bytes.
/// * `H` - Hasher that will be used to hash buckets.
pub struct MerkleSumTree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    slots: Vec<Slot<HASH_SIZE, H>>,
    leaf_count: usize,
    root: NodeId,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> MerkleSumTree<HASH_SIZE, H> {
    /// Builds a tree from application leaves, converting each to its bucket.
    ///
    /// Leaves must be given in order and tile the tree space. This is not
    /// checked, see [`crate::check_contiguous`].
    pub fn from_leaves(leaves: &[Leaf<HASH_SIZE, H>]) -> Result<Self, TreeError> {
        Self::build(leaves.iter().map(Leaf::bucket).collect())
    }

    /// Root bucket of the tree.
    pub fn root(&self) -> &Bucket<HASH_SIZE, H> {
        &self.slots[self.root].bucket
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Number of buckets in the tree, leaves included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// A built tree always holds at least one bucket.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Bucket of the leaf at `index`. Leaf `index` is also its [`NodeId`].
    pub fn leaf(&self, index: usize) -> Option<&Bucket<HASH_SIZE, H>> {
        if index < self.leaf_count {
            self.bucket(index)
        } else {
            None
        }
    }

    /// Leaf buckets in their original order.
    pub fn leaves(&self) -> impl Iterator<Item = &Bucket<HASH_SIZE, H>> {
        self.slots[..self.leaf_count].iter().map(|slot| &slot.bucket)
    }

    pub fn bucket(&self, id: NodeId) -> Option<&Bucket<HASH_SIZE, H>> {
        self.slots.get(id).map(|slot| &slot.bucket)
    }

    /// The bucket `id` was merged into. `None` for the root, or for an unknown id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id).and_then(|slot| slot.parent)
    }

    /// The bucket `id` was merged with. `None` for the root, or for an unknown id.
    pub fn sibling(&self, id: NodeId) -> Option<Sibling> {
        self.slots.get(id).and_then(|slot| slot.sibling)
    }

    /// Inclusion (or exclusion, for an empty leaf) proof of the leaf at `index`.
    ///
    /// Walks the parent links up to the root and records the sibling met at
    /// each merge. A bucket carried over a round has no merge there and so
    /// adds no step.
    pub fn merkle_proof(&self, index: usize) -> Result<Proof<HASH_SIZE, H>, TreeError> {
        if index >= self.leaf_count {
            return Err(TreeError::IndexOutOfBounds {
                index,
                leaves: self.leaf_count,
            });
        }
        let mut steps = Vec::new();
        let mut current = index;
        while let Some(parent) = self.slots[current].parent {
            let Some(sibling) = self.slots[current].sibling else {
                unreachable!("Invalid tree. A merged bucket always has a sibling.");
            };
            steps.push(ProofStep::new(
                self.slots[sibling.id()].bucket.clone(),
                sibling.side(),
            ));
            current = parent;
        }
        debug!("extracted proof for leaf {index} with {} steps", steps.len());
        Ok(Proof::new(steps))
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Slot<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("bucket", &self.bucket)
            .field("parent", &self.parent)
            .field("sibling", &self.sibling)
            .finish()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for MerkleSumTree<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleSumTree")
            .field("slots", &self.slots)
            .field("leaf_count", &self.leaf_count)
            .field("root", &self.root)
            .finish()
    }
}
