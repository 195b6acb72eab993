use log::{debug, trace};

use super::{MerkleSumTree, NodeId, Sibling, Slot};
use crate::{
    node::{Bucket, Hasher},
    TreeError,
};

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> MerkleSumTree<HASH_SIZE, H> {
    /// Builds the tree by folding adjacent buckets pairwise, round after round,
    /// until a single bucket is left.
    ///
    /// When a round has an odd number of buckets the last one is carried over
    /// to the next round untouched: no new bucket, no parent, no sibling. A
    /// single bucket is its own root.
    pub fn build(buckets: Vec<Bucket<HASH_SIZE, H>>) -> Result<Self, TreeError> {
        if buckets.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        let leaf_count = buckets.len();
        let mut slots: Vec<Slot<HASH_SIZE, H>> = buckets.into_iter().map(Slot::new).collect();
        // a tree of n leaves holds exactly n - 1 merged buckets
        slots.reserve(leaf_count - 1);

        let mut level: Vec<NodeId> = (0..leaf_count).collect();
        let mut round = 0;
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for pair in level.chunks(2) {
                match *pair {
                    [left, right] => next.push(merge(&mut slots, left, right)?),
                    [carried] => {
                        trace!("round {round}: carrying bucket {carried} over");
                        next.push(carried);
                    }
                    _ => unreachable!("chunks(2) yields one or two buckets"),
                }
            }
            trace!("round {round}: {} buckets folded into {}", level.len(), next.len());
            level = next;
            round += 1;
        }

        let root = level[0];
        debug!(
            "built tree of {leaf_count} leaves in {round} rounds, root size {}",
            slots[root].bucket.size()
        );
        Ok(Self {
            slots,
            leaf_count,
            root,
        })
    }
}

/// Merges two adjacent slots into a new one and links both to it.
fn merge<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    slots: &mut Vec<Slot<HASH_SIZE, H>>,
    left: NodeId,
    right: NodeId,
) -> Result<NodeId, TreeError> {
    let merged = Bucket::merge(&slots[left].bucket, &slots[right].bucket)?;
    let id = slots.len();
    slots.push(Slot::new(merged));

    slots[left].parent = Some(id);
    slots[left].sibling = Some(Sibling::Right(right));
    slots[right].parent = Some(id);
    slots[right].sibling = Some(Sibling::Left(left));
    Ok(id)
}
