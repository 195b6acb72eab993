//! Proof verification.
//!
//! Pure functions, no tree required. Two independent checks: the range the
//! proof's sizes route to must be the expected one, and replaying the merges
//! from the claimed bucket must land on the root.

use std::ops::Range;

use log::debug;
use thiserror::Error;

use super::{Proof, Side};
use crate::{
    node::{Bucket, Hasher, Size},
    TreeError,
};

/// Why a proof was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The sibling sizes route to another range than the claimed one
    #[error("proof routes to {computed:?}, expected {expected:?}")]
    RangeMismatch {
        expected: Range<Size>,
        computed: Range<Size>,
    },
    /// The sibling sizes don't fit under the root size
    #[error("proof sizes do not fit under the root size")]
    UnroutableRange,
    /// The replayed size differs from the root size
    #[error("rebuilt size {computed} does not match root size {expected}")]
    SizeMismatch { expected: Size, computed: Size },
    /// The replayed commitment differs from the root commitment
    #[error("rebuilt commitment does not match the root commitment")]
    CommitmentMismatch,
    /// A bucket met during the replay could not be merged
    #[error(transparent)]
    Malformed(#[from] TreeError),
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Proof<HASH_SIZE, H> {
    /// Reconstructs the range the proof routes to under a root of `root_size`.
    ///
    /// Left siblings precede the claim and add up to the range start. Right
    /// siblings follow it and are taken off the total to get the range end.
    /// Returns `None` if the sizes don't fit.
    pub fn range(&self, root_size: Size) -> Option<Range<Size>> {
        let mut start: Size = 0;
        let mut after: Size = 0;
        for step in &self.steps {
            match step.side {
                Side::Left => start = start.checked_add(step.bucket.size())?,
                Side::Right => after = after.checked_add(step.bucket.size())?,
            }
        }
        Some(start..root_size.checked_sub(after)?)
    }

    /// Replays the merges from `claim` up to the root and returns the
    /// rebuilt root bucket.
    pub fn root(&self, claim: &Bucket<HASH_SIZE, H>) -> Result<Bucket<HASH_SIZE, H>, Rejection> {
        let mut current = claim.clone();
        for step in &self.steps {
            current = match step.side {
                Side::Right => Bucket::merge(&current, &step.bucket)?,
                Side::Left => Bucket::merge(&step.bucket, &current)?,
            };
        }
        Ok(current)
    }

    /// Verifies that `claim` sits at `expected` under `root`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if both the range and the replayed root match,
    /// otherwise returns the first reason the proof was rejected.
    pub fn verify(
        &self,
        root: &Bucket<HASH_SIZE, H>,
        claim: &Bucket<HASH_SIZE, H>,
        expected: &Range<Size>,
    ) -> Result<(), Rejection> {
        self.check(root, claim, expected).inspect_err(|rejection| {
            debug!(
                "rejected proof of {} steps for {expected:?}: {rejection}",
                self.len()
            )
        })
    }

    fn check(
        &self,
        root: &Bucket<HASH_SIZE, H>,
        claim: &Bucket<HASH_SIZE, H>,
        expected: &Range<Size>,
    ) -> Result<(), Rejection> {
        let computed = self
            .range(root.size())
            .ok_or(Rejection::UnroutableRange)?;
        if computed != *expected {
            return Err(Rejection::RangeMismatch {
                expected: expected.clone(),
                computed,
            });
        }

        let rebuilt = self.root(claim)?;
        if rebuilt.size() != root.size() {
            return Err(Rejection::SizeMismatch {
                expected: root.size(),
                computed: rebuilt.size(),
            });
        }
        if rebuilt.commitment() != root.commitment() {
            return Err(Rejection::CommitmentMismatch);
        }
        Ok(())
    }
}

/// Verify a merkle sum proof for a claimed bucket and range.
///
/// # Arguments
///
/// * `root` - The root bucket of the tree
/// * `claim` - The bucket the proof is for
/// * `expected` - The range the bucket is claimed to cover
/// * `proof` - The proof to verify
///
/// # Returns
///
/// Returns `true` if the proof is valid.
pub fn verify_proof<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    root: &Bucket<HASH_SIZE, H>,
    claim: &Bucket<HASH_SIZE, H>,
    expected: &Range<Size>,
    proof: &Proof<HASH_SIZE, H>,
) -> bool {
    proof.verify(root, claim, expected).is_ok()
}

#[cfg(test)]
mod test {
    use sha2::Sha256;

    use super::{verify_proof, Rejection};
    use crate::{Bucket, MerkleSumTree, Proof, ProofStep, Side, TreeError};

    fn leaves() -> Vec<Bucket<32, Sha256>> {
        vec![
            Bucket::leaf(4, Some(b"a".as_slice())),
            Bucket::leaf(6, Some(b"b".as_slice())),
            Bucket::leaf(5, Some(b"c".as_slice())),
        ]
    }

    fn flip(proof: &Proof<32, Sha256>, index: usize) -> Proof<32, Sha256> {
        let mut steps = proof.clone().into_steps();
        let side = match steps[index].side() {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        steps[index] = ProofStep::new(steps[index].bucket().clone(), side);
        Proof::new(steps)
    }

    #[test]
    fn test_range_reconstruction() {
        let tree = MerkleSumTree::build(leaves()).unwrap();
        let root_size = tree.root().size();
        assert_eq!(tree.merkle_proof(0).unwrap().range(root_size), Some(0..4));
        assert_eq!(tree.merkle_proof(1).unwrap().range(root_size), Some(4..10));
        assert_eq!(tree.merkle_proof(2).unwrap().range(root_size), Some(10..15));
    }

    #[test]
    fn test_range_that_does_not_fit() {
        let proof = Proof::<32, Sha256>::new(vec![ProofStep::new(Bucket::empty(20), Side::Right)]);
        assert_eq!(proof.range(10), None);
        assert_eq!(
            proof
                .verify(&Bucket::empty(10), &Bucket::empty(0), &(0..0))
                .unwrap_err(),
            Rejection::UnroutableRange
        );
    }

    #[test]
    fn test_verify_every_leaf() {
        let leaves = leaves();
        let tree = MerkleSumTree::build(leaves.clone()).unwrap();
        let ranges = [0..4, 4..10, 10..15];
        for (index, range) in ranges.iter().enumerate() {
            let proof = tree.merkle_proof(index).unwrap();
            assert!(verify_proof(tree.root(), &leaves[index], range, &proof));
            assert_eq!(proof.root(&leaves[index]).unwrap(), *tree.root());
        }
    }

    #[test]
    fn test_correct_proof_wrong_range() {
        let leaves = leaves();
        let tree = MerkleSumTree::build(leaves.clone()).unwrap();
        let proof = tree.merkle_proof(1).unwrap();
        // the replay alone succeeds
        assert_eq!(proof.root(&leaves[1]).unwrap(), *tree.root());
        assert_eq!(
            proof.verify(tree.root(), &leaves[1], &(4..11)).unwrap_err(),
            Rejection::RangeMismatch {
                expected: 4..11,
                computed: 4..10
            }
        );
    }

    #[test]
    fn test_wrong_claim_commitment() {
        let leaves = leaves();
        let tree = MerkleSumTree::build(leaves.clone()).unwrap();
        let proof = tree.merkle_proof(1).unwrap();
        let forged = Bucket::leaf(6, Some(b"forged".as_slice()));
        assert_eq!(
            proof.verify(tree.root(), &forged, &(4..10)).unwrap_err(),
            Rejection::CommitmentMismatch
        );
    }

    #[test]
    fn test_wrong_claim_size() {
        let leaves = leaves();
        let tree = MerkleSumTree::build(leaves.clone()).unwrap();
        let proof = tree.merkle_proof(1).unwrap();
        let resized = Bucket::new(7, *leaves[1].commitment());
        assert_eq!(
            proof.verify(tree.root(), &resized, &(4..10)).unwrap_err(),
            Rejection::SizeMismatch {
                expected: 15,
                computed: 16
            }
        );
    }

    #[test]
    fn test_flipped_side() {
        let leaves = leaves();
        let tree = MerkleSumTree::build(leaves.clone()).unwrap();
        let proof = tree.merkle_proof(2).unwrap();
        let flipped = flip(&proof, 0);
        assert!(matches!(
            flipped.verify(tree.root(), &leaves[2], &(10..15)),
            Err(Rejection::RangeMismatch { .. })
        ));
        // merge order is part of the commitment
        assert_ne!(flipped.root(&leaves[2]).unwrap(), *tree.root());
    }

    #[test]
    fn test_unencodable_size_during_replay() {
        let proof = Proof::<32, Sha256>::new(vec![ProofStep::new(Bucket::empty(1), Side::Left)]);
        let claim = Bucket::<32, Sha256>::empty(1 << 64);
        assert_eq!(
            proof.root(&claim).unwrap_err(),
            Rejection::Malformed(TreeError::SizeNotEncodable(1 << 64))
        );
    }

    #[test]
    fn test_empty_proof() {
        let claim = Bucket::<32, Sha256>::leaf(100, Some(b"only".as_slice()));
        let proof = Proof::new(vec![]);
        assert!(verify_proof(&claim, &claim, &(0..100), &proof));
        assert!(!verify_proof(&claim, &claim, &(0..99), &proof));
        assert!(!verify_proof(
            &claim,
            &Bucket::leaf(100, Some(b"other".as_slice())),
            &(0..100),
            &proof
        ));
    }
}
