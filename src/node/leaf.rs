use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::ops::Range;

use super::{Bucket, Hasher, Size};
use crate::{Proof, TreeError};

/// An application level leaf: a sub range of the tree space and what it holds.
///
/// A leaf without payload marks its range as unallocated. Its bucket commits to
/// all zeroes, which is what makes exclusion proofs possible.
pub struct Leaf<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    range: Range<Size>,
    payload: Option<Vec<u8>>,
    _phantom: PhantomData<H>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Leaf<HASH_SIZE, H> {
    /// Creates a new [`Leaf`]. Fails if the range ends before it starts.
    pub fn new(range: Range<Size>, payload: Option<Vec<u8>>) -> Result<Self, TreeError> {
        if range.end < range.start {
            return Err(TreeError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        Ok(Self {
            range,
            payload,
            _phantom: PhantomData,
        })
    }

    /// Creates a leaf that proves `range` is unallocated.
    pub fn empty(range: Range<Size>) -> Result<Self, TreeError> {
        Self::new(range, None)
    }

    pub fn range(&self) -> &Range<Size> {
        &self.range
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Size of the covered range.
    pub fn size(&self) -> Size {
        self.range.end - self.range.start
    }

    /// Converts the leaf into its canonical bucket. This function performs a
    /// hash when the leaf holds a payload.
    pub fn bucket(&self) -> Bucket<HASH_SIZE, H> {
        Bucket::leaf(self.size(), self.payload())
    }

    /// Verifies that `proof` places this leaf, with its content, at its range
    /// under `root`.
    pub fn verify(&self, root: &Bucket<HASH_SIZE, H>, proof: &Proof<HASH_SIZE, H>) -> bool {
        proof.verify(root, &self.bucket(), &self.range).is_ok()
    }
}

/// Checks that `leaves` tile `0..total` in order, without gaps or overlaps.
///
/// Tree construction doesn't call this. Callers that can't vouch for their
/// leaf layout should run it before building.
pub fn check_contiguous<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    leaves: &[Leaf<HASH_SIZE, H>],
) -> Result<(), TreeError> {
    if leaves.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    let mut expected = 0;
    for (index, leaf) in leaves.iter().enumerate() {
        if leaf.range.start != expected {
            return Err(TreeError::NonContiguousLeaves {
                index,
                expected,
                found: leaf.range.start,
            });
        }
        expected = leaf.range.end;
    }
    Ok(())
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Clone for Leaf<HASH_SIZE, H> {
    fn clone(&self) -> Self {
        Self {
            range: self.range.clone(),
            payload: self.payload.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Leaf<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaf")
            .field("range", &self.range)
            .field("payload", &self.payload)
            .finish()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Leaf<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.payload() {
            Some(payload) => write!(
                f,
                "Leaf {{ range: {:?}, payload: {} }}",
                self.range,
                hex::encode(payload)
            ),
            None => write!(f, "Leaf {{ range: {:?}, empty }}", self.range),
        }
    }
}
