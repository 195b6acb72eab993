use std::fmt::Display;

/// Digest material carried by a bucket.
///
/// Leaves commit to a single digest. Buckets produced by a merge keep the two
/// hashed child commitments side by side instead of hashing them together, so
/// a branch commitment is always twice as wide as a leaf one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Commitment<const HASH_SIZE: usize> {
    /// `digest(payload)`, or all zeroes for an empty range
    Leaf([u8; HASH_SIZE]),
    /// `digest(encode(left.size) ++ left.commitment) ++ digest(encode(right.size) ++ right.commitment)`
    Branch([u8; HASH_SIZE], [u8; HASH_SIZE]),
}

impl<const HASH_SIZE: usize> Commitment<HASH_SIZE> {
    /// Commitment of a range with no payload.
    pub const fn empty() -> Self {
        Self::Leaf([0; HASH_SIZE])
    }

    /// Returns true for the canonical empty leaf commitment.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Leaf(hash) if hash.iter().all(|byte| *byte == 0))
    }

    /// Number of bytes in the commitment.
    pub const fn len(&self) -> usize {
        match self {
            Self::Leaf(_) => HASH_SIZE,
            Self::Branch(_, _) => 2 * HASH_SIZE,
        }
    }

    /// Appends the raw commitment bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Leaf(hash) => out.extend_from_slice(hash),
            Self::Branch(left, right) => {
                out.extend_from_slice(left);
                out.extend_from_slice(right);
            }
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        self.write_to(&mut out);
        out
    }

    /// Parses raw commitment bytes. The width picks the variant, anything
    /// other than one or two digests is rejected.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() == HASH_SIZE {
            let mut hash = [0; HASH_SIZE];
            hash.copy_from_slice(bytes);
            Some(Self::Leaf(hash))
        } else if bytes.len() == 2 * HASH_SIZE {
            let mut left = [0; HASH_SIZE];
            let mut right = [0; HASH_SIZE];
            left.copy_from_slice(&bytes[..HASH_SIZE]);
            right.copy_from_slice(&bytes[HASH_SIZE..]);
            Some(Self::Branch(left, right))
        } else {
            None
        }
    }
}

impl<const HASH_SIZE: usize> Display for Commitment<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.to_vec()))
    }
}

#[cfg(test)]
mod test {
    use super::Commitment;

    #[test]
    fn test_empty_commitment() {
        let empty = Commitment::<32>::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 32);
        assert_eq!(empty.to_vec(), vec![0; 32]);
        assert!(!Commitment::<32>::Branch([0; 32], [0; 32]).is_empty());
        assert!(!Commitment::<32>::Leaf([1; 32]).is_empty());
    }

    #[test]
    fn test_branch_bytes_keep_child_order() {
        let branch = Commitment::<4>::Branch([1; 4], [2; 4]);
        assert_eq!(branch.len(), 8);
        assert_eq!(branch.to_vec(), vec![1, 1, 1, 1, 2, 2, 2, 2]);
        assert_eq!(format!("{}", branch), "0101010102020202");
    }

    #[test]
    fn test_from_slice() {
        assert_eq!(
            Commitment::<4>::from_slice(&[7; 4]),
            Some(Commitment::Leaf([7; 4]))
        );
        assert_eq!(
            Commitment::<4>::from_slice(&[1, 1, 1, 1, 2, 2, 2, 2]),
            Some(Commitment::Branch([1; 4], [2; 4]))
        );
        assert_eq!(Commitment::<4>::from_slice(&[0; 5]), None);
        assert_eq!(Commitment::<4>::from_slice(&[]), None);
    }
}
