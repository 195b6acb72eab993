use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use super::{encode_size, Commitment, Hasher, Size, SIZE_BYTES};
use crate::TreeError;

/// A bucket is the value of a tree node: the weight of the range it covers
/// and the commitment to its content.
///
/// Leaf buckets commit to their payload, buckets produced by [`Bucket::merge`]
/// commit to both of their children.
pub struct Bucket<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    size: Size,
    commitment: Commitment<HASH_SIZE>,
    _phantom: PhantomData<H>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Bucket<HASH_SIZE, H> {
    /// Creates a bucket from an already computed commitment. No hashing is done here.
    pub fn new(size: Size, commitment: Commitment<HASH_SIZE>) -> Self {
        Self {
            size,
            commitment,
            _phantom: PhantomData,
        }
    }

    /// Creates a leaf bucket. A missing or zero length payload gives the
    /// empty commitment, anything else is hashed.
    pub fn leaf(size: Size, payload: Option<&[u8]>) -> Self {
        let commitment = match payload {
            Some(payload) if !payload.is_empty() => Commitment::Leaf(H::hash(payload)),
            _ => Commitment::empty(),
        };
        Self::new(size, commitment)
    }

    /// Creates a leaf bucket for a range that holds nothing.
    pub fn empty(size: Size) -> Self {
        Self::new(size, Commitment::empty())
    }

    /// Merges two adjacent buckets, `left` preceding `right`. This function
    /// performs two hashes and an addition.
    pub fn merge(left: &Self, right: &Self) -> Result<Self, TreeError> {
        let size = left
            .size
            .checked_add(right.size)
            .ok_or(TreeError::SizeOverflow)?;
        let commitment = Commitment::Branch(left.digest()?, right.digest()?);
        Ok(Self::new(size, commitment))
    }

    /// Hashes the encoded size followed by the commitment. This is what a
    /// parent stores for each of its children.
    pub fn digest(&self) -> Result<[u8; HASH_SIZE], TreeError> {
        let mut data = Vec::with_capacity(SIZE_BYTES + self.commitment.len());
        data.extend_from_slice(&encode_size(self.size)?);
        self.commitment.write_to(&mut data);
        Ok(H::hash(&data))
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the commitment of the bucket. NO HASHING IS DONE HERE.
    pub fn commitment(&self) -> &Commitment<HASH_SIZE> {
        &self.commitment
    }

    /// Returns true if the bucket commits to an empty range.
    pub fn is_empty(&self) -> bool {
        self.commitment.is_empty()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Clone for Bucket<HASH_SIZE, H> {
    fn clone(&self) -> Self {
        Self::new(self.size, self.commitment)
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> PartialEq for Bucket<HASH_SIZE, H> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.commitment == other.commitment
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Eq for Bucket<HASH_SIZE, H> {}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Bucket<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("size", &self.size)
            .field("commitment", &self.commitment)
            .finish()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Bucket<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bucket {{ size: {}, commitment: {} }}",
            self.size, self.commitment
        )
    }
}

#[cfg(test)]
mod test {
    use super::Bucket;
    use crate::node::{Commitment, Hasher};
    use crate::TreeError;
    use hex_literal::hex;
    use sha2::Sha256;

    #[test]
    fn test_leaf_bucket_hash() {
        let bucket = Bucket::<32, Sha256>::leaf(6, Some(b"tx1".as_slice()));
        assert_eq!(bucket.size(), 6);
        assert_eq!(
            bucket.commitment(),
            &Commitment::Leaf(hex!(
                "709b55bd3da0f5a838125bd0ee20c5bfdd7caba173912d4281cae816b79a201b"
            ))
        );
        assert!(!bucket.is_empty());
    }

    #[test]
    fn test_empty_payload_is_empty_leaf() {
        assert!(Bucket::<32, Sha256>::leaf(4, None).is_empty());
        assert!(Bucket::<32, Sha256>::leaf(4, Some(&[][..])).is_empty());
        assert_eq!(
            Bucket::<32, Sha256>::leaf(4, None),
            Bucket::<32, Sha256>::empty(4)
        );
    }

    #[test]
    fn test_merge() {
        let left = Bucket::<32, Sha256>::leaf(4, Some(b"a".as_slice()));
        let right = Bucket::<32, Sha256>::leaf(6, Some(b"b".as_slice()));
        let merged = Bucket::merge(&left, &right).unwrap();
        assert_eq!(merged.size(), 10);
        assert_eq!(
            merged.commitment().to_vec(),
            hex!("e01672d449ed03541b863b10163f94c893542b5d199ec9591eb17adf140ed6baaf2c1222968908d9241aeaa1d1ee37b1978077b0ad90f5569ab49d76768a521a").to_vec()
        );
    }

    #[test]
    fn test_merge_is_not_commutative() {
        let left = Bucket::<32, Sha256>::leaf(4, Some(b"a".as_slice()));
        let right = Bucket::<32, Sha256>::leaf(6, Some(b"b".as_slice()));
        assert_ne!(
            Bucket::merge(&left, &right).unwrap(),
            Bucket::merge(&right, &left).unwrap()
        );
    }

    #[test]
    fn test_digest_covers_size() {
        let bucket = Bucket::<32, Sha256>::empty(4);
        let mut data = vec![0, 0, 0, 0, 0, 0, 0, 4];
        data.extend_from_slice(&[0; 32]);
        assert_eq!(bucket.digest().unwrap(), <Sha256 as Hasher<32>>::hash(&data));
        assert_ne!(
            bucket.digest().unwrap(),
            Bucket::<32, Sha256>::empty(5).digest().unwrap()
        );
    }

    #[test]
    fn test_merge_rejects_unencodable_child() {
        let huge = Bucket::<32, Sha256>::empty(1 << 64);
        let small = Bucket::<32, Sha256>::empty(1);
        assert_eq!(
            Bucket::merge(&huge, &small).unwrap_err(),
            TreeError::SizeNotEncodable(1 << 64)
        );
    }

    #[test]
    fn test_bucket_display() {
        let bucket = Bucket::<32, Sha256>::empty(4);
        assert_eq!(
            format!("{}", bucket),
            "Bucket { size: 4, commitment: 0000000000000000000000000000000000000000000000000000000000000000 }"
        );
    }
}
