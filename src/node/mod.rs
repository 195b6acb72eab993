mod bucket;
mod commitment;
mod leaf;

use sha2::{Digest, Sha256};

pub use bucket::Bucket;
pub use commitment::Commitment;
pub use leaf::{check_contiguous, Leaf};

use crate::TreeError;

impl Hasher<32> for Sha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

/// Weight of a bucket. Wider than the 8 byte size field so that a total space
/// of exactly `2^64` can be represented at the root.
pub type Size = u128;

/// Width of the encoded size field.
pub const SIZE_BYTES: usize = 8;

/// Simple hash trait required to hash the buckets in the tree
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
pub trait Hasher<const HASH_SIZE: usize> {
    fn hash(data: &[u8]) -> [u8; HASH_SIZE];
}

/// Encodes a size as 8 big endian bytes.
pub fn encode_size(size: Size) -> Result<[u8; SIZE_BYTES], TreeError> {
    u64::try_from(size)
        .map(u64::to_be_bytes)
        .map_err(|_| TreeError::SizeNotEncodable(size))
}

/// Decodes 8 big endian bytes into a size.
pub fn decode_size(bytes: &[u8]) -> Result<Size, TreeError> {
    let bytes: [u8; SIZE_BYTES] = bytes.try_into().map_err(|_| {
        TreeError::InvalidEncoding(format!(
            "size field must be {SIZE_BYTES} bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(u64::from_be_bytes(bytes) as Size)
}
