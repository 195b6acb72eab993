use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use super::{take, Proof, ProofStep, Side};
use crate::{
    node::{decode_size, encode_size, Bucket, Commitment, Hasher, SIZE_BYTES},
    TreeError,
};

/// A merkle sum proof with its side flags packed into a bitvector.
///
/// Encoded as the step count (2 bytes big endian), the side bits (1 for
/// right), the width bits (1 for a branch commitment, 0 for a leaf one),
/// then each step's size (8 bytes big endian) and commitment.
pub struct CompressedProof<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    buckets: Vec<Bucket<HASH_SIZE, H>>,
    sides: BitVec<u8, Lsb0>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Proof<HASH_SIZE, H> {
    /// Compresses the proof into a compressed proof.
    pub fn compress(&self) -> CompressedProof<HASH_SIZE, H> {
        let mut sides = BitVec::with_capacity(self.steps.len());
        let mut buckets = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            sides.push(step.side.is_right());
            buckets.push(step.bucket.clone());
        }
        CompressedProof::new(buckets, sides)
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> CompressedProof<HASH_SIZE, H> {
    /// Creates a new compressed proof from a list of buckets and their side bits.
    pub fn new(buckets: Vec<Bucket<HASH_SIZE, H>>, sides: BitVec<u8, Lsb0>) -> Self {
        Self { buckets, sides }
    }

    pub fn buckets(&self) -> &[Bucket<HASH_SIZE, H>] {
        &self.buckets
    }

    /// Decompresses the proof into a proof.
    pub fn decompress(&self) -> Result<Proof<HASH_SIZE, H>, TreeError> {
        if self.buckets.len() != self.sides.len() {
            return Err(TreeError::InvalidEncoding(format!(
                "{} buckets for {} side bits",
                self.buckets.len(),
                self.sides.len()
            )));
        }
        let steps = self
            .buckets
            .iter()
            .zip(self.sides.iter())
            .map(|(bucket, right)| {
                let side = if *right { Side::Right } else { Side::Left };
                ProofStep::new(bucket.clone(), side)
            })
            .collect();
        Ok(Proof::new(steps))
    }

    /// Encodes the proof into a byte vector.
    pub fn encode(&self) -> Result<Vec<u8>, TreeError> {
        let count = u16::try_from(self.buckets.len()).map_err(|_| {
            TreeError::InvalidEncoding(format!("{} steps do not fit a u16", self.buckets.len()))
        })?;
        let mut widths = BitVec::<u8, Lsb0>::with_capacity(self.buckets.len());
        for bucket in &self.buckets {
            widths.push(matches!(bucket.commitment(), Commitment::Branch(_, _)));
        }
        let mut sides = self.sides.clone();
        sides.resize(self.buckets.len(), false);

        let mut encoded = Vec::new();
        encoded.extend_from_slice(&count.to_be_bytes());
        encoded.extend_from_slice(sides.as_raw_slice());
        encoded.extend_from_slice(widths.as_raw_slice());
        for bucket in &self.buckets {
            encoded.extend_from_slice(&encode_size(bucket.size())?);
            bucket.commitment().write_to(&mut encoded);
        }
        Ok(encoded)
    }

    /// Decodes a proof from a byte vector.
    pub fn decode(data: &[u8]) -> Result<Self, TreeError> {
        let mut rest = data;
        let count = take(&mut rest, 2)?;
        let count = u16::from_be_bytes([count[0], count[1]]) as usize;

        let sides = take_bits(&mut rest, count, "side")?;
        let widths = take_bits(&mut rest, count, "width")?;

        let mut buckets = Vec::with_capacity(count);
        for branch in widths.iter() {
            let size = decode_size(take(&mut rest, SIZE_BYTES)?)?;
            let width = if *branch { 2 * HASH_SIZE } else { HASH_SIZE };
            let commitment = Commitment::from_slice(take(&mut rest, width)?).ok_or_else(|| {
                TreeError::InvalidEncoding(format!("bad commitment width {width}"))
            })?;
            buckets.push(Bucket::new(size, commitment));
        }
        if !rest.is_empty() {
            return Err(TreeError::InvalidEncoding(format!(
                "{} trailing bytes",
                rest.len()
            )));
        }
        Ok(Self::new(buckets, sides))
    }
}

/// Reads `count` bits packed into whole bytes. The padding bits past `count`
/// must be zero.
fn take_bits(data: &mut &[u8], count: usize, what: &str) -> Result<BitVec<u8, Lsb0>, TreeError> {
    let mut bits = BitVec::<u8, Lsb0>::from_slice(take(data, count.div_ceil(8))?);
    if bits[count..].any() {
        return Err(TreeError::InvalidEncoding(format!(
            "{what} bits set past step count {count}"
        )));
    }
    bits.truncate(count);
    Ok(bits)
}
