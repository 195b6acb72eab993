//! Proofs place a bucket at a range under a root.
//!
//! A proof is the list of siblings met on the way from a leaf to the root,
//! each tagged with the side it sat on.
//!
//! A proof can be encoded step by step, or compressed with its side flags
//! packed into a bitvector.
mod compressed;
mod verify;

use std::fmt::{Debug, Display};

pub use compressed::CompressedProof;
pub use verify::{verify_proof, Rejection};

use crate::{
    node::{decode_size, encode_size, Bucket, Commitment, Hasher, SIZE_BYTES},
    TreeError,
};

/// Position of a proof step's sibling relative to the node being rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The sibling precedes the node, its size counts towards the range start.
    Left,
    /// The sibling follows the node, its size is taken off the range end.
    Right,
}

impl Side {
    pub fn flag(&self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Self::Right)
    }
}

/// One level of a proof: the sibling bucket and its side.
pub struct ProofStep<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    bucket: Bucket<HASH_SIZE, H>,
    side: Side,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> ProofStep<HASH_SIZE, H> {
    pub fn new(bucket: Bucket<HASH_SIZE, H>, side: Side) -> Self {
        Self { bucket, side }
    }

    pub fn bucket(&self) -> &Bucket<HASH_SIZE, H> {
        &self.bucket
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

/// A merkle sum proof, ordered from the leaf up to the root.
pub struct Proof<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    steps: Vec<ProofStep<HASH_SIZE, H>>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Proof<HASH_SIZE, H> {
    /// Creates a new proof from a list of steps.
    pub fn new(steps: Vec<ProofStep<HASH_SIZE, H>>) -> Self {
        Self { steps }
    }

    /// Returns the steps in the proof.
    pub fn steps(&self) -> &[ProofStep<HASH_SIZE, H>] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ProofStep<HASH_SIZE, H>> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Encodes the proof. Each step is written as its size (8 bytes big
    /// endian), the commitment length (1 byte), the commitment and the side
    /// flag (1 byte, 0 for left and 1 for right).
    pub fn encode(&self) -> Result<Vec<u8>, TreeError> {
        let mut encoded = Vec::with_capacity(
            self.steps
                .iter()
                .map(|step| SIZE_BYTES + 2 + step.bucket.commitment().len())
                .sum(),
        );
        for step in &self.steps {
            let commitment = step.bucket.commitment();
            let len = u8::try_from(commitment.len()).map_err(|_| {
                TreeError::InvalidEncoding(format!(
                    "commitment of {} bytes does not fit a 1 byte length",
                    commitment.len()
                ))
            })?;
            encoded.extend_from_slice(&encode_size(step.bucket.size())?);
            encoded.push(len);
            commitment.write_to(&mut encoded);
            encoded.push(step.side.flag());
        }
        Ok(encoded)
    }

    /// Decodes a proof written by [`Proof::encode`].
    pub fn decode(data: &[u8]) -> Result<Self, TreeError> {
        let mut steps = Vec::new();
        let mut rest = data;
        while !rest.is_empty() {
            let size = decode_size(take(&mut rest, SIZE_BYTES)?)?;
            let len = take(&mut rest, 1)?[0] as usize;
            let commitment = Commitment::from_slice(take(&mut rest, len)?).ok_or_else(|| {
                TreeError::InvalidEncoding(format!(
                    "commitment must be {} or {} bytes, got {len}",
                    HASH_SIZE,
                    2 * HASH_SIZE
                ))
            })?;
            let flag = take(&mut rest, 1)?[0];
            let side = Side::from_flag(flag)
                .ok_or_else(|| TreeError::InvalidEncoding(format!("unknown side flag {flag}")))?;
            steps.push(ProofStep::new(Bucket::new(size, commitment), side));
        }
        Ok(Self::new(steps))
    }
}

/// Splits `len` bytes off the front of `data`.
fn take<'a>(data: &mut &'a [u8], len: usize) -> Result<&'a [u8], TreeError> {
    if data.len() < len {
        return Err(TreeError::InvalidEncoding(format!(
            "unexpected end of proof: needed {len} bytes, {} left",
            data.len()
        )));
    }
    let (head, tail) = data.split_at(len);
    *data = tail;
    Ok(head)
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Clone for ProofStep<HASH_SIZE, H> {
    fn clone(&self) -> Self {
        Self::new(self.bucket.clone(), self.side)
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> PartialEq for ProofStep<HASH_SIZE, H> {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side && self.bucket == other.bucket
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Eq for ProofStep<HASH_SIZE, H> {}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for ProofStep<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofStep")
            .field("bucket", &self.bucket)
            .field("side", &self.side)
            .finish()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Clone for Proof<HASH_SIZE, H> {
    fn clone(&self) -> Self {
        Self::new(self.steps.clone())
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> PartialEq for Proof<HASH_SIZE, H> {
    fn eq(&self, other: &Self) -> bool {
        self.steps == other.steps
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Eq for Proof<HASH_SIZE, H> {}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Proof<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proof").field("steps", &self.steps).finish()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Proof<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Proof [")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {}", step.side, step.bucket)?;
        }
        f.write_str("]")
    }
}
