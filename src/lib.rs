//! Merkle Sum Tree implementation
//!
//! This crate provides a Merkle Sum Tree: a binary hash tree whose leaves each
//! own a disjoint sub range of a fixed size space, and whose internal nodes
//! aggregate both the sizes and the commitments of their children.
//!
//! The tree supports:
//! - Build once, read many construction from ordered leaves
//! - Inclusion proofs for populated ranges
//! - Exclusion proofs for empty ranges, with the same proof mechanism
//! - Stateless verification from the root bucket alone
//! - Pluggable hashing through the `Hasher` trait

mod error;
mod node;
mod proof;
mod tree;

pub use error::TreeError;
pub use node::{
    check_contiguous, decode_size, encode_size, Bucket, Commitment, Hasher, Leaf, Size, SIZE_BYTES,
};
pub use proof::{verify_proof, CompressedProof, Proof, ProofStep, Rejection, Side};
pub use tree::{MerkleSumTree, NodeId, Sibling};

#[cfg(test)]
mod tests;
