//! Error types for the Merkle Sum Tree implementation

use thiserror::Error;

use crate::node::Size;

/// Error type for tree operations
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TreeError {
    /// A tree needs at least one bucket
    #[error("cannot build a tree from an empty bucket sequence")]
    EmptyInput,
    /// Leaf index passed to proof extraction is past the last leaf
    #[error("leaf index {index} is out of bounds for a tree with {leaves} leaves")]
    IndexOutOfBounds { index: usize, leaves: usize },
    /// Leaf range ends before it starts
    #[error("invalid leaf range {start}..{end}")]
    InvalidRange { start: Size, end: Size },
    /// Size addition overflowed
    #[error("size overflow")]
    SizeOverflow,
    /// Size doesn't fit the 8 byte big endian size field
    #[error("size {0} does not fit in 8 bytes")]
    SizeNotEncodable(Size),
    /// Serialized proof is malformed
    #[error("invalid proof encoding: {0}")]
    InvalidEncoding(String),
    /// Leaves don't tile their range
    #[error("leaf {index} starts at {found}, expected {expected}")]
    NonContiguousLeaves {
        index: usize,
        expected: Size,
        found: Size,
    },
}
