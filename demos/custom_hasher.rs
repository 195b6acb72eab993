//! Example of implementing a custom hasher for the Merkle Sum Tree
//!
//! This example demonstrates:
//! - Creating a custom hasher implementation
//! - Using it with the tree
//! - Basic tree operations with the custom hasher

use merkle_sum_tree::{Hasher, Leaf, MerkleSumTree, TreeError};
use sha2::{Digest, Sha256};

// Custom hasher that uses SHA256 but adds a prefix to the input
#[derive(Clone)]
struct PrefixedSha256;

impl Hasher<32> for PrefixedSha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        // Add a custom prefix to the input
        hasher.update(b"custom_prefix:");
        hasher.update(data);
        hasher.finalize().into()
    }
}

fn main() -> Result<(), TreeError> {
    env_logger::init();

    // Build a tree with our custom hasher
    let leaves = vec![
        Leaf::<32, PrefixedSha256>::new(0..100, Some(vec![1, 2, 3]))?,
        Leaf::empty(100..250)?,
    ];
    let tree = MerkleSumTree::from_leaves(&leaves)?;
    println!("Root with custom hasher: {}", tree.root());
    println!(
        "Leaf 0 verifies: {}",
        leaves[0].verify(tree.root(), &tree.merkle_proof(0)?)
    );

    // Compare with standard SHA256
    let standard_leaves = vec![
        Leaf::<32, Sha256>::new(0..100, Some(vec![1, 2, 3]))?,
        Leaf::empty(100..250)?,
    ];
    let standard_tree = MerkleSumTree::from_leaves(&standard_leaves)?;
    println!("Root with standard SHA256: {}", standard_tree.root());

    // Note that the commitments are different due to our custom prefix
    println!("\nThe commitments are different because our custom hasher adds a prefix to the input.");
    Ok(())
}
