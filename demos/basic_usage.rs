//! Basic example of using the Merkle Sum Tree
//!
//! This example demonstrates:
//! - Building a tree over the whole 64-bit space
//! - Getting the root bucket
//! - Extracting and verifying an inclusion proof
//!
//! Run with `RUST_LOG=debug` to see the library logs.

use merkle_sum_tree::{verify_proof, Leaf, MerkleSumTree, Size, TreeError};
use sha2::Sha256;

const TREE_SIZE: Size = 1 << 64;

fn main() -> Result<(), TreeError> {
    env_logger::init();

    // Leaves must cover the space in order, `None` marks an empty range
    let leaves = vec![
        Leaf::<32, Sha256>::empty(0..4)?,
        Leaf::new(4..10, Some(b"tx1".to_vec()))?,
        Leaf::empty(10..15)?,
        Leaf::new(15..20, Some(b"tx2".to_vec()))?,
        Leaf::new(20..70, Some(b"tx3".to_vec()))?,
        Leaf::new(70..90, Some(b"tx4".to_vec()))?,
        Leaf::empty(90..TREE_SIZE)?,
    ];
    let tree = MerkleSumTree::from_leaves(&leaves)?;

    let root = tree.root();
    println!("Root: {}", root);

    // Prove that "tx2" occupies 15..20
    let proof = tree.merkle_proof(3)?;
    println!("Proof length: {}", proof.len());
    println!("Encoded proof: {}", hex::encode(proof.encode()?));

    let bucket = leaves[3].bucket();
    println!(
        "Proof verification: {}",
        verify_proof(root, &bucket, &(15..20), &proof)
    );
    println!(
        "Proof verification for 15..21: {}",
        verify_proof(root, &bucket, &(15..21), &proof)
    );
    Ok(())
}
