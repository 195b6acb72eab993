//! Example of proving that a range is unallocated
//!
//! This example demonstrates:
//! - Empty leaves committing to zeroes
//! - Verifying an exclusion proof on a client that only knows the root
//! - Shipping the proof in compressed form

use merkle_sum_tree::{Bucket, CompressedProof, Leaf, MerkleSumTree, TreeError};
use sha2::Sha256;

fn main() -> Result<(), TreeError> {
    env_logger::init();

    let leaves = vec![
        Leaf::<32, Sha256>::new(0..100, Some(b"block header".to_vec()))?,
        Leaf::empty(100..400)?,
        Leaf::new(400..512, Some(b"block body".to_vec()))?,
    ];
    let tree = MerkleSumTree::from_leaves(&leaves)?;

    // Server side: extract and compress the proof for the empty range
    let encoded = tree.merkle_proof(1)?.compress().encode()?;
    let root = tree.root().clone();
    println!("Compressed proof: {} bytes", encoded.len());

    // Client side: only the root, the claimed range and the proof bytes
    let proof = CompressedProof::<32, Sha256>::decode(&encoded)?.decompress()?;
    let claim = Bucket::empty(300);
    match proof.verify(&root, &claim, &(100..400)) {
        Ok(()) => println!("100..400 is provably empty"),
        Err(rejection) => println!("Rejected: {}", rejection),
    }

    // Claiming content in that range does not verify
    let forged = Bucket::leaf(300, Some(b"hidden".as_slice()));
    if let Err(rejection) = proof.verify(&root, &forged, &(100..400)) {
        println!("Forged claim rejected: {}", rejection);
    }
    Ok(())
}
