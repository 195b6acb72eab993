mod types;

use std::fs;
use std::path::PathBuf;

use crate::{check_contiguous, tests::vectors::types::TestVectors, verify_proof, MerkleSumTree};

fn load_test_vectors() -> TestVectors {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src/tests/vectors/merkle_sum_tree.json");
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_vectors() {
    let vectors = load_test_vectors();
    assert!(!vectors.valid_test_cases.is_empty());
    for case in &vectors.valid_test_cases {
        let comment = case.comment.as_deref().unwrap_or("unnamed test");
        let leaves = case
            .leaves
            .iter()
            .map(|leaf| leaf.to_leaf())
            .collect::<Vec<_>>();
        assert!(check_contiguous(&leaves).is_ok(), "{comment}");

        let tree = MerkleSumTree::from_leaves(&leaves).unwrap();
        assert_eq!(*tree.root(), case.root.to_bucket(), "root of {comment}");

        for (index, leaf) in leaves.iter().enumerate() {
            let expected = case.proof(index);
            let proof = tree.merkle_proof(index).unwrap();
            assert_eq!(proof, expected, "proof {index} of {comment}");
            assert!(
                verify_proof(&case.root.to_bucket(), &leaf.bucket(), leaf.range(), &expected),
                "verification {index} of {comment}"
            );
        }
    }
}
