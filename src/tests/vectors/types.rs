use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::str::FromStr;

use crate::{Bucket, Commitment, Leaf, Proof, ProofStep, Side, Size};

/// Parse a decimal size, sizes may exceed the range of JSON numbers
fn parse_size(size: &str) -> Size {
    Size::from_str(size).unwrap()
}

fn parse_commitment(commitment: &str) -> Commitment<32> {
    Commitment::from_slice(&hex::decode(commitment).unwrap()).unwrap()
}

/// A leaf declared by a test vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestLeaf {
    pub start: String,
    pub end: String,
    pub payload: Option<String>,
}

impl TestLeaf {
    /// Convert to a tree leaf
    pub fn to_leaf(&self) -> Leaf<32, Sha256> {
        let payload = self
            .payload
            .as_ref()
            .map(|payload| hex::decode(payload).unwrap());
        Leaf::new(parse_size(&self.start)..parse_size(&self.end), payload).unwrap()
    }
}

/// A bucket as serialized in the test vectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestBucket {
    pub size: String,
    pub commitment: String,
}

impl TestBucket {
    pub fn to_bucket(&self) -> Bucket<32, Sha256> {
        Bucket::new(parse_size(&self.size), parse_commitment(&self.commitment))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestSide {
    Left,
    Right,
}

/// One step of an expected proof
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestProofStep {
    #[serde(flatten)]
    pub bucket: TestBucket,
    pub side: TestSide,
}

impl TestProofStep {
    pub fn to_step(&self) -> ProofStep<32, Sha256> {
        let side = match self.side {
            TestSide::Left => Side::Left,
            TestSide::Right => Side::Right,
        };
        ProofStep::new(self.bucket.to_bucket(), side)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidTestCase {
    pub comment: Option<String>,
    pub leaves: Vec<TestLeaf>,
    pub root: TestBucket,
    /// Expected proof of every leaf, in leaf order
    pub proofs: Vec<Vec<TestProofStep>>,
}

impl ValidTestCase {
    pub fn proof(&self, index: usize) -> Proof<32, Sha256> {
        Proof::new(self.proofs[index].iter().map(TestProofStep::to_step).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestVectors {
    pub valid_test_cases: Vec<ValidTestCase>,
}
