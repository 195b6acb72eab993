use criterion::{black_box, criterion_group, criterion_main, Criterion};
use merkle_sum_tree::{verify_proof, CompressedProof, Leaf, MerkleSumTree, Size};
use sha2::Sha256;

pub fn generate_random_leaves(count: usize) -> Vec<Leaf<32, Sha256>> {
    let mut start: Size = 0;
    (0..count)
        .map(|_| {
            let end = start + 1 + rand::random::<u16>() as Size;
            let payload = if rand::random::<bool>() {
                Some((0..32).map(|_| rand::random()).collect())
            } else {
                None
            };
            let leaf = Leaf::new(start..end, payload).unwrap();
            start = end;
            leaf
        })
        .collect()
}

fn bench_proof_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("MST Proof Extraction");

    // Setup a tree with 1000 leaves
    let leaves = generate_random_leaves(1_000);
    let tree = MerkleSumTree::from_leaves(&leaves).unwrap();

    group.bench_function("All leaves", |b| {
        b.iter(|| {
            for index in 0..tree.leaf_count() {
                black_box(tree.merkle_proof(index)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("MST Proof Verification");

    let leaves = generate_random_leaves(1_000);
    let tree = MerkleSumTree::from_leaves(&leaves).unwrap();
    let proofs = (0..tree.leaf_count())
        .map(|index| tree.merkle_proof(index).unwrap())
        .collect::<Vec<_>>();
    let claims = leaves.iter().map(Leaf::bucket).collect::<Vec<_>>();

    group.bench_function("Verify", |b| {
        b.iter(|| {
            for ((leaf, claim), proof) in leaves.iter().zip(&claims).zip(&proofs) {
                black_box(verify_proof(tree.root(), claim, leaf.range(), proof));
            }
        })
    });

    group.finish();
}

fn bench_proof_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("MST Proof Encoding");

    let leaves = generate_random_leaves(1_000);
    let tree = MerkleSumTree::from_leaves(&leaves).unwrap();
    let proof = tree.merkle_proof(leaves.len() / 2).unwrap();
    let encoded = proof.compress().encode().unwrap();

    group.bench_function("Compress and encode", |b| {
        b.iter(|| black_box(proof.compress().encode()).unwrap())
    });

    group.bench_function("Decode and decompress", |b| {
        b.iter(|| {
            black_box(CompressedProof::<32, Sha256>::decode(&encoded))
                .unwrap()
                .decompress()
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_proof_extraction,
    bench_proof_verification,
    bench_proof_encoding
);
criterion_main!(benches);
