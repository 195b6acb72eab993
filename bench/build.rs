use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_sum_tree::{Leaf, MerkleSumTree, Size};
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

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("MST Build");

    for count in [100, 1_000, 10_000] {
        let leaves = generate_random_leaves(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &leaves, |b, leaves| {
            b.iter(|| black_box(MerkleSumTree::from_leaves(leaves)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
