use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proofmesh_types::{ActorId, Fingerprint, Timestamp};

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| proofmesh_crypto::blake2b_256(black_box(&data)))
    });
}

fn blake2b_multi_bench(c: &mut Criterion) {
    let parts: Vec<&[u8]> = vec![&[1u8; 32], &[2u8; 64], &[3u8; 128]];

    c.bench_function("blake2b_256_multi_3parts", |b| {
        b.iter(|| proofmesh_crypto::blake2b_256_multi(black_box(&parts)))
    });
}

fn derive_proof_id_bench(c: &mut Criterion) {
    let fingerprint = Fingerprint::new([0x5Au8; 32]);
    let creator = ActorId::new("did:example:issuer");
    let mut seq = 0u64;

    c.bench_function("derive_proof_id", |b| {
        b.iter(|| {
            seq += 1;
            proofmesh_crypto::derive_proof_id(
                black_box(&fingerprint),
                black_box(&creator),
                Timestamp::new(1_700_000_000),
                seq,
            )
        })
    });
}

criterion_group!(
    benches,
    blake2b_256_bench,
    blake2b_multi_bench,
    derive_proof_id_bench
);
criterion_main!(benches);
