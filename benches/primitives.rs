//! Throughput of the hot primitives: AES, key exchange and signing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ember_crypto::crypto::{
    generate_key_exchange_key_pair, generate_random_block, generate_sha256_digest,
    generate_signature, generate_signing_key_pair, perform_key_exchange,
    symmetric_auth_encrypt_with_iv, symmetric_encrypt_with_iv, symmetric_padded_len,
    verify_signature, AUTH_IV_LEN, AUTH_TAG_LEN, SYMMETRIC_BLOCK_SIZE, SYMMETRIC_KEY_LEN,
};

const SIZES: [usize; 2] = [128, 1024 * 1024];

fn random_vec(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    generate_random_block(&mut data).unwrap();
    data
}

fn bench_symmetric(c: &mut Criterion) {
    let key = random_vec(SYMMETRIC_KEY_LEN);
    let iv = random_vec(SYMMETRIC_BLOCK_SIZE);
    let auth_iv = random_vec(AUTH_IV_LEN);

    let mut group = c.benchmark_group("symmetric");
    for size in SIZES {
        let plaintext = random_vec(size);
        group.throughput(Throughput::Bytes(size as u64));

        let mut out = vec![0u8; symmetric_padded_len(size)];
        group.bench_with_input(BenchmarkId::new("aes256_cbc", size), &plaintext, |b, p| {
            b.iter(|| symmetric_encrypt_with_iv(&key, &iv, black_box(p), &mut out).unwrap())
        });

        let mut out = vec![0u8; size + AUTH_TAG_LEN];
        group.bench_with_input(BenchmarkId::new("aes256_gcm", size), &plaintext, |b, p| {
            b.iter(|| {
                symmetric_auth_encrypt_with_iv(&key, &auth_iv, black_box(p), &[], &mut out).unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("sha256", size), &plaintext, |b, p| {
            b.iter(|| generate_sha256_digest(black_box(p)))
        });
    }
    group.finish();
}

fn bench_elliptic(c: &mut Criterion) {
    let (_, alice) = generate_key_exchange_key_pair().unwrap();
    let (bob_pub, _) = generate_key_exchange_key_pair().unwrap();

    c.bench_function("x25519_key_exchange", |b| {
        b.iter(|| perform_key_exchange(black_box(&alice), black_box(&bob_pub)).unwrap())
    });

    let (public, private) = generate_signing_key_pair().unwrap();
    let message = random_vec(128);
    let signature = generate_signature(&private, &message).unwrap();

    c.bench_function("ed25519_sign_128", |b| {
        b.iter(|| generate_signature(black_box(&private), black_box(&message)).unwrap())
    });
    c.bench_function("ed25519_verify_128", |b| {
        b.iter(|| verify_signature(black_box(&public), black_box(&message), &signature))
    });
}

criterion_group!(benches, bench_symmetric, bench_elliptic);
criterion_main!(benches);
