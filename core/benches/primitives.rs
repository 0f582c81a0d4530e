use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fastcrypt_core::compression::{lz_compress, rle_compress};
use fastcrypt_core::crypto::{pbkdf2_hmac_sha256_with, sha256_with, HashBackend};
use fastcrypt_core::encoding::base_encode;
use fastcrypt_core::secure::secure_random;

const BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn bench_sha256(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256");
    for size in [64usize, 4096, 1 << 20] {
        let data = secure_random(size).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        for backend in [HashBackend::Portable, HashBackend::Accelerated] {
            group.bench_with_input(BenchmarkId::new(backend.name(), size), &data, |b, d| {
                b.iter(|| sha256_with(backend, black_box(d)))
            });
        }
    }
    group.finish();
}

fn bench_pbkdf2(c: &mut Criterion) {
    let mut group = c.benchmark_group("pbkdf2_1000");
    for backend in [HashBackend::Portable, HashBackend::Accelerated] {
        group.bench_function(backend.name(), |b| {
            b.iter(|| pbkdf2_hmac_sha256_with(backend, b"password", b"salt", 1000, 32).unwrap())
        });
    }
    group.finish();
}

fn bench_codecs(c: &mut Criterion) {
    let text = b"lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(1024);
    let mut group = c.benchmark_group("codecs");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("rle", |b| b.iter(|| rle_compress(black_box(&text))));
    group.bench_function("lz", |b| b.iter(|| lz_compress(black_box(&text))));
    group.finish();
}

fn bench_base58(c: &mut Criterion) {
    let data = secure_random(256).unwrap();
    c.bench_function("base58_encode_256", |b| {
        b.iter(|| base_encode(black_box(&data), BASE58).unwrap())
    });
}

criterion_group!(benches, bench_sha256, bench_pbkdf2, bench_codecs, bench_base58);
criterion_main!(benches);
