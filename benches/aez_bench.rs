use aez::{decrypt, encrypt, Aez};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Generate test data of the specified size
fn generate_test_data(size: usize) -> (Vec<u8>, Vec<u8>, [u8; 16], [u8; 12]) {
    let plaintext = vec![0x42u8; size];
    let ad = vec![0x41u8; 32]; // Fixed AD size
    let key = [0x01u8; 16];
    let nonce = [0x02u8; 12];
    (plaintext, ad, key, nonce)
}

/// Print CPU feature detection information
fn print_cpu_features() {
    println!("=== CPU Feature Detection ===");

    #[cfg(target_arch = "aarch64")]
    {
        let neon = std::arch::is_aarch64_feature_detected!("neon");
        let aes = std::arch::is_aarch64_feature_detected!("aes");
        println!("Architecture: ARM64/AArch64");
        println!("NEON support: {}", if neon { "yes" } else { "no" });
        println!("AES Crypto Extensions: {}", if aes { "yes" } else { "no" });
    }

    #[cfg(target_arch = "x86_64")]
    {
        let aes = std::arch::is_x86_feature_detected!("aes");
        println!("Architecture: x86_64");
        println!("AES-NI support: {}", if aes { "yes" } else { "no" });
    }

    println!("==============================\n");
}

/// Benchmark encryption performance across different data sizes
fn bench_encrypt_sizes(c: &mut Criterion) {
    print_cpu_features();
    let mut group = c.benchmark_group("encrypt_throughput");

    // Test sizes from 64 bytes to 1MB
    let sizes = [64, 256, 1024, 4096, 16384, 65536, 262144, 1048576];

    for size in sizes {
        let (plaintext, ad, key, nonce) = generate_test_data(size);
        let ctx = Aez::new(&key).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encrypt", size), &size, |b, _| {
            b.iter(|| {
                let result = ctx.encrypt(
                    black_box(&nonce),
                    black_box(&[&ad]),
                    16,
                    black_box(&plaintext),
                );
                black_box(result).unwrap()
            });
        });
    }
    group.finish();
}

/// Benchmark decryption performance across different data sizes
fn bench_decrypt_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt_throughput");

    let sizes = [64, 256, 1024, 4096, 16384, 65536, 262144, 1048576];

    for size in sizes {
        let (plaintext, ad, key, nonce) = generate_test_data(size);
        let ctx = Aez::new(&key).unwrap();
        let ciphertext = ctx.encrypt(&nonce, &[&ad], 16, &plaintext).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("decrypt", size), &size, |b, _| {
            b.iter(|| {
                let result = ctx.decrypt(
                    black_box(&nonce),
                    black_box(&[&ad]),
                    16,
                    black_box(&ciphertext),
                );
                black_box(result).unwrap()
            });
        });
    }
    group.finish();
}

/// Benchmark the small-message (AEZ-tiny and PRF) paths
fn bench_small_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_messages");

    let (_, ad, key, nonce) = generate_test_data(0);
    let ctx = Aez::new(&key).unwrap();

    for size in [0usize, 1, 8, 15, 31, 32] {
        let plaintext = vec![0x42u8; size];
        group.bench_with_input(BenchmarkId::new("encrypt", size), &size, |b, _| {
            b.iter(|| {
                let result = ctx.encrypt(
                    black_box(&nonce),
                    black_box(&[&ad]),
                    16,
                    black_box(&plaintext),
                );
                black_box(result).unwrap()
            });
        });
    }
    group.finish();
}

/// Benchmark with varying AD sizes
fn bench_ad_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ad_sizes");

    let plaintext = vec![0x42u8; 1024]; // Fixed plaintext size
    let key = [0x01u8; 16];
    let nonce = [0x02u8; 12];
    let ctx = Aez::new(&key).unwrap();

    let ad_sizes = [0, 16, 64, 256, 1024, 4096];

    for ad_size in ad_sizes {
        let ad = vec![0x41u8; ad_size];

        group.bench_with_input(
            BenchmarkId::new("encrypt_with_ad", ad_size),
            &ad_size,
            |b, _| {
                b.iter(|| {
                    let result = ctx.encrypt(
                        black_box(&nonce),
                        black_box(&[&ad]),
                        16,
                        black_box(&plaintext),
                    );
                    black_box(result).unwrap()
                });
            },
        );
    }
    group.finish();
}

/// Benchmark key extraction and one-shot overhead
fn bench_setup_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("setup_overhead");

    let plaintext = vec![0x42u8; 64];
    let ad = vec![0x41u8; 16];
    let key = [0x01u8; 16];
    let long_key = vec![0x01u8; 48];
    let nonce = [0x02u8; 12];

    group.bench_function("extract_16_byte_key", |b| {
        b.iter(|| black_box(Aez::new(black_box(&key)).unwrap()));
    });

    group.bench_function("extract_48_byte_key", |b| {
        b.iter(|| black_box(Aez::new(black_box(&long_key)).unwrap()));
    });

    group.bench_function("one_shot_encrypt_64_bytes", |b| {
        b.iter(|| {
            let result = encrypt(
                black_box(&plaintext),
                black_box(&ad),
                black_box(&key),
                black_box(&nonce),
            );
            black_box(result).unwrap()
        });
    });

    group.bench_function("one_shot_roundtrip_64_bytes", |b| {
        b.iter(|| {
            let ciphertext = encrypt(&plaintext, &ad, &key, &nonce).unwrap();
            let decrypted = decrypt(&ciphertext, &ad, &key, &nonce).unwrap();
            black_box(decrypted)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encrypt_sizes,
    bench_decrypt_sizes,
    bench_small_messages,
    bench_ad_sizes,
    bench_setup_overhead
);
criterion_main!(benches);
