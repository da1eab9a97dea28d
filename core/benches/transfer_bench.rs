use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bytestream_core::prelude::*;

const PAYLOAD_LEN: usize = 256 * 1024;

fn payload() -> Vec<u8> {
    (0..PAYLOAD_LEN).map(|i| (i % 251) as u8).collect()
}

/// Buffered copies at several buffer sizes against the byte-at-a-time path.
fn bench_transfer_paths(c: &mut Criterion) {
    let data = payload();
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for buffer_size in [0usize, 512, 8 * 1024, 64 * 1024] {
        group.bench_with_input(
            BenchmarkId::new("array_to_vec", buffer_size),
            &buffer_size,
            |b, &size| {
                b.iter(|| {
                    let mut src = ArrayReader::new(black_box(&data[..]));
                    let mut dst = VecWriter::with_capacity(PAYLOAD_LEN);
                    Transfer::new(&mut src, &mut dst)
                        .buffer_size(size)
                        .run()
                        .expect("transfer failed")
                });
            },
        );
    }

    group.finish();
}

/// Hashing sink fed through a bounded sequence, the heaviest decorator stack.
fn bench_decorated_digest(c: &mut Criterion) {
    let data = payload();
    let half = PAYLOAD_LEN / 2;

    c.bench_function("sequential_bounded_sha256", |b| {
        b.iter(|| {
            let mut src = SequentialReader::concat(vec![
                ArrayReader::new(&data[..half]),
                ArrayReader::new(&data[half..]),
            ])
            .bounded(PAYLOAD_LEN as u64 - 1);
            let mut dst = DigestWriter::new(DigestAlg::Sha256);
            transfer(&mut src, &mut dst).expect("transfer failed");
            black_box(dst.finalize())
        });
    });
}

criterion_group!(benches, bench_transfer_paths, bench_decorated_digest);
criterion_main!(benches);
