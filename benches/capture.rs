//! Capture Benchmarks
//!
//! Measures buffer growth cost of the bounded reader for clipboard-sized
//! and very large inputs delivered in pipe-sized chunks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use clipman2::capture::{BoundedReader, ScriptedSource, Step};

/// Split `size` bytes of text into 64 KiB chunks (default pipe capacity)
fn chunked_steps(size: usize) -> Vec<Step> {
    let data: Vec<u8> = (0..size).map(|i| b'a' + (i % 26) as u8).collect();
    data.chunks(64 * 1024).map(|c| Step::Chunk(c.to_vec())).collect()
}

fn bench_read_to_idle(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture_read_to_idle");
    let reader = BoundedReader::default();

    let sizes = [
        (64, "64B"),
        (4 * 1024, "4KiB"),
        (256 * 1024, "256KiB"),
        (16 * 1024 * 1024, "16MiB"),
    ];

    for (size, label) in sizes {
        let steps = chunked_steps(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &steps, |b, steps| {
            b.iter(|| {
                let mut source = ScriptedSource::new(steps.clone());
                black_box(reader.read_to_idle(&mut source))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_to_idle);
criterion_main!(benches);
