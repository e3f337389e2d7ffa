//! Generation throughput.
//!
//! Run with: `cargo bench --bench generate`

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use warmup_fuzz::rng::seeded;
use warmup_fuzz::{OutputKind, build_request, creative_inputs};

fn bench_creative_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("creative_inputs");
    for count in [1usize, 64, 1024] {
        group.bench_function(format!("{count}"), |b| {
            b.iter(|| creative_inputs(black_box(count), Some(1234), OutputKind::Bytes))
        });
    }
    group.finish();
}

fn bench_build_request(c: &mut Criterion) {
    let mut rng = seeded(Some(1234));
    c.bench_function("build_request", |b| b.iter(|| build_request(black_box(&mut rng))));
}

criterion_group!(benches, bench_creative_inputs, bench_build_request);
criterion_main!(benches);
