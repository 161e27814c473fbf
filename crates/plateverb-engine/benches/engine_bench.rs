//! Criterion benchmarks for the plate reverb engine
//!
//! Run with: cargo bench -p plateverb-engine
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use plateverb_core::Effect;
use plateverb_engine::{BlockCoefficients, PlateReverb, ReverbParams, Tuning};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion, name: &str, params: ReverbParams) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut reverb = PlateReverb::new(SAMPLE_RATE).expect("allocation");
                reverb.set_params(params);
                let mut left = vec![0.0; block_size];
                let mut right = vec![0.0; block_size];
                b.iter(|| {
                    reverb.process_block(black_box(&input), &mut left, &mut right);
                    black_box((left[0], right[0]))
                })
            },
        );
    }

    group.finish();
}

fn bench_default(c: &mut Criterion) {
    bench_engine(c, "PlateReverb/default", ReverbParams::default());
}

fn bench_full_featured(c: &mut Criterion) {
    let params = ReverbParams {
        mix: 0.5,
        gate: 0.5,
        grit: 0.4,
        mod_depth_ms: 4.0,
        ..ReverbParams::default()
    };
    bench_engine(c, "PlateReverb/gate_grit_mod", params);
}

fn bench_derive(c: &mut Criterion) {
    let tuning = Tuning::new(SAMPLE_RATE);
    let params = ReverbParams::default();
    c.bench_function("BlockCoefficients/derive", |b| {
        b.iter(|| black_box(BlockCoefficients::derive(black_box(&params), &tuning)))
    });
}

criterion_group!(benches, bench_default, bench_full_featured, bench_derive);

criterion_main!(benches);
