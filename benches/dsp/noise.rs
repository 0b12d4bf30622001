//! Benchmarks for noise burst playback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_rhythm::dsp::NoiseBurst;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut white = NoiseBurst::new(usize::MAX, None, 7);
        group.bench_with_input(BenchmarkId::new("white", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = white.next_sample();
                }
                black_box(&buffer);
            })
        });

        // Self-decaying burst, as used by the clap and rimshot
        let mut burst = NoiseBurst::new(usize::MAX, Some(50.0), 7);
        group.bench_with_input(BenchmarkId::new("decaying", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = burst.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
