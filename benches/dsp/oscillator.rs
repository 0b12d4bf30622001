//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_rhythm::dsp::Oscillator;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, mut osc) in [
            // Sine - uses sin() transcendental function
            ("sine", Oscillator::sine()),
            // Triangle - absolute value
            ("triangle", Oscillator::triangle()),
            // Square - branch per sample, used six at a time by the metal bank
            ("square", Oscillator::square()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = osc.next_sample(black_box(440.0), SAMPLE_RATE);
                    }
                })
            });
        }
    }

    group.finish();
}
