//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_rhythm::dsp::SVFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, mut filter) in [
            ("lowpass", SVFilter::lowpass(1000.0)),
            ("highpass", SVFilter::highpass(7000.0)),
            ("bandpass", SVFilter::bandpass(1000.0, 4.0)),
            ("notch", SVFilter::notch(1000.0, 1.0)),
        ] {
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), SAMPLE_RATE);
                })
            });
        }

        // Cutoff moving every sample, as under a filter sweep
        let mut filter = SVFilter::lowpass(1000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass_swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, sample) in buffer.iter_mut().enumerate() {
                    filter.set_cutoff(500.0 + i as f32);
                    *sample = filter.process(*sample, SAMPLE_RATE);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
