//! Benchmarks for automation curve evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_rhythm::dsp::{AutomationCurve, SILENCE_FLOOR};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_automation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/automation");
    let dt = 1.0 / SAMPLE_RATE as f64;

    // A decay envelope: jump then exponential fall
    let mut decay = AutomationCurve::new(0.0);
    decay.set_value_at_time(1.0, 0.0);
    decay.exponential_ramp_to_value_at_time(SILENCE_FLOOR, 0.5);

    // A choked envelope: decay truncated and forced down
    let mut choked = decay.clone();
    choked.cancel_and_hold(0.05);
    choked.exponential_ramp_to_value_at_time(SILENCE_FLOOR, 0.053);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, curve) in [("decay", &decay), ("choked", &choked)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (i, sample) in buffer.iter_mut().enumerate() {
                        *sample = curve.value_at(black_box(0.04 + i as f64 * dt));
                    }
                })
            });
        }
    }

    group.finish();
}
