//! Benchmarks for complete drum voices.
//!
//! Each iteration triggers a voice on a fresh renderer and renders the
//! first block, which is where a voice is most expensive: every node is
//! live and every envelope is still moving.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use saavy_rhythm::{graph::GraphRenderer, voices, voices::VoiceParams, Instrument};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let params = VoiceParams::new();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for instrument in Instrument::ALL {
            let settings = params.settings(instrument, 0.0);

            group.bench_with_input(BenchmarkId::new(instrument.code(), size), &size, |b, _| {
                b.iter_batched(
                    || {
                        let mut graph = GraphRenderer::new(SAMPLE_RATE);
                        voices::play(&mut graph, instrument, 0.0, &settings).unwrap();
                        graph
                    },
                    |mut graph| {
                        graph.render(black_box(&mut buffer));
                        graph
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        // === FULL KIT ===
        // Every voice at once: the worst case a single step can produce
        group.bench_with_input(BenchmarkId::new("full_kit", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let mut graph = GraphRenderer::new(SAMPLE_RATE);
                    for instrument in Instrument::ALL {
                        let settings = params.settings(instrument, 1.0);
                        voices::play(&mut graph, instrument, 0.0, &settings).unwrap();
                    }
                    graph
                },
                |mut graph| {
                    graph.render(black_box(&mut buffer));
                    graph
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
