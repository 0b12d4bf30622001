//! Benchmarks for whole-pattern playback.

use std::{
    hint::black_box,
    sync::{Arc, RwLock},
};

use criterion::{BatchSize, Criterion};
use saavy_rhythm::{
    engine::{offline, PatternPlayer},
    graph::GraphRenderer,
    sequencing::{Pattern, PatternBank, STEPS},
    voices::SharedVoiceParams,
    EngineConfig, Instrument,
};

use crate::SAMPLE_RATE;

fn busy_pattern() -> Pattern {
    Pattern::new("busy", 132.0)
        .with_steps(Instrument::BassDrum, &[0, 3, 8, 11])
        .with_steps(Instrument::Snare, &[4, 12])
        .with_steps(Instrument::Clap, &[4, 12])
        .with_steps(Instrument::ClosedHat, &[0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13])
        .with_steps(Instrument::OpenHat, &[3, 7, 11, 14])
        .with_steps(Instrument::LowTom, &[13])
        .with_steps(Instrument::MidTom, &[14])
        .with_steps(Instrument::HighTom, &[15])
        .with_steps(Instrument::Cowbell, &[2, 10])
        .with_steps(Instrument::Ride, &[0, 4, 8, 12])
        .with_accents(&[0, 8])
}

pub fn bench_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pattern");
    group.sample_size(10);

    // Control-thread cost of one bar of triggers, no rendering
    group.bench_function("schedule_bar", |b| {
        b.iter_batched(
            || {
                let mut bank = PatternBank::new();
                *bank.current_mut() = busy_pattern();
                PatternPlayer::new(
                    GraphRenderer::new(SAMPLE_RATE),
                    Arc::new(RwLock::new(bank)),
                    SharedVoiceParams::default(),
                )
            },
            |mut player| {
                for step in 0..STEPS {
                    black_box(player.play_step(step, step as f64 * 0.1));
                }
                player
            },
            BatchSize::SmallInput,
        )
    });

    // The full live path: scheduler, command ring, renderer
    let config = EngineConfig {
        sample_rate: SAMPLE_RATE,
        ..EngineConfig::default()
    };
    let pattern = busy_pattern();
    group.bench_function("bounce_bar", |b| {
        b.iter(|| {
            offline::bounce(
                black_box(&pattern),
                SharedVoiceParams::default(),
                &config,
                1,
                0.0,
            )
            .unwrap()
        })
    });

    group.finish();
}
