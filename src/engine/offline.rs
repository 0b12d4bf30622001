use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::{
    config::EngineConfig,
    engine::{
        player::PatternPlayer,
        scheduler::{Scheduler, Tempo},
    },
    graph::{queue, GraphRenderer},
    sequencing::{Pattern, PatternBank, PatternSlot, STEPS},
    voices::SharedVoiceParams,
    Error,
};

/*
Offline Bounce
==============

Renders a pattern to a buffer using exactly the live wiring:

    Scheduler ─► PatternPlayer ─► QueuedGraph ══ring══► GraphFeed ─► GraphRenderer

The only difference is the clock. Instead of a polling thread reading the
audio clock, the bounce loop alternates between "poll" and "render one
block", so the scheduler sees the renderer's frame counter move exactly as
it would with a sound card attached:

    loop:
        scheduler.tick(renderer time)    schedule up to now + look-ahead
        feed.drain_into(renderer)        hand the commands to the renderer
        renderer.render(block)           advance the audio clock

A block must not be longer than the look-ahead, or steps would be
scheduled in the past. `EngineConfig::validate` keeps blocks far shorter.
*/

/// Seconds rendered after the last step so long voices can ring out.
pub const DEFAULT_TAIL: f64 = 3.0;

/// Render `bars` repetitions of `pattern` plus a tail into a mono buffer.
pub fn bounce(
    pattern: &Pattern,
    params: SharedVoiceParams,
    config: &EngineConfig,
    bars: usize,
    tail: f64,
) -> Result<Vec<f32>, Error> {
    config.validate()?;
    pattern.validate()?;
    let tempo = Tempo::new(pattern.bpm)?;

    let mut bank = PatternBank::new();
    bank.replace(PatternSlot::A, pattern.clone())?;
    bank.select(PatternSlot::A);

    let (graph, mut feed) = queue::channel(config.queue_capacity, config.sample_rate);
    let mut renderer = GraphRenderer::with_capacity(config.sample_rate, config.max_nodes)
        .with_master_gain(config.master_gain);
    let mut player = PatternPlayer::new(graph, Arc::new(RwLock::new(bank)), params);

    let total_steps = bars * STEPS;
    let length = total_steps as f64 * tempo.step_duration() + tail.max(0.0);
    let total_frames = (length * config.sample_rate as f64).ceil() as usize;

    let mut scheduler = Scheduler::new(config.lookahead);
    let stop = scheduler.stop_handle();
    let dispatched = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&dispatched);

    scheduler.start(0.0, tempo, move |step: usize, time: f64| {
        player.play_step(step, time);
        if counter.fetch_add(1, Ordering::Relaxed) + 1 >= total_steps {
            stop.stop();
        }
    });
    if total_steps == 0 {
        scheduler.stop();
    }

    let mut out = vec![0.0; total_frames];
    let mut commands = 0;
    for block in out.chunks_mut(config.block_size) {
        scheduler.tick(renderer.current_time());
        commands += feed.drain_into(&mut renderer);
        renderer.render(block);
    }

    info!(
        "bounced {} steps ({length:.2}s, {commands} graph commands)",
        dispatched.load(Ordering::Relaxed),
    );
    Ok(out)
}

/// Write a mono buffer as 16-bit PCM.
pub fn write_wav(path: impl AsRef<Path>, samples: &[f32], sample_rate: u32) -> Result<(), Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Instrument;

    fn config() -> EngineConfig {
        EngineConfig {
            sample_rate: 16_000.0,
            ..EngineConfig::default()
        }
    }

    fn onset(samples: &[f32], from: usize) -> Option<usize> {
        samples[from..]
            .iter()
            .position(|x| x.abs() > 1e-3)
            .map(|i| i + from)
    }

    #[test]
    fn empty_pattern_is_silent() {
        let params = SharedVoiceParams::default();
        let out = bounce(&Pattern::empty(), params, &config(), 1, 0.0).unwrap();
        assert_eq!(out.len(), 32_000);
        assert!(out.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn hits_land_on_their_steps() {
        // 120 BPM: step 8 is one second in
        let pattern = Pattern::new("t", 120.0).with_steps(Instrument::Rimshot, &[0, 8]);
        let out = bounce(&pattern, SharedVoiceParams::default(), &config(), 1, 0.5).unwrap();

        assert!(onset(&out, 0).is_some_and(|i| i < 10));
        let second = onset(&out, 8_000).unwrap();
        assert!((16_000..16_010).contains(&second), "second hit at {second}");
    }

    #[test]
    fn invalid_tempo_is_rejected() {
        let pattern = Pattern::new("t", 0.0);
        assert!(bounce(&pattern, SharedVoiceParams::default(), &config(), 1, 0.0).is_err());
    }
}
