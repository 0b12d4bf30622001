//! Bass drum voice (BD).
//!
//! A sine body with a fast pitch drop, plus a short filtered noise click on
//! the attack.
//!
//! # How It Works
//!
//! 1. Sine oscillator starts at 140 Hz × tuning and glides exponentially
//!    down to 56 Hz × tuning over the first 40 ms (the "punch")
//! 2. Low-pass at 1500 + 500·tone Hz keeps the body round
//! 3. 10 ms noise click through a 2 kHz high-pass gives the beater attack
//! 4. Master gain decays from `level × accent` to silence over
//!    0.1 + 0.9·decay seconds
//!
//! # Variations
//!
//! - Decay near 1.0 = long boomy 808 tail
//! - Tone up = brighter body, more click in the mix
//! - Tuning below 1.0 = sub-heavy kick

use std::f32::consts::FRAC_1_SQRT_2;

use crate::{
    dsp::Waveform,
    graph::{GraphError, GraphExt, SignalGraph},
    voices::{VoiceOutput, VoiceSettings, GENERATOR_TAIL},
};

const START_HZ: f32 = 140.0;
const REST_HZ: f32 = 56.0;
const DROP_TIME: f64 = 0.04;
const CLICK_TIME: f32 = 0.01;
const CLICK_LEVEL: f32 = 0.3;

/// Decay window in seconds for a `decay` knob position.
pub fn decay_window(decay: f32) -> f64 {
    0.1 + 0.9 * decay as f64
}

pub fn kick<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    let window = decay_window(settings.decay);
    let amp = settings.amplitude();

    let body = graph.oscillator(Waveform::Sine, START_HZ * settings.tuning)?;
    let lp = graph.lowpass(1500.0 + 500.0 * settings.tone)?;
    let vca = graph.gain(amp)?;
    graph.chain(&[body, lp, vca])?;
    graph.pitch_drop(
        body.frequency(),
        START_HZ * settings.tuning,
        REST_HZ * settings.tuning,
        time,
        DROP_TIME,
    )?;

    let click = graph.noise_for(CLICK_TIME)?;
    let hp = graph.highpass(2000.0, FRAC_1_SQRT_2)?;
    let click_gain = graph.gain(CLICK_LEVEL)?;
    graph.chain(&[click, hp, click_gain, vca])?;

    graph.connect_output(vca)?;
    graph.decay_envelope(vca.gain(), amp, time, window)?;

    graph.play(body, time, time + window + GENERATOR_TAIL)?;
    graph.start(click, time)?;

    Ok(VoiceOutput {
        gain: vca.gain(),
        end: time + window,
    })
}
