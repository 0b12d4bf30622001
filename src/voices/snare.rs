//! Snare drum voice (SD).
//!
//! Two triangle "heads" tuned a ratio apart, plus a band of filtered noise
//! for the wires.
//!
//! # How It Works
//!
//! 1. Triangles at 180 Hz and 330 Hz × tuning, mixed at 0.5·tone and
//!    0.3·tone
//! 2. Noise through a 700 Hz high-pass and a 1.5 kHz band-pass, mixed at
//!    0.6·snappy and fading over 200 ms
//! 3. Master gain decays over 250 ms
//!
//! # Variations
//!
//! - Snappy up, tone down = thin, wiry snare
//! - Tone up, snappy down = tom-like body

use crate::{
    dsp::Waveform,
    graph::{GraphError, GraphExt, SignalGraph},
    voices::{VoiceOutput, VoiceSettings},
};

const BODY_HZ: f32 = 180.0;
const OVERTONE_HZ: f32 = 330.0;
const WINDOW: f64 = 0.25;
const NOISE_WINDOW: f64 = 0.2;
const STOP: f64 = 0.3;

pub fn snare<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    let amp = settings.amplitude();
    let master = graph.gain(amp)?;

    let body = graph.oscillator(Waveform::Triangle, BODY_HZ * settings.tuning)?;
    let body_gain = graph.gain(0.5 * settings.tone)?;
    graph.chain(&[body, body_gain, master])?;

    let overtone = graph.oscillator(Waveform::Triangle, OVERTONE_HZ * settings.tuning)?;
    let overtone_gain = graph.gain(0.3 * settings.tone)?;
    graph.chain(&[overtone, overtone_gain, master])?;

    let wires = graph.noise_for(WINDOW as f32)?;
    let hp = graph.highpass(700.0, 1.0)?;
    let bp = graph.bandpass(1500.0, 1.0)?;
    let wires_gain = graph.gain(0.0)?;
    graph.chain(&[wires, hp, bp, wires_gain, master])?;

    let snappy = 0.6 * settings.snappy;
    if snappy > 0.0 {
        graph.decay_envelope(wires_gain.gain(), snappy, time, NOISE_WINDOW)?;
    }

    graph.connect_output(master)?;
    graph.decay_envelope(master.gain(), amp, time, WINDOW)?;

    graph.play(body, time, time + STOP)?;
    graph.play(overtone, time, time + STOP)?;
    graph.start(wires, time)?;

    Ok(VoiceOutput {
        gain: master.gain(),
        end: time + WINDOW,
    })
}
