//! Tom voices (LT, MT, HT).
//!
//! A triangle ringing through a high-Q band-pass centred on its own pitch,
//! with a small downward bend on the strike.
//!
//! # How It Works
//!
//! 1. Triangle starts at the tom's base pitch × tuning
//! 2. Glides down to the resting pitch over 15 ms
//! 3. Band-pass at the base pitch, Q 10, makes it ring like a membrane
//! 4. Gain decays over 0.22 + 0.18·decay seconds

use crate::{
    dsp::Waveform,
    graph::{GraphError, GraphExt, SignalGraph},
    voices::{VoiceOutput, VoiceSettings, GENERATOR_TAIL},
};

const GLIDE_TIME: f64 = 0.015;
const RESONANCE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tom {
    Low,
    Mid,
    High,
}

impl Tom {
    /// Strike and resting pitch in Hz at tuning 1.0.
    pub fn pitches(self) -> (f32, f32) {
        match self {
            Tom::Low => (130.0, 120.0),
            Tom::Mid => (200.0, 185.0),
            Tom::High => (325.0, 300.0),
        }
    }
}

pub fn decay_window(decay: f32) -> f64 {
    0.22 + 0.18 * decay as f64
}

pub fn tom<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
    tom: Tom,
) -> Result<VoiceOutput, GraphError> {
    let (strike, rest) = tom.pitches();
    let strike = strike * settings.tuning;
    let rest = rest * settings.tuning;
    let window = decay_window(settings.decay);
    let amp = settings.amplitude();

    let osc = graph.oscillator(Waveform::Triangle, strike)?;
    let bp = graph.bandpass(strike, RESONANCE)?;
    let vca = graph.gain(amp)?;
    graph.chain(&[osc, bp, vca])?;
    graph.connect_output(vca)?;

    graph.pitch_drop(osc.frequency(), strike, rest, time, GLIDE_TIME)?;
    graph.decay_envelope(vca.gain(), amp, time, window)?;
    graph.play(osc, time, time + window + GENERATOR_TAIL)?;

    Ok(VoiceOutput {
        gain: vca.gain(),
        end: time + window,
    })
}
