//! Cowbell voice (CB).
//!
//! Two squares at 540 and 800 Hz summed into a 1.5 kHz band-pass (Q 2),
//! decaying over 350 ms. The non-integer ratio between the two is the
//! whole sound.

use crate::{
    dsp::Waveform,
    graph::{GraphError, GraphExt, SignalGraph},
    voices::{VoiceOutput, VoiceSettings, GENERATOR_TAIL},
};

const PITCHES: [f32; 2] = [540.0, 800.0];
const MIX: f32 = 0.5;
const WINDOW: f64 = 0.35;

pub fn cowbell<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    let amp = settings.amplitude();

    let mix = graph.gain(MIX)?;
    let bp = graph.bandpass(1500.0, 2.0)?;
    let vca = graph.gain(amp)?;
    graph.chain(&[mix, bp, vca])?;
    graph.connect_output(vca)?;

    for pitch in PITCHES {
        let osc = graph.oscillator(Waveform::Square, pitch)?;
        graph.connect(osc, mix)?;
        graph.play(osc, time, time + WINDOW + GENERATOR_TAIL)?;
    }

    graph.decay_envelope(vca.gain(), amp, time, WINDOW)?;

    Ok(VoiceOutput {
        gain: vca.gain(),
        end: time + WINDOW,
    })
}
