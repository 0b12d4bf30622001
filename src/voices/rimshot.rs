//! Rimshot voice (RS).
//!
//! A 200-sample noise impulse (fading with τ = 20 samples) rung through a
//! 2.5 kHz band-pass at Q 5. Gone in 30 ms.

use crate::{
    graph::{GraphError, GraphExt, SignalGraph},
    voices::{VoiceOutput, VoiceSettings},
};

const IMPULSE_SAMPLES: usize = 200;
const IMPULSE_DECAY: f32 = 20.0;
const WINDOW: f64 = 0.03;

pub fn rimshot<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    let amp = settings.amplitude();

    let impulse = graph.noise_burst(IMPULSE_SAMPLES, Some(IMPULSE_DECAY))?;
    let bp = graph.bandpass(2500.0, 5.0)?;
    let vca = graph.gain(amp)?;
    graph.chain(&[impulse, bp, vca])?;
    graph.connect_output(vca)?;

    graph.decay_envelope(vca.gain(), amp, time, WINDOW)?;
    graph.start(impulse, time)?;

    Ok(VoiceOutput {
        gain: vca.gain(),
        end: time + WINDOW,
    })
}
