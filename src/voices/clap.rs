//! Hand clap voice (CP).
//!
//! Several hands that never quite land together.
//!
//! # How It Works
//!
//! 1. Four 500-sample noise bursts (τ = 50 samples) at 0, 12, 24 and 36 ms
//! 2. Each burst through its own 2 kHz band-pass, Q 2
//! 3. Each burst has its own gain at 0.25 × level × accent, decaying over
//!    150 ms from its own onset
//!
//! The staggered onsets are what make it read as a clap rather than a
//! single noise hit.

use crate::{
    graph::{GraphError, GraphExt, NodeId, SignalGraph},
    voices::{VoiceOutput, VoiceSettings},
};

const OFFSETS: [f64; 4] = [0.0, 0.012, 0.024, 0.036];
const BURST_SAMPLES: usize = 500;
const BURST_DECAY: f32 = 50.0;
const BURST_WINDOW: f64 = 0.15;
const BURST_LEVEL: f32 = 0.25;

pub fn clap<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    let amp = BURST_LEVEL * settings.amplitude();

    let mut first: Option<NodeId> = None;
    for offset in OFFSETS {
        let onset = time + offset;

        let burst = graph.noise_burst(BURST_SAMPLES, Some(BURST_DECAY))?;
        let bp = graph.bandpass(2000.0, 2.0)?;
        let vca = graph.gain(0.0)?;
        graph.chain(&[burst, bp, vca])?;
        graph.connect_output(vca)?;

        graph.decay_envelope(vca.gain(), amp, onset, BURST_WINDOW)?;
        graph.start(burst, onset)?;

        first.get_or_insert(vca);
    }

    let gain = first.ok_or(GraphError::EmptyChain)?.gain();
    Ok(VoiceOutput {
        gain,
        end: time + OFFSETS[OFFSETS.len() - 1] + BURST_WINDOW,
    })
}
