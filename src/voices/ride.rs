//! Ride voice (RD).
//!
//! The metal bank with the upper band-pass moved by `tone`
//! (7.1 kHz × (0.75 + 0.5·tone)) and the longest tail in the kit,
//! 1.9·(0.5 + decay) seconds.

use crate::{
    graph::{GraphError, SignalGraph},
    voices::{
        metal::{metal, MetalShape},
        VoiceOutput, VoiceSettings,
    },
};

pub fn ride<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    metal(graph, time, settings, MetalShape::ride(settings))
}
