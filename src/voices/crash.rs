//! Cymbal voice (CY).
//!
//! The metal bank with an extra high-pass at 3000 + 4000·tone Hz for
//! sizzle, ringing for 1.2·(0.5 + decay) seconds.

use crate::{
    graph::{GraphError, SignalGraph},
    voices::{
        metal::{metal, MetalShape},
        VoiceOutput, VoiceSettings,
    },
};

pub fn crash<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    metal(graph, time, settings, MetalShape::cymbal(settings))
}
