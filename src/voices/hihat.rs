//! Closed hi-hat voice (CH).
//!
//! The metal bank through both band-passes with a tight envelope:
//! 0.19·(0.5 + decay) seconds, so 190 ms at the default setting.
//!
//! Its output gain is what the open hat chokes; see
//! [`coupling::choke`](crate::coupling::choke).

use crate::{
    graph::{GraphError, SignalGraph},
    voices::{
        metal::{metal, MetalShape},
        VoiceOutput, VoiceSettings,
    },
};

pub fn hihat<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    metal(graph, time, settings, MetalShape::closed_hat(settings))
}
