//! Open hi-hat voice (OH).
//!
//! Same bank and filtering as the closed hat with a longer gate,
//! 0.49·(0.5 + decay) seconds. Triggering it chokes a ringing closed hat.

use crate::{
    graph::{GraphError, SignalGraph},
    voices::{
        metal::{metal, MetalShape},
        VoiceOutput, VoiceSettings,
    },
};

pub fn openhat<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    metal(graph, time, settings, MetalShape::open_hat(settings))
}
