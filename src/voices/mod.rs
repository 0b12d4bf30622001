//! The twelve percussion voices.
//!
//! Each voice is a function that builds a fresh signal graph for one
//! trigger and schedules its automation, with every time stamped relative
//! to the trigger time it is given. Voices keep no state between triggers:
//! everything they need arrives as a [`VoiceSettings`] snapshot.
//!
//! # Example
//!
//! ```ignore
//! use saavy_rhythm::{graph::GraphRenderer, voices, Instrument};
//!
//! let mut graph = GraphRenderer::new(48_000.0);
//! let settings = voices::VoiceParams::new().settings(Instrument::BassDrum, 0.0);
//! voices::play(&mut graph, Instrument::BassDrum, 0.0, &settings)?;
//!
//! let mut out = vec![0.0; 48_000];
//! graph.render(&mut out);
//! ```
//!
//! Every envelope is a jump to `level × accent` followed by an exponential
//! decay to [`SILENCE_FLOOR`](crate::dsp::SILENCE_FLOOR). Generators keep
//! running a little past the envelope and are then stopped, which lets the
//! backend collect the whole graph.

mod clap;
mod cowbell;
mod crash;
mod hihat;
mod kick;
pub mod metal;
mod openhat;
pub mod params;
mod ride;
mod rimshot;
mod snare;
mod tom;

pub use clap::clap;
pub use cowbell::cowbell;
pub use crash::crash;
pub use hihat::hihat;
pub use kick::kick;
pub use openhat::openhat;
pub use params::{ParamError, ParamKind, SharedVoiceParams, VoiceParams, VoiceSettings};
pub use ride::ride;
pub use rimshot::rimshot;
pub use snare::snare;
pub use tom::{tom, Tom};

use crate::{
    graph::{GraphError, ParamRef, SignalGraph},
    instrument::Instrument,
};

/// How long oscillators outlive their envelope, in seconds.
pub(crate) const GENERATOR_TAIL: f64 = 0.1;

/// What a trigger leaves behind for the coupling layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceOutput {
    /// The voice's output gain (the envelope stage).
    pub gain: ParamRef,
    /// When the envelope reaches the silence floor.
    pub end: f64,
}

/// Trigger `instrument` at audio-clock `time`.
pub fn play<G: SignalGraph + ?Sized>(
    graph: &mut G,
    instrument: Instrument,
    time: f64,
    settings: &VoiceSettings,
) -> Result<VoiceOutput, GraphError> {
    match instrument {
        Instrument::BassDrum => kick(graph, time, settings),
        Instrument::Snare => snare(graph, time, settings),
        Instrument::LowTom => tom(graph, time, settings, Tom::Low),
        Instrument::MidTom => tom(graph, time, settings, Tom::Mid),
        Instrument::HighTom => tom(graph, time, settings, Tom::High),
        Instrument::Rimshot => rimshot(graph, time, settings),
        Instrument::Clap => clap(graph, time, settings),
        Instrument::ClosedHat => hihat(graph, time, settings),
        Instrument::OpenHat => openhat(graph, time, settings),
        Instrument::Cymbal => crash(graph, time, settings),
        Instrument::Ride => ride(graph, time, settings),
        Instrument::Cowbell => cowbell(graph, time, settings),
    }
}
