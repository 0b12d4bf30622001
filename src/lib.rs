//! Analog-style rhythm machine: a sixteen-step look-ahead sequencer driving
//! twelve synthesized drum voices.
//!
//! ```text
//!   PatternBank ─┐
//!                ├─► PatternPlayer ─► Coupling ─► voices ─► SignalGraph
//!   VoiceParams ─┘        ▲          (accent,     (recipes)   (render)
//!                         │           choke)
//!                     Scheduler ◄── poll (audio clock)
//! ```

pub mod config;
pub mod coupling;
pub mod dsp; // Oscillators, noise, filters and automation curves
pub mod engine; // Scheduling and playback
pub mod graph; // Signal-graph backend
pub mod instrument;
pub mod sequencing; // Patterns and pattern bank
pub mod voices; // The twelve drum voices

pub use config::{ConfigError, EngineConfig};
pub use instrument::Instrument;

use thiserror::Error;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Any error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] graph::GraphError),

    #[error(transparent)]
    Pattern(#[from] sequencing::PatternError),

    #[error(transparent)]
    Bank(#[from] sequencing::BankError),

    #[error(transparent)]
    Param(#[from] voices::ParamError),

    #[error(transparent)]
    Tempo(#[from] engine::TempoError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("wav export: {0}")]
    Wav(#[from] hound::Error),
}
