pub mod bank;
pub mod pattern;

pub use bank::{BankError, PatternBank, PatternSlot};
pub use pattern::{Pattern, PatternError, Steps, STEPS};

/// What the transport shows: updated once per dispatched step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Step most recently dispatched, 0..16.
    pub current_step: usize,
    pub bpm: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_step: 0,
            bpm: 120.0,
        }
    }
}
