//! Timing: the look-ahead scheduler and what drives it.
//!
//! - [`scheduler::Scheduler`] turns polls into sample-accurate step times.
//! - [`player::PatternPlayer`] is the step handler that plays the pattern.
//! - [`driver::PollingDriver`] polls a scheduler on a background thread.
//! - [`offline::bounce`] renders a pattern to a buffer without a sound card.

pub mod clock;
pub mod driver;
#[cfg(feature = "rtrb")]
pub mod offline;
pub mod player;
pub mod scheduler;

pub use clock::{AudioClock, FrameClock, ManualClock};
pub use driver::PollingDriver;
pub use player::{PatternPlayer, SharedPlayback};
pub use scheduler::{Scheduler, StepHandler, StopHandle, Tempo, TempoError};
