//! Low-level DSP primitives used by the graph renderer.
//!
//! These components are allocation-free per sample and realtime-safe. They
//! stay focused on the signal-processing math; the renderer in
//! [`crate::graph::render`] wires them into per-trigger voice graphs.

/// Timestamped parameter automation (set / ramp / cancel-and-hold).
pub mod automation;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Seeded white-noise bursts.
pub mod noise;
/// Periodic tone generators.
pub mod oscillator;

pub use automation::{AutomationCurve, AutomationEvent, AutomationKind, SILENCE_FLOOR};
pub use filter::{FilterType, SVFilter};
pub use noise::NoiseBurst;
pub use oscillator::{Oscillator, Waveform};
