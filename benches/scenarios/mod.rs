//! Real-world scenario benchmarks.
//!
//! These benchmarks model actual usage: single drum hits rendered through
//! the graph renderer, and whole patterns driven by the scheduler.

mod pattern;
mod voices;

pub use pattern::bench_pattern;
pub use voices::bench_voices;
