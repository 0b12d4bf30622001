use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Source of the audio-clock time the scheduler polls against.
pub trait AudioClock: Send + Sync {
    /// Seconds of audio rendered so far.
    fn now(&self) -> f64;
}

/// Clock driven by the renderer's frame counter.
///
/// See [`GraphRenderer::frame_counter`](crate::graph::GraphRenderer::frame_counter).
#[derive(Debug, Clone)]
pub struct FrameClock {
    frames: Arc<AtomicU64>,
    sample_rate: f64,
}

impl FrameClock {
    pub fn new(frames: Arc<AtomicU64>, sample_rate: f32) -> Self {
        Self {
            frames,
            sample_rate: sample_rate as f64,
        }
    }
}

impl AudioClock for FrameClock {
    fn now(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate
    }
}

/// Clock moved by hand. Used by tests and offline rendering.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self(Arc::new(AtomicU64::new(start.to_bits())))
    }

    pub fn set(&self, time: f64) {
        self.0.store(time.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.now() + seconds);
    }
}

impl AudioClock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clock_converts_frames() {
        let frames = Arc::new(AtomicU64::new(0));
        let clock = FrameClock::new(Arc::clone(&frames), 48_000.0);
        frames.store(24_000, Ordering::Release);
        assert!((clock.now() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn manual_clock_moves_on_request() {
        let clock = ManualClock::new(1.0);
        let view = clock.clone();
        clock.advance(0.25);
        assert_eq!(view.now(), 1.25);
    }
}
