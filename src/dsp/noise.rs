//! Deterministic noise bursts for clicks, snares, claps and rimshots.

/*
Noise Bursts
============

Percussive noise in the kit is never an endless hiss. Each voice asks for a
burst with a fixed length, optionally shaped by an exponential fade:

    sample[i] = white(i) * exp(-i / decay_samples)

  - Rimshot: 200 samples, decay 20 samples   (a sharp "tick")
  - Clap:    500 samples, decay 50 samples   (one of four slaps)
  - Snare:   0.25 s of flat noise            (the envelope lives on a gain node)

White noise comes from a 32-bit xorshift generator. It is cheap, allocation
free, and seeded per node so two renders of the same graph are identical.
*/

/// Seed used when a caller does not supply one. Must be non-zero.
pub const DEFAULT_SEED: u32 = 0x9E37_79B9;

pub struct NoiseBurst {
    state: u32,
    length: usize,
    decay_samples: Option<f32>,
    position: usize,
}

impl NoiseBurst {
    pub fn new(length: usize, decay_samples: Option<f32>, seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
            length,
            decay_samples: decay_samples.filter(|d| *d > 0.0),
            position: 0,
        }
    }

    #[inline]
    fn white(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        // Map to [-1, 1)
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    /// Next sample of the burst, or silence once it has run out.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }

        let i = self.position;
        self.position += 1;

        let white = self.white();
        match self.decay_samples {
            Some(decay) => white * (-(i as f32) / decay).exp(),
            None => white,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.length
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
