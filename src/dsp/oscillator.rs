use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Tone Generators
===============

Every pitched sound in the kit starts from one of three periodic waveforms.
They differ only in how much harmonic content they carry, which decides how
much work the filters downstream have to do.

Sine: a single partial, no overtones.
  - Bass drum body. The "boom" is almost pure fundamental.

Triangle: odd harmonics falling off as 1/n².
  - Snare heads and toms. Soft enough to sound like a skin, with just a
    little edge for the band-pass resonator to catch.

Square: odd harmonics falling off as 1/n.
  - The metal section. Six detuned squares summed together produce a dense,
    inharmonic cluster; band-pass filtering around 3-7 kHz turns that cluster
    into hats and cymbals. The cowbell is the same trick with two squares.

Phase is kept in [0, 1) and advanced by `frequency / sample_rate` each
sample, so the frequency can change every sample (pitch sweeps) without
discontinuities.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            Waveform::Sine => (TAU * self.phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        value
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let frequency = 440.0;
        let mut osc = Oscillator::sine();

        let samples: Vec<f32> = (0..64)
            .map(|_| osc.next_sample(frequency, sample_rate))
            .collect();

        let sample_index = 12;
        let expected = (TAU * frequency * sample_index as f32 / sample_rate).sin();
        let actual = samples[sample_index];
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn square_alternates_between_rails() {
        let mut osc = Oscillator::square();
        // 4 samples per cycle
        let samples: Vec<f32> = (0..8).map(|_| osc.next_sample(250.0, 1_000.0)).collect();
        assert_eq!(samples, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn triangle_stays_in_range() {
        let mut osc = Oscillator::triangle();
        for _ in 0..1_000 {
            let s = osc.next_sample(180.0, 48_000.0);
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn phase_survives_frequency_sweep() {
        let mut osc = Oscillator::sine();
        let mut freq = 150.0;
        for _ in 0..4_800 {
            let s = osc.next_sample(freq, 48_000.0);
            assert!(s.is_finite());
            freq *= 0.9999;
        }
    }
}
