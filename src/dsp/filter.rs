use std::f32::consts::{FRAC_1_SQRT_2, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      | used by                      |
| ----------------- | --------------- | ------------ | ---------------------------- |
| low-pass          | below cutoff    | above cutoff | bass drum body               |
| high-pass         | above cutoff    | below cutoff | bass drum click, snare, cymbal |
| band-pass         | around cutoff   | both sides   | toms, hats, clap, rimshot    |
| notch             | outside         | around       | -                            |

Topology-preserving (TPT) state-variable filter. All four responses come out
of the same two integrators; `k = 1 / Q` sets the damping.

The band-pass output is normalized (`k * v1`) so the peak gain at the centre
frequency is unity regardless of Q. A high-Q band-pass then behaves like a
resonator tuned to one partial instead of a boost, which is what the toms
rely on.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    q: f32,
    filter_type: FilterType,

    // Cached coefficients, recomputed when cutoff/Q/sample rate change
    g: f32,
    k: f32,
    coeff_rate: f32,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, q: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: q.max(0.01),
            filter_type,
            g: 0.0,
            k: 1.0,
            coeff_rate: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, FRAC_1_SQRT_2)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, FRAC_1_SQRT_2)
    }

    pub fn bandpass(cutoff_hz: f32, q: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz, q)
    }

    pub fn notch(cutoff_hz: f32, q: f32) -> Self {
        Self::new(FilterType::Notch, cutoff_hz, q)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    #[inline]
    fn update_coefficients(&mut self, sample_rate: f32) {
        // Keep the prewarped cutoff below Nyquist
        let cutoff = self.cutoff_hz.clamp(10.0, sample_rate * 0.49);
        self.g = (PI * cutoff / sample_rate).tan();
        self.k = 1.0 / self.q;
        self.coeff_rate = sample_rate;
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> FilterOutputs {
        let g = self.g;
        let k = self.k;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: k * v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter one sample with the configured response.
    #[inline]
    pub fn process(&mut self, sample: f32, sample_rate: f32) -> f32 {
        if self.coeff_rate != sample_rate {
            self.update_coefficients(sample_rate);
        }

        let outputs = self.next_sample(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        if cutoff != self.cutoff_hz {
            self.cutoff_hz = cutoff;
            // Force a recompute on the next sample
            self.coeff_rate = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Oscillator;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        let mut osc = Oscillator::sine();
        (0..len).map(|_| osc.next_sample(freq, SAMPLE_RATE)).collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer
            .get(skip..)
            .unwrap_or(buffer)
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_lowpass_basic() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer, SAMPLE_RATE);

        assert!(buffer[511] > 0.99);
    }

    #[test]
    fn test_highpass_basic() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer, SAMPLE_RATE);

        assert!(buffer[511].abs() < 0.001);
    }

    #[test]
    fn test_lowpass_filters_high_freq() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = sine(5_000.0, 1024);

        filter.render(&mut buffer, SAMPLE_RATE);

        let peak = peak_after_transient(&buffer);
        assert!(peak < 0.3, "Expected high freq attenuation, got peak: {peak}");
    }

    #[test]
    fn test_bandpass_has_unity_peak_at_centre() {
        let mut filter = SVFilter::bandpass(1_000.0, 10.0);
        let mut buffer = sine(1_000.0, 8_192);

        filter.render(&mut buffer, SAMPLE_RATE);

        let peak = peak_after_transient(&buffer[4_096..]);
        assert!(
            (peak - 1.0).abs() < 0.05,
            "band-pass should pass its centre at unity, got {peak}"
        );
    }

    #[test]
    fn test_bandpass_emphasizes_cutoff_frequency() {
        let mut filter = SVFilter::bandpass(1_000.0, 2.0);
        let mut pass_buffer = sine(1_000.0, 2_048);
        filter.render(&mut pass_buffer, SAMPLE_RATE);
        let pass_peak = peak_after_transient(&pass_buffer);

        filter.reset();
        let mut off_buffer = sine(200.0, 2_048);
        filter.render(&mut off_buffer, SAMPLE_RATE);
        let off_peak = peak_after_transient(&off_buffer);

        assert!(
            pass_peak > off_peak * 2.0,
            "expected bandpass to emphasize cutoff freq, got pass_peak={pass_peak}, off_peak={off_peak}"
        );
    }

    #[test]
    fn test_notch_rejects_cutoff_frequency() {
        let mut filter = SVFilter::notch(1_000.0, 2.0);
        let mut center_buffer = sine(1_000.0, 2_048);
        filter.render(&mut center_buffer, SAMPLE_RATE);
        let center_peak = peak_after_transient(&center_buffer);

        filter.reset();
        let mut off_buffer = sine(200.0, 2_048);
        filter.render(&mut off_buffer, SAMPLE_RATE);
        let off_peak = peak_after_transient(&off_buffer);

        assert!(
            center_peak * 2.0 < off_peak,
            "expected notch to reject center freq, got center_peak={center_peak}, off_peak={off_peak}"
        );
    }

    #[test]
    fn test_set_cutoff_affects_filtering() {
        let mut filter = SVFilter::lowpass(200.0);
        let mut buffer1 = sine(1_000.0, 1_024);
        filter.render(&mut buffer1, SAMPLE_RATE);
        let peak_low_cutoff = peak_after_transient(&buffer1);

        filter.reset();
        filter.set_cutoff(5_000.0);
        let mut buffer2 = sine(1_000.0, 1_024);
        filter.render(&mut buffer2, SAMPLE_RATE);
        let peak_high_cutoff = peak_after_transient(&buffer2);

        assert!(
            peak_high_cutoff > peak_low_cutoff * 2.0,
            "High cutoff should pass more signal: high={peak_high_cutoff}, low={peak_low_cutoff}"
        );
    }

    #[test]
    fn cutoff_above_nyquist_stays_stable() {
        let mut filter = SVFilter::bandpass(40_000.0, 2.0);
        let mut buffer = sine(7_000.0, 1_024);
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
