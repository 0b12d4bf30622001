use std::f32::consts::FRAC_1_SQRT_2;

use crate::{
    dsp::{AutomationEvent, FilterType, Waveform, SILENCE_FLOOR},
    graph::{GraphError, NodeId, NodeSpec, ParamRef, SignalGraph},
};

/// Fluent helpers on top of [`SignalGraph`].
///
/// Voice code reads as a recipe:
///
/// ```ignore
/// let osc = graph.oscillator(Waveform::Triangle, 200.0)?;
/// let bp = graph.bandpass(200.0, 10.0)?;
/// let vca = graph.gain(0.0)?;
/// graph.chain(&[osc, bp, vca])?;
/// graph.connect_output(vca)?;
/// graph.decay_envelope(vca.gain(), 0.9, time, 0.28)?;
/// graph.play(osc, time, time + 0.38)?;
/// ```
pub trait GraphExt: SignalGraph {
    fn oscillator(&mut self, waveform: Waveform, frequency: f32) -> Result<NodeId, GraphError> {
        self.create(NodeSpec::Oscillator {
            waveform,
            frequency,
        })
    }

    /// Noise burst `length` samples long, faded by `exp(-i / decay_samples)`.
    fn noise_burst(
        &mut self,
        length: usize,
        decay_samples: Option<f32>,
    ) -> Result<NodeId, GraphError> {
        self.create(NodeSpec::Noise {
            length,
            decay_samples,
        })
    }

    /// Flat noise lasting `seconds` at the graph's sample rate.
    fn noise_for(&mut self, seconds: f32) -> Result<NodeId, GraphError> {
        let length = (seconds * self.sample_rate()).round().max(1.0) as usize;
        self.noise_burst(length, None)
    }

    fn filter(&mut self, kind: FilterType, frequency: f32, q: f32) -> Result<NodeId, GraphError> {
        self.create(NodeSpec::Filter { kind, frequency, q })
    }

    fn lowpass(&mut self, frequency: f32) -> Result<NodeId, GraphError> {
        self.filter(FilterType::LowPass, frequency, FRAC_1_SQRT_2)
    }

    fn highpass(&mut self, frequency: f32, q: f32) -> Result<NodeId, GraphError> {
        self.filter(FilterType::HighPass, frequency, q)
    }

    fn bandpass(&mut self, frequency: f32, q: f32) -> Result<NodeId, GraphError> {
        self.filter(FilterType::BandPass, frequency, q)
    }

    fn gain(&mut self, gain: f32) -> Result<NodeId, GraphError> {
        self.create(NodeSpec::Gain { gain })
    }

    /// Connect nodes in series and return the last one.
    fn chain(&mut self, nodes: &[NodeId]) -> Result<NodeId, GraphError> {
        for pair in nodes.windows(2) {
            self.connect(pair[0], pair[1])?;
        }
        nodes.last().copied().ok_or(GraphError::EmptyChain)
    }

    fn set_value_at_time(
        &mut self,
        param: ParamRef,
        value: f32,
        time: f64,
    ) -> Result<(), GraphError> {
        self.schedule(param, AutomationEvent::set(value, time))
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        param: ParamRef,
        value: f32,
        time: f64,
    ) -> Result<(), GraphError> {
        self.schedule(param, AutomationEvent::exponential_ramp(value, time))
    }

    /// Jump to `peak` at `time`, then decay exponentially to the silence
    /// floor over `window` seconds.
    fn decay_envelope(
        &mut self,
        param: ParamRef,
        peak: f32,
        time: f64,
        window: f64,
    ) -> Result<(), GraphError> {
        self.set_value_at_time(param, peak, time)?;
        self.exponential_ramp_to_value_at_time(param, SILENCE_FLOOR, time + window)
    }

    /// Exponential glide from `from` to `to` starting at `time`.
    fn pitch_drop(
        &mut self,
        param: ParamRef,
        from: f32,
        to: f32,
        time: f64,
        duration: f64,
    ) -> Result<(), GraphError> {
        self.set_value_at_time(param, from, time)?;
        self.exponential_ramp_to_value_at_time(param, to, time + duration)
    }

    /// Start a source at `start` and stop it at `stop`.
    fn play(&mut self, node: NodeId, start: f64, stop: f64) -> Result<(), GraphError> {
        self.start(node, start)?;
        self.stop(node, stop)
    }
}

impl<G: SignalGraph + ?Sized> GraphExt for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphRenderer;

    #[test]
    fn chain_returns_last_node() {
        let mut graph = GraphRenderer::new(48_000.0);
        let osc = graph.oscillator(Waveform::Sine, 100.0).unwrap();
        let lp = graph.lowpass(500.0).unwrap();
        let vca = graph.gain(1.0).unwrap();

        assert_eq!(graph.chain(&[osc, lp, vca]).unwrap(), vca);
    }

    #[test]
    fn empty_chain_is_an_error() {
        let mut graph = GraphRenderer::new(48_000.0);
        assert!(graph.chain(&[]).is_err());
    }

    #[test]
    fn decay_envelope_lands_on_floor() {
        let mut graph = GraphRenderer::new(48_000.0);
        let vca = graph.gain(0.0).unwrap();
        graph.decay_envelope(vca.gain(), 0.8, 1.0, 0.2).unwrap();

        assert_eq!(graph.param_value(vca.gain(), 1.0).unwrap(), 0.8);
        let end = graph.param_value(vca.gain(), 1.2).unwrap();
        assert!((end - SILENCE_FLOOR).abs() < 1e-7);
    }

    #[test]
    fn noise_for_uses_sample_rate() {
        let mut graph = GraphRenderer::new(1_000.0);
        let noise = graph.noise_for(0.25).unwrap();
        assert_eq!(graph.noise_length(noise), Some(250));
    }
}
