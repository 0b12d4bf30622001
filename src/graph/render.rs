use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use log::{debug, trace};

use crate::{
    dsp::{AutomationCurve, AutomationEvent, NoiseBurst, Oscillator, SVFilter},
    graph::{GraphError, NodeId, NodeSpec, Param, ParamRef, SignalGraph},
    MAX_BLOCK_SIZE,
};

/*
Graph Renderer
==============

Realizes the graphs voices describe and mixes them into blocks of samples.

Each trigger adds a handful of nodes. Nothing is ever "released" by the
voice: source nodes carry their own start/stop times, and once a source has
stopped (or a noise burst has run dry) the renderer removes it. Processing
nodes that were fed only by removed nodes go with them, so a finished voice
disappears from the graph a block or two after its generators stop.

Nodes live in a fixed pool allocated up front:

    slots   [ osc | vca | free | bp | free | ... ]   output buffer per slot
    index   [(#3, 0), (#4, 1), (#7, 3), ...]         node id → slot, sorted
    free    [4, 2, ...]                              recycled slot numbers

Creating a node takes a free slot, collecting it gives the slot back.
Buffers, automation storage and scratch lists are reused, so applying
commands and rendering blocks does not allocate once the pool is warm.

Per block:

  1. Rebuild the processing order if the topology changed. Inputs always
     come before the nodes they feed (depth-first post-order over inputs).
  2. For each node, sum its inputs into a scratch buffer and process it
     into the node's own output buffer, evaluating automation at the exact
     audio-clock time of every sample.
  3. Sum every node routed to the output into the destination block.
  4. Advance the frame counter (the audio clock) and collect finished nodes.

Time is derived from the frame counter, never from a wall clock:

    t(sample i of block) = (frames_rendered + i) / sample_rate
*/

/// Pool size used by [`GraphRenderer::new`].
pub const DEFAULT_NODE_CAPACITY: usize = 512;

/// Input list capacity reserved per slot; the metal bank needs six.
const SLOT_INPUTS: usize = 8;

enum NodeKind {
    Oscillator(Oscillator),
    Noise(NoiseBurst),
    Filter(SVFilter),
    Gain,
}

struct NodeSlot {
    id: NodeId,
    live: bool,
    kind: NodeKind,
    /// Frequency for oscillators and filters, gain for gain stages
    curve: AutomationCurve,
    inputs: Vec<usize>,
    had_input: bool,
    to_output: bool,
    start: Option<f64>,
    stop: Option<f64>,
    output: Vec<f32>,
}

impl NodeSlot {
    fn vacant() -> Self {
        Self {
            id: NodeId(0),
            live: false,
            kind: NodeKind::Gain,
            curve: AutomationCurve::new(0.0),
            inputs: Vec::with_capacity(SLOT_INPUTS),
            had_input: false,
            to_output: false,
            start: None,
            stop: None,
            output: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Turn a vacant slot into a fresh node, keeping its storage.
    fn occupy(&mut self, id: NodeId, spec: NodeSpec, seed: u32) {
        let (kind, default_value) = match spec {
            NodeSpec::Oscillator {
                waveform,
                frequency,
            } => (NodeKind::Oscillator(Oscillator::new(waveform)), frequency),
            NodeSpec::Noise {
                length,
                decay_samples,
            } => (NodeKind::Noise(NoiseBurst::new(length, decay_samples, seed)), 0.0),
            NodeSpec::Filter { kind, frequency, q } => {
                (NodeKind::Filter(SVFilter::new(kind, frequency, q)), frequency)
            }
            NodeSpec::Gain { gain } => (NodeKind::Gain, gain),
        };

        self.id = id;
        self.live = true;
        self.kind = kind;
        self.curve.reset(default_value);
        self.inputs.clear();
        self.had_input = false;
        self.to_output = false;
        self.start = None;
        self.stop = None;
    }

    fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Oscillator(_) | NodeKind::Noise(_))
    }

    fn has_param(&self, param: Param) -> bool {
        matches!(
            (&self.kind, param),
            (NodeKind::Oscillator(_) | NodeKind::Filter(_), Param::Frequency)
                | (NodeKind::Gain, Param::Gain)
        )
    }

    fn curve_mut(&mut self, param: Param) -> Option<&mut AutomationCurve> {
        self.has_param(param).then_some(&mut self.curve)
    }

    fn curve(&self, param: Param) -> Option<&AutomationCurve> {
        self.has_param(param).then_some(&self.curve)
    }

    /// Whether a source can never produce signal again after `time`.
    fn is_finished(&self, time: f64) -> bool {
        if self.stop.is_some_and(|stop| stop <= time) {
            return true;
        }
        match &self.kind {
            NodeKind::Noise(burst) => burst.is_finished(),
            _ => false,
        }
    }

    fn process(&mut self, input: &[f32], block_start: u64, sample_rate: f32) {
        let frames = input.len();
        let rate = sample_rate as f64;
        let time_of = |i: usize| (block_start + i as u64) as f64 / rate;

        let start = self.start;
        let stop = self.stop;
        let sounding = |t: f64| start.is_some_and(|s| t >= s) && stop.map_or(true, |e| t < e);

        let curve = &self.curve;
        let out = &mut self.output[..frames];
        match &mut self.kind {
            NodeKind::Oscillator(osc) => {
                for (i, o) in out.iter_mut().enumerate() {
                    let t = time_of(i);
                    *o = if sounding(t) {
                        let freq = curve.value_at(t).clamp(1.0, sample_rate * 0.49);
                        osc.next_sample(freq, sample_rate)
                    } else {
                        0.0
                    };
                }
            }
            NodeKind::Noise(burst) => {
                for (i, o) in out.iter_mut().enumerate() {
                    *o = if sounding(time_of(i)) {
                        burst.next_sample()
                    } else {
                        0.0
                    };
                }
            }
            NodeKind::Filter(filter) => {
                for (i, (o, x)) in out.iter_mut().zip(input).enumerate() {
                    filter.set_cutoff(curve.value_at(time_of(i)));
                    *o = filter.process(*x, sample_rate);
                }
            }
            NodeKind::Gain => {
                for (i, (o, x)) in out.iter_mut().zip(input).enumerate() {
                    *o = *x * curve.value_at(time_of(i));
                }
            }
        }
    }
}

/// Offline/real-time renderer for voice graphs.
pub struct GraphRenderer {
    sample_rate: f32,
    frames: u64,
    clock: Arc<AtomicU64>,
    slots: Vec<NodeSlot>,
    free: Vec<usize>,
    index: Vec<(NodeId, usize)>,
    next_id: u64,
    order: Vec<usize>,
    order_dirty: bool,
    master_gain: f32,
    scratch: Vec<f32>,
    visited: Vec<bool>,
    stack: Vec<usize>,
    finished: Vec<usize>,
    uncommitted: Vec<NodeId>,
}

impl GraphRenderer {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_capacity(sample_rate, DEFAULT_NODE_CAPACITY)
    }

    /// Renderer whose pool holds at most `capacity` live nodes.
    pub fn with_capacity(sample_rate: f32, capacity: usize) -> Self {
        Self {
            sample_rate,
            frames: 0,
            clock: Arc::new(AtomicU64::new(0)),
            slots: (0..capacity).map(|_| NodeSlot::vacant()).collect(),
            free: (0..capacity).rev().collect(),
            index: Vec::with_capacity(capacity),
            next_id: 0,
            order: Vec::with_capacity(capacity),
            order_dirty: false,
            master_gain: 1.0,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            visited: vec![false; capacity],
            stack: Vec::with_capacity(capacity),
            finished: Vec::with_capacity(capacity),
            uncommitted: Vec::with_capacity(capacity),
        }
    }

    pub fn with_master_gain(mut self, gain: f32) -> Self {
        self.master_gain = gain;
        self
    }

    /// Audio-clock time of the next sample to be rendered.
    pub fn current_time(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Shared frame counter, advanced after every rendered block.
    ///
    /// Other threads read the audio clock through this without touching the
    /// renderer.
    pub fn frame_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.clock)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Most nodes that can be live at once.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.lookup(node).is_some()
    }

    /// Evaluate a parameter's automation at an audio-clock time.
    pub fn param_value(&self, param: ParamRef, time: f64) -> Result<f32, GraphError> {
        let slot = self
            .lookup(param.node)
            .map(|index| &self.slots[index])
            .ok_or(GraphError::UnknownNode(param.node))?;
        slot.curve(param.param)
            .map(|curve| curve.value_at(time))
            .ok_or(GraphError::UnsupportedParam {
                node: param.node,
                param: param.param,
            })
    }

    /// Length in samples of a noise node.
    pub fn noise_length(&self, node: NodeId) -> Option<usize> {
        match &self.slots[self.lookup(node)?].kind {
            NodeKind::Noise(burst) => Some(burst.len()),
            _ => None,
        }
    }

    /// Create a node under an id chosen by someone else (the command queue).
    pub(crate) fn insert_with_id(&mut self, id: NodeId, spec: NodeSpec) -> Result<(), GraphError> {
        if !spec.is_valid() {
            return Err(GraphError::InvalidNode(spec));
        }

        let slot = match self.index.binary_search_by_key(&id, |&(id, _)| id) {
            Ok(pos) => self.index[pos].1,
            Err(pos) => {
                let slot = self.free.pop().ok_or(GraphError::GraphFull(self.slots.len()))?;
                self.index.insert(pos, (id, slot));
                slot
            }
        };

        // Per-node seed so every burst is different but reproducible
        let seed = (id.0 as u32).wrapping_mul(0x9E37_79B9) ^ 0x85EB_CA6B;
        self.slots[slot].occupy(id, spec, seed);
        self.next_id = self.next_id.max(id.0 + 1);
        self.order_dirty = true;
        Ok(())
    }

    fn lookup(&self, node: NodeId) -> Option<usize> {
        self.index
            .binary_search_by_key(&node, |&(id, _)| id)
            .ok()
            .map(|pos| self.index[pos].1)
    }

    fn slot_mut(&mut self, node: NodeId) -> Result<&mut NodeSlot, GraphError> {
        let index = self.lookup(node).ok_or(GraphError::UnknownNode(node))?;
        Ok(&mut self.slots[index])
    }

    /// Whether slot `target` feeds (directly or indirectly) into slot `node`.
    fn is_upstream(&mut self, target: usize, node: usize) -> bool {
        self.visited.fill(false);
        self.stack.clear();
        self.stack.push(node);
        self.visited[node] = true;

        while let Some(current) = self.stack.pop() {
            if current == target {
                return true;
            }
            for &input in &self.slots[current].inputs {
                if !self.visited[input] {
                    self.visited[input] = true;
                    self.stack.push(input);
                }
            }
        }
        false
    }

    fn rebuild_order(&mut self) {
        fn visit(index: usize, slots: &[NodeSlot], visited: &mut [bool], order: &mut Vec<usize>) {
            if visited[index] {
                return;
            }
            visited[index] = true;
            for &input in &slots[index].inputs {
                visit(input, slots, visited, order);
            }
            order.push(index);
        }

        let Self {
            slots,
            visited,
            order,
            ..
        } = self;
        visited.fill(false);
        order.clear();
        for index in 0..slots.len() {
            if slots[index].live {
                visit(index, slots, visited, order);
            }
        }
        self.order_dirty = false;
    }

    /// Render `out.len()` frames of the final mix, overwriting `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(chunk);
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let frames = out.len();
        out.fill(0.0);
        self.uncommitted.clear();

        if self.order_dirty {
            self.rebuild_order();
        }

        let block_start = self.frames;
        let Self {
            slots,
            order,
            scratch,
            sample_rate,
            master_gain,
            ..
        } = self;

        for &index in order.iter() {
            let input = &mut scratch[..frames];
            input.fill(0.0);
            for &source in &slots[index].inputs {
                for (x, s) in input.iter_mut().zip(&slots[source].output[..frames]) {
                    *x += *s;
                }
            }

            let slot = &mut slots[index];
            slot.process(input, block_start, *sample_rate);

            if slot.to_output {
                for (o, s) in out.iter_mut().zip(&slot.output[..frames]) {
                    *o += *s * *master_gain;
                }
            }
        }

        self.frames += frames as u64;
        self.clock.store(self.frames, Ordering::Release);
        self.collect_finished();
    }

    /// Drop stopped sources and everything they were the only feed for.
    fn collect_finished(&mut self) {
        let now = self.current_time();

        self.finished.clear();
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.live && slot.is_source() && slot.is_finished(now) {
                self.finished.push(index);
            }
        }

        while !self.finished.is_empty() {
            self.release_finished();

            for (index, slot) in self.slots.iter().enumerate() {
                if slot.live && !slot.is_source() && slot.had_input && slot.inputs.is_empty() {
                    self.finished.push(index);
                }
            }
        }
    }

    /// Return every slot listed in `finished` to the pool and unhook it from
    /// the nodes it fed. Leaves `finished` empty.
    fn release_finished(&mut self) {
        for &index in &self.finished {
            let slot = &mut self.slots[index];
            if !slot.live {
                continue;
            }
            slot.live = false;
            if let Ok(pos) = self.index.binary_search_by_key(&slot.id, |&(id, _)| id) {
                self.index.remove(pos);
            }
            self.free.push(index);
            trace!("collected node {}", slot.id);
        }

        let released = &self.finished;
        for slot in self.slots.iter_mut().filter(|slot| slot.live) {
            slot.inputs.retain(|input| !released.contains(input));
        }

        self.finished.clear();
        self.order_dirty = true;
    }
}

impl SignalGraph for GraphRenderer {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn create(&mut self, spec: NodeSpec) -> Result<NodeId, GraphError> {
        let id = NodeId(self.next_id);
        self.insert_with_id(id, spec)?;
        self.uncommitted.push(id);
        Ok(id)
    }

    fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        let source = self.lookup(from).ok_or(GraphError::UnknownNode(from))?;
        let target = self.lookup(to).ok_or(GraphError::UnknownNode(to))?;
        if from == to || self.is_upstream(target, source) {
            return Err(GraphError::Cycle { from, to });
        }

        let slot = &mut self.slots[target];
        if slot.is_source() {
            return Err(GraphError::NotAnInput(to));
        }
        if !slot.inputs.contains(&source) {
            slot.inputs.push(source);
            slot.had_input = true;
        }
        self.order_dirty = true;
        Ok(())
    }

    fn connect_output(&mut self, node: NodeId) -> Result<(), GraphError> {
        self.slot_mut(node)?.to_output = true;
        Ok(())
    }

    fn schedule(&mut self, param: ParamRef, event: AutomationEvent) -> Result<(), GraphError> {
        let slot = self.slot_mut(param.node)?;
        let curve = slot
            .curve_mut(param.param)
            .ok_or(GraphError::UnsupportedParam {
                node: param.node,
                param: param.param,
            })?;

        if curve.insert(event) {
            Ok(())
        } else {
            Err(GraphError::InvalidAutomation { param, event })
        }
    }

    fn cancel_and_hold(&mut self, param: ParamRef, time: f64) -> Result<(), GraphError> {
        let slot = self.slot_mut(param.node)?;
        let curve = slot
            .curve_mut(param.param)
            .ok_or(GraphError::UnsupportedParam {
                node: param.node,
                param: param.param,
            })?;
        curve.cancel_and_hold(time);
        debug!("cancel and hold {param} at {time:.4}s");
        Ok(())
    }

    fn start(&mut self, node: NodeId, time: f64) -> Result<(), GraphError> {
        let slot = self.slot_mut(node)?;
        if !slot.is_source() {
            return Err(GraphError::NotASource(node));
        }
        slot.start = Some(time);
        Ok(())
    }

    fn stop(&mut self, node: NodeId, time: f64) -> Result<(), GraphError> {
        let slot = self.slot_mut(node)?;
        if !slot.is_source() {
            return Err(GraphError::NotASource(node));
        }
        slot.stop = Some(time);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), GraphError> {
        self.uncommitted.clear();
        Ok(())
    }

    /// Remove the nodes created since the last commit (or rendered block).
    /// Automation scheduled on older nodes stays.
    fn abort(&mut self) {
        if self.uncommitted.is_empty() {
            return;
        }

        self.finished.clear();
        for &id in &self.uncommitted {
            if let Ok(pos) = self.index.binary_search_by_key(&id, |&(id, _)| id) {
                self.finished.push(self.index[pos].1);
            }
        }
        self.release_finished();

        debug!("discarded {} uncommitted nodes", self.uncommitted.len());
        self.uncommitted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Waveform;
    use crate::graph::GraphExt;

    const SR: f32 = 48_000.0;

    fn peak(buf: &[f32]) -> f32 {
        buf.iter().fold(0.0f32, |m, x| m.max(x.abs()))
    }

    #[test]
    fn silent_before_start() {
        let mut graph = GraphRenderer::new(SR);
        let osc = graph.oscillator(Waveform::Square, 440.0).unwrap();
        let vca = graph.gain(1.0).unwrap();
        graph.chain(&[osc, vca]).unwrap();
        graph.connect_output(vca).unwrap();
        graph.play(osc, 0.01, 0.02).unwrap();

        let mut out = vec![0.0; 480];
        graph.render(&mut out);
        assert_eq!(peak(&out), 0.0);

        graph.render(&mut out);
        assert!(peak(&out) > 0.9);
    }

    #[test]
    fn finished_voice_is_collected() {
        let mut graph = GraphRenderer::new(SR);
        let osc = graph.oscillator(Waveform::Sine, 100.0).unwrap();
        let lp = graph.lowpass(1_000.0).unwrap();
        let vca = graph.gain(1.0).unwrap();
        graph.chain(&[osc, lp, vca]).unwrap();
        graph.connect_output(vca).unwrap();
        graph.play(osc, 0.0, 0.005).unwrap();
        assert_eq!(graph.node_count(), 3);

        let mut out = vec![0.0; 512];
        graph.render(&mut out);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn exhausted_noise_is_collected() {
        let mut graph = GraphRenderer::new(SR);
        let noise = graph.noise_burst(100, None).unwrap();
        let vca = graph.gain(1.0).unwrap();
        graph.chain(&[noise, vca]).unwrap();
        graph.connect_output(vca).unwrap();
        graph.start(noise, 0.0).unwrap();

        let mut out = vec![0.0; 256];
        graph.render(&mut out);
        assert!(peak(&out[..100]) > 0.0);
        assert!(out[100..].iter().all(|&x| x == 0.0));
        assert!(!graph.contains(noise));
        assert!(!graph.contains(vca));
    }

    #[test]
    fn frame_counter_tracks_rendered_audio() {
        let mut graph = GraphRenderer::new(SR);
        let counter = graph.frame_counter();

        let mut out = vec![0.0; 4_800];
        graph.render(&mut out);

        assert_eq!(counter.load(Ordering::Acquire), 4_800);
        assert_eq!(graph.frames_rendered(), 4_800);
        assert!((graph.current_time() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn sources_take_no_inputs() {
        let mut graph = GraphRenderer::new(SR);
        let a = graph.oscillator(Waveform::Sine, 100.0).unwrap();
        let b = graph.oscillator(Waveform::Sine, 200.0).unwrap();
        assert_eq!(graph.connect(a, b), Err(GraphError::NotAnInput(b)));
    }

    #[test]
    fn cycles_are_refused() {
        let mut graph = GraphRenderer::new(SR);
        let a = graph.gain(1.0).unwrap();
        let b = graph.gain(1.0).unwrap();
        graph.connect(a, b).unwrap();
        assert_eq!(graph.connect(b, a), Err(GraphError::Cycle { from: b, to: a }));
        assert!(graph.connect(a, a).is_err());
    }

    #[test]
    fn gain_nodes_cannot_be_started() {
        let mut graph = GraphRenderer::new(SR);
        let vca = graph.gain(1.0).unwrap();
        assert_eq!(graph.start(vca, 0.0), Err(GraphError::NotASource(vca)));
    }

    #[test]
    fn unsupported_param_is_reported() {
        let mut graph = GraphRenderer::new(SR);
        let noise = graph.noise_burst(10, None).unwrap();
        let result = graph.set_value_at_time(noise.gain(), 1.0, 0.0);
        assert!(matches!(result, Err(GraphError::UnsupportedParam { .. })));
    }

    #[test]
    fn fan_in_sums_inputs() {
        let mut graph = GraphRenderer::new(SR);
        let a = graph.oscillator(Waveform::Square, 100.0).unwrap();
        let b = graph.oscillator(Waveform::Square, 100.0).unwrap();
        let mix = graph.gain(0.5).unwrap();
        graph.connect(a, mix).unwrap();
        graph.connect(b, mix).unwrap();
        graph.connect_output(mix).unwrap();
        graph.play(a, 0.0, 1.0).unwrap();
        graph.play(b, 0.0, 1.0).unwrap();

        let mut out = vec![0.0; 64];
        graph.render(&mut out);
        assert!((out[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn abort_discards_uncommitted_nodes() {
        let mut graph = GraphRenderer::new(SR);
        let kept = graph.gain(1.0).unwrap();
        graph.commit().unwrap();

        let osc = graph.oscillator(Waveform::Sine, 100.0).unwrap();
        graph.connect(osc, kept).unwrap();
        graph.abort();

        assert!(graph.contains(kept));
        assert!(!graph.contains(osc));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn master_gain_scales_output() {
        let mut graph = GraphRenderer::new(SR).with_master_gain(0.25);
        let osc = graph.oscillator(Waveform::Square, 100.0).unwrap();
        let vca = graph.gain(1.0).unwrap();
        graph.chain(&[osc, vca]).unwrap();
        graph.connect_output(vca).unwrap();
        graph.play(osc, 0.0, 1.0).unwrap();

        let mut out = vec![0.0; 64];
        graph.render(&mut out);
        assert!((peak(&out) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn full_pool_refuses_new_nodes() {
        let mut graph = GraphRenderer::with_capacity(SR, 2);
        graph.gain(1.0).unwrap();
        graph.gain(1.0).unwrap();
        assert_eq!(graph.gain(1.0), Err(GraphError::GraphFull(2)));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn collected_slots_are_reused() {
        let mut graph = GraphRenderer::with_capacity(SR, 2);
        let mut out = vec![0.0; 512];

        for round in 0..4 {
            let osc = graph.oscillator(Waveform::Square, 100.0).unwrap();
            let vca = graph.gain(1.0).unwrap();
            graph.chain(&[osc, vca]).unwrap();
            graph.connect_output(vca).unwrap();

            let start = graph.current_time();
            graph.play(osc, start, start + 0.001).unwrap();
            graph.commit().unwrap();

            graph.render(&mut out);
            assert!(peak(&out) > 0.9, "round {round} was silent");
            assert_eq!(graph.node_count(), 0);
            assert!(!graph.contains(osc));
        }
        assert_eq!(graph.capacity(), 2);
    }

    #[test]
    fn stale_ids_do_not_reach_recycled_slots() {
        let mut graph = GraphRenderer::with_capacity(SR, 1);
        let old = graph.noise_burst(10, None).unwrap();
        graph.start(old, 0.0).unwrap();
        let mut out = vec![0.0; 64];
        graph.render(&mut out);

        let new = graph.gain(0.5).unwrap();
        assert_eq!(graph.param_value(new.gain(), 0.0), Ok(0.5));
        assert_eq!(graph.start(old, 1.0), Err(GraphError::UnknownNode(old)));
    }
}
