use log::{error, trace};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    dsp::AutomationEvent,
    graph::{GraphError, GraphRenderer, NodeId, NodeSpec, ParamRef, SignalGraph},
};

/*
Graph Command Queue
===================

The scheduler runs on a control thread; the renderer lives on the audio
thread. Neither may block the other, so graph edits travel as plain
commands through a single-producer single-consumer ring buffer.

    control thread                         audio thread
    ──────────────                         ────────────
    QueuedGraph                            GraphFeed
      create()  ─┐                           │
      connect() ─┤ staged                    │
      schedule()─┤ (Vec)                     │
      commit()  ─┴──► rtrb::Producer ──► rtrb::Consumer ──► GraphRenderer
                                             drain_into() once per
                                             audio callback

Node ids are allocated on the control side so a voice can wire its graph up
before the renderer has seen any of it. A trigger's commands are pushed in
one go at `commit`, or not at all: if the ring cannot take the whole batch
the batch is dropped and the trigger fails, so the audio thread never sees
half a voice.

Validation the renderer would perform (bad node values, bad automation
events) happens at staging time so errors surface on the control thread.
Errors that depend on renderer state (a choke targeting a node the audio
thread already collected, a node pool with no free slot) are logged by the
feed and skipped.
*/

/// One graph edit, as carried to the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphCommand {
    Create { id: NodeId, spec: NodeSpec },
    Connect { from: NodeId, to: NodeId },
    ConnectOutput(NodeId),
    Schedule { param: ParamRef, event: AutomationEvent },
    CancelAndHold { param: ParamRef, time: f64 },
    Start { node: NodeId, time: f64 },
    Stop { node: NodeId, time: f64 },
}

impl GraphCommand {
    /// Apply the command to a renderer.
    pub fn apply(self, renderer: &mut GraphRenderer) -> Result<(), GraphError> {
        match self {
            GraphCommand::Create { id, spec } => renderer.insert_with_id(id, spec),
            GraphCommand::Connect { from, to } => renderer.connect(from, to),
            GraphCommand::ConnectOutput(node) => renderer.connect_output(node),
            GraphCommand::Schedule { param, event } => renderer.schedule(param, event),
            GraphCommand::CancelAndHold { param, time } => renderer.cancel_and_hold(param, time),
            GraphCommand::Start { node, time } => renderer.start(node, time),
            GraphCommand::Stop { node, time } => renderer.stop(node, time),
        }
    }
}

/// Create a connected control/audio pair.
pub fn channel(capacity: usize, sample_rate: f32) -> (QueuedGraph, GraphFeed) {
    let (tx, rx) = RingBuffer::new(capacity);
    (
        QueuedGraph {
            tx,
            staged: Vec::with_capacity(64),
            next_id: 0,
            sample_rate,
        },
        GraphFeed { rx },
    )
}

/// Control-side [`SignalGraph`] that stages commands for the audio thread.
pub struct QueuedGraph {
    tx: Producer<GraphCommand>,
    staged: Vec<GraphCommand>,
    next_id: u64,
    sample_rate: f32,
}

impl QueuedGraph {
    /// Commands staged since the last commit or abort.
    pub fn staged(&self) -> &[GraphCommand] {
        &self.staged
    }

    /// Free slots in the ring buffer.
    pub fn available(&self) -> usize {
        self.tx.slots()
    }

    fn stage(&mut self, command: GraphCommand) -> Result<(), GraphError> {
        self.staged.push(command);
        Ok(())
    }
}

impl SignalGraph for QueuedGraph {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn create(&mut self, spec: NodeSpec) -> Result<NodeId, GraphError> {
        if !spec.is_valid() {
            return Err(GraphError::InvalidNode(spec));
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.stage(GraphCommand::Create { id, spec })?;
        Ok(id)
    }

    fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::Cycle { from, to });
        }
        self.stage(GraphCommand::Connect { from, to })
    }

    fn connect_output(&mut self, node: NodeId) -> Result<(), GraphError> {
        self.stage(GraphCommand::ConnectOutput(node))
    }

    fn schedule(&mut self, param: ParamRef, event: AutomationEvent) -> Result<(), GraphError> {
        if !event.is_valid() {
            return Err(GraphError::InvalidAutomation { param, event });
        }
        self.stage(GraphCommand::Schedule { param, event })
    }

    fn cancel_and_hold(&mut self, param: ParamRef, time: f64) -> Result<(), GraphError> {
        self.stage(GraphCommand::CancelAndHold { param, time })
    }

    fn start(&mut self, node: NodeId, time: f64) -> Result<(), GraphError> {
        self.stage(GraphCommand::Start { node, time })
    }

    fn stop(&mut self, node: NodeId, time: f64) -> Result<(), GraphError> {
        self.stage(GraphCommand::Stop { node, time })
    }

    fn commit(&mut self) -> Result<(), GraphError> {
        let needed = self.staged.len();
        let available = self.tx.slots();
        if needed > available {
            self.staged.clear();
            return Err(GraphError::QueueFull { needed, available });
        }

        for command in self.staged.drain(..) {
            // Capacity checked above; the consumer only frees slots
            if self.tx.push(command).is_err() {
                return Err(GraphError::QueueFull {
                    needed,
                    available: 0,
                });
            }
        }
        trace!("committed {needed} graph commands");
        Ok(())
    }

    fn abort(&mut self) {
        self.staged.clear();
    }
}

/// Audio-side end of the queue.
pub struct GraphFeed {
    rx: Consumer<GraphCommand>,
}

impl GraphFeed {
    /// Apply every pending command to `renderer`. Returns how many were read.
    ///
    /// Commands that fail against the renderer's current state are logged
    /// and skipped.
    pub fn drain_into(&mut self, renderer: &mut GraphRenderer) -> usize {
        let mut count = 0;
        while let Ok(command) = self.rx.pop() {
            if let Err(err) = command.apply(renderer) {
                error!("graph command {command:?} failed: {err}");
            }
            count += 1;
        }
        count
    }

    /// Commands pushed but not yet applied.
    pub fn pending(&self) -> usize {
        self.rx.slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Waveform;
    use crate::graph::GraphExt;

    #[test]
    fn nothing_reaches_the_renderer_before_commit() {
        let (mut graph, mut feed) = channel(64, 48_000.0);
        let mut renderer = GraphRenderer::new(48_000.0);

        let osc = graph.oscillator(Waveform::Sine, 100.0).unwrap();
        graph.connect_output(osc).unwrap();
        assert_eq!(feed.drain_into(&mut renderer), 0);

        graph.commit().unwrap();
        assert_eq!(feed.pending(), 2);
        assert_eq!(feed.drain_into(&mut renderer), 2);
        assert_eq!(feed.pending(), 0);
        assert!(renderer.contains(osc));
    }

    #[test]
    fn commit_is_all_or_nothing() {
        let (mut graph, mut feed) = channel(2, 48_000.0);
        let mut renderer = GraphRenderer::new(48_000.0);

        let osc = graph.oscillator(Waveform::Sine, 100.0).unwrap();
        let vca = graph.gain(1.0).unwrap();
        graph.chain(&[osc, vca]).unwrap();

        let err = graph.commit().unwrap_err();
        assert_eq!(
            err,
            GraphError::QueueFull {
                needed: 3,
                available: 2
            }
        );
        assert!(graph.staged().is_empty());
        assert_eq!(feed.drain_into(&mut renderer), 0);
    }

    #[test]
    fn abort_discards_staged_commands() {
        let (mut graph, mut feed) = channel(16, 48_000.0);
        let mut renderer = GraphRenderer::new(48_000.0);

        graph.gain(1.0).unwrap();
        graph.abort();
        graph.commit().unwrap();
        assert_eq!(feed.drain_into(&mut renderer), 0);
    }

    #[test]
    fn invalid_automation_is_caught_at_staging() {
        let (mut graph, _feed) = channel(16, 48_000.0);
        let vca = graph.gain(1.0).unwrap();
        let result = graph.exponential_ramp_to_value_at_time(vca.gain(), 0.0, 1.0);
        assert!(matches!(result, Err(GraphError::InvalidAutomation { .. })));
    }

    #[test]
    fn renderer_ids_follow_queued_ids() {
        let (mut graph, mut feed) = channel(16, 48_000.0);
        let mut renderer = GraphRenderer::new(48_000.0);

        let a = graph.gain(1.0).unwrap();
        let b = graph.gain(1.0).unwrap();
        graph.commit().unwrap();
        feed.drain_into(&mut renderer);

        assert!(renderer.contains(a));
        assert!(renderer.contains(b));
        assert_eq!(renderer.param_value(b.gain(), 0.0), Ok(1.0));
    }
}
