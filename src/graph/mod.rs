//! Signal-graph backend.
//!
//! Voices do not render audio themselves. Each trigger builds a small graph
//! (generators → filters → gain stages → output) and schedules parameter
//! automation on it, all stamped with audio-clock times. Whatever implements
//! [`SignalGraph`] owns those nodes and turns them into samples.
//!
//! Two implementations ship with the crate:
//!
//! - [`render::GraphRenderer`] realizes graphs directly and renders blocks.
//!   Used for offline rendering and tests.
//! - `queue::QueuedGraph` (feature `rtrb`) stages commands on the control
//!   thread and hands them to a renderer on the audio thread through a
//!   lock-free ring buffer.

use thiserror::Error;

use crate::dsp::AutomationEvent;

/// Fluent helpers (`.oscillator()`, `.decay_envelope()`, ...).
pub mod extensions;
/// Node ids, parameter references and node descriptions.
pub mod node;
/// Command queue between control and audio threads.
#[cfg(feature = "rtrb")]
pub mod queue;
/// Block renderer realizing graphs with the crate's DSP primitives.
pub mod render;

pub use extensions::GraphExt;
pub use node::{NodeId, NodeSpec, Param, ParamRef};
pub use render::GraphRenderer;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("invalid node description: {0:?}")]
    InvalidNode(NodeSpec),

    #[error("node {node} has no {param:?} parameter")]
    UnsupportedParam { node: NodeId, param: Param },

    #[error("invalid automation event on {param}: {event:?}")]
    InvalidAutomation {
        param: ParamRef,
        event: AutomationEvent,
    },

    #[error("node {0} is a source and accepts no inputs")]
    NotAnInput(NodeId),

    #[error("node {0} is not a source and cannot be started or stopped")]
    NotASource(NodeId),

    #[error("connecting {from} to {to} would create a cycle")]
    Cycle { from: NodeId, to: NodeId },

    #[error("cannot chain an empty list of nodes")]
    EmptyChain,

    #[error("node pool full: all {0} slots in use")]
    GraphFull(usize),

    #[error("command queue full: {needed} commands staged, {available} slots free")]
    QueueFull { needed: usize, available: usize },
}

/// A backend that builds and plays signal graphs.
///
/// Every time argument is an absolute audio-clock time in seconds. Calls
/// made for one trigger form a transaction: the caller finishes with
/// [`commit`](SignalGraph::commit) on success or [`abort`](SignalGraph::abort)
/// after an error.
pub trait SignalGraph {
    /// Sample rate of the audio the graph renders to.
    fn sample_rate(&self) -> f32;

    fn create(&mut self, spec: NodeSpec) -> Result<NodeId, GraphError>;

    /// Route `from`'s output into `to`'s input.
    fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError>;

    /// Route a node's output to the final mix.
    fn connect_output(&mut self, node: NodeId) -> Result<(), GraphError>;

    fn schedule(&mut self, param: ParamRef, event: AutomationEvent) -> Result<(), GraphError>;

    /// Freeze `param` at its value at `time`, dropping later automation.
    fn cancel_and_hold(&mut self, param: ParamRef, time: f64) -> Result<(), GraphError>;

    fn start(&mut self, node: NodeId, time: f64) -> Result<(), GraphError>;

    fn stop(&mut self, node: NodeId, time: f64) -> Result<(), GraphError>;

    /// Publish everything issued since the last commit.
    fn commit(&mut self) -> Result<(), GraphError> {
        Ok(())
    }

    /// Discard everything issued since the last commit, where possible.
    fn abort(&mut self) {}
}
