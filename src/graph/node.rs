use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{FilterType, Waveform};

/// Handle to one node of a signal graph.
///
/// Ids are plain numbers handed out by the backend. Holding one does not
/// keep the node alive: once a node has finished and been collected, any
/// operation on its id fails with [`GraphError::UnknownNode`](super::GraphError).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The node's frequency parameter (oscillators and filters).
    pub fn frequency(self) -> ParamRef {
        ParamRef {
            node: self,
            param: Param::Frequency,
        }
    }

    /// The node's gain parameter (gain nodes).
    pub fn gain(self) -> ParamRef {
        ParamRef {
            node: self,
            param: Param::Gain,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Automatable parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Oscillator pitch or filter cutoff/centre, in Hz
    Frequency,
    /// Linear amplitude multiplier
    Gain,
}

/// A parameter on a specific node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamRef {
    pub node: NodeId,
    pub param: Param,
}

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:?}", self.node, self.param)
    }
}

/// Description of a node to create.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSpec {
    /// Periodic tone generator. Source node; needs `start`.
    Oscillator { waveform: Waveform, frequency: f32 },
    /// White-noise burst of `length` samples, optionally faded by
    /// `exp(-i / decay_samples)`. Source node; needs `start`.
    Noise {
        length: usize,
        decay_samples: Option<f32>,
    },
    /// State-variable filter.
    Filter {
        kind: FilterType,
        frequency: f32,
        q: f32,
    },
    /// Amplitude stage.
    Gain { gain: f32 },
}

impl NodeSpec {
    /// Source nodes generate signal and have no inputs.
    pub fn is_source(&self) -> bool {
        matches!(self, NodeSpec::Oscillator { .. } | NodeSpec::Noise { .. })
    }

    /// Whether the node exposes `param` for automation.
    pub fn supports(&self, param: Param) -> bool {
        match (self, param) {
            (NodeSpec::Oscillator { .. }, Param::Frequency) => true,
            (NodeSpec::Filter { .. }, Param::Frequency) => true,
            (NodeSpec::Gain { .. }, Param::Gain) => true,
            _ => false,
        }
    }

    /// Reject non-finite or non-positive construction values.
    pub fn is_valid(&self) -> bool {
        match *self {
            NodeSpec::Oscillator { frequency, .. } => frequency.is_finite() && frequency > 0.0,
            NodeSpec::Noise { decay_samples, .. } => {
                decay_samples.map_or(true, |d| d.is_finite() && d > 0.0)
            }
            NodeSpec::Filter { frequency, q, .. } => {
                frequency.is_finite() && frequency > 0.0 && q.is_finite() && q > 0.0
            }
            NodeSpec::Gain { gain } => gain.is_finite(),
        }
    }
}
