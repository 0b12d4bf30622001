use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{graph::render::DEFAULT_NODE_CAPACITY, MAX_BLOCK_SIZE};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sample rate must be positive, got {0}")]
    SampleRate(f32),

    #[error("look-ahead must be positive, got {0}s")]
    Lookahead(f64),

    #[error("poll interval ({poll:?}) must be shorter than the look-ahead ({lookahead}s)")]
    PollInterval { poll: Duration, lookahead: f64 },

    #[error("block size must be within 1..=2048, got {0}")]
    BlockSize(usize),

    #[error("command queue needs room for at least one trigger, got {0} slots")]
    QueueCapacity(usize),

    #[error("node pool needs room for at least one trigger, got {0} nodes")]
    NodeCapacity(usize),
}

/// Engine tuning knobs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// How far ahead each scheduler poll looks, in seconds
    pub lookahead: f64,
    /// Time between scheduler polls
    pub poll_interval: Duration,
    /// Frames rendered per block in offline rendering
    pub block_size: usize,
    /// Slots in the control → audio command ring
    pub queue_capacity: usize,
    /// Nodes the renderer can hold at once, allocated up front
    pub max_nodes: usize,
    /// Gain applied to the final mix
    pub master_gain: f32,
}

/// Smallest ring that still fits one full metal-bank trigger plus a choke.
pub const MIN_QUEUE_CAPACITY: usize = 64;

/// Smallest node pool that still fits the largest voice.
pub const MIN_NODE_CAPACITY: usize = 16;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            lookahead: 0.1,
            poll_interval: Duration::from_millis(25),
            block_size: 512,
            queue_capacity: 4096,
            max_nodes: DEFAULT_NODE_CAPACITY,
            master_gain: 0.5,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        if !(self.lookahead.is_finite() && self.lookahead > 0.0) {
            return Err(ConfigError::Lookahead(self.lookahead));
        }
        if self.poll_interval.as_secs_f64() >= self.lookahead {
            return Err(ConfigError::PollInterval {
                poll: self.poll_interval,
                lookahead: self.lookahead,
            });
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if self.queue_capacity < MIN_QUEUE_CAPACITY {
            return Err(ConfigError::QueueCapacity(self.queue_capacity));
        }
        if self.max_nodes < MIN_NODE_CAPACITY {
            return Err(ConfigError::NodeCapacity(self.max_nodes));
        }
        Ok(())
    }
}
