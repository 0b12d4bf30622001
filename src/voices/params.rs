use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{coupling::accent_gain, instrument::Instrument};

/// Front-panel knobs a voice may expose.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    Level,
    Tone,
    Decay,
    Tuning,
    Snappy,
}

impl ParamKind {
    /// Valid range of the knob.
    pub fn range(self) -> (f32, f32) {
        match self {
            ParamKind::Tuning => (0.5, 2.0),
            _ => (0.0, 1.0),
        }
    }

    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("{instrument} has no {kind:?} control")]
    Unsupported {
        instrument: Instrument,
        kind: ParamKind,
    },

    #[error("{kind:?} value must be finite, got {value}")]
    NotFinite { kind: ParamKind, value: f32 },
}

/// Knobs each instrument exposes, with their factory settings.
pub fn defaults(instrument: Instrument) -> &'static [(ParamKind, f32)] {
    use ParamKind::*;

    match instrument {
        Instrument::BassDrum => &[(Level, 1.0), (Tone, 0.5), (Decay, 0.35), (Tuning, 1.0)],
        Instrument::Snare => &[(Level, 1.0), (Tone, 0.5), (Snappy, 0.5), (Tuning, 1.0)],
        Instrument::LowTom => &[(Level, 0.9), (Tuning, 1.0), (Decay, 0.4)],
        Instrument::MidTom => &[(Level, 0.9), (Tuning, 1.0), (Decay, 0.35)],
        Instrument::HighTom => &[(Level, 0.9), (Tuning, 1.0), (Decay, 0.3)],
        Instrument::Rimshot => &[(Level, 0.8)],
        Instrument::Clap => &[(Level, 0.6)],
        Instrument::ClosedHat => &[(Level, 0.7), (Decay, 0.5)],
        Instrument::OpenHat => &[(Level, 0.8), (Decay, 0.5)],
        Instrument::Cymbal => &[(Level, 0.6), (Tone, 0.5), (Decay, 0.5)],
        Instrument::Ride => &[(Level, 0.5), (Tone, 0.5), (Decay, 0.5)],
        Instrument::Cowbell => &[(Level, 0.7)],
    }
}

fn default_value(instrument: Instrument, kind: ParamKind) -> Option<f32> {
    defaults(instrument)
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, v)| *v)
}

/// Fully resolved knob values for one trigger.
///
/// Every field is populated (knobs a voice does not expose carry neutral
/// values) and already clamped into range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub level: f32,
    pub tone: f32,
    pub decay: f32,
    pub tuning: f32,
    pub snappy: f32,
    /// `1 + k * accent`, see [`accent_gain`].
    pub accent_gain: f32,
}

impl VoiceSettings {
    /// Peak amplitude at the trigger: `level * accent_gain`.
    pub fn amplitude(&self) -> f32 {
        self.level * self.accent_gain
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            level: 1.0,
            tone: 0.5,
            decay: 0.5,
            tuning: 1.0,
            snappy: 0.5,
            accent_gain: 1.0,
        }
    }
}

/// Knob positions for the whole kit.
///
/// Only values that differ from the factory settings need to be stored;
/// anything missing reads as its default.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceParams {
    #[cfg_attr(feature = "serde", serde(default))]
    values: BTreeMap<Instrument, BTreeMap<ParamKind, f32>>,
}

impl VoiceParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supports(instrument: Instrument, kind: ParamKind) -> bool {
        default_value(instrument, kind).is_some()
    }

    /// Current value, or `None` if the instrument has no such knob.
    pub fn get(&self, instrument: Instrument, kind: ParamKind) -> Option<f32> {
        let default = default_value(instrument, kind)?;
        let stored = self
            .values
            .get(&instrument)
            .and_then(|knobs| knobs.get(&kind))
            .copied();
        Some(kind.clamp(stored.unwrap_or(default)))
    }

    /// Turn a knob. The value is clamped into range; the stored value is
    /// returned.
    pub fn set(
        &mut self,
        instrument: Instrument,
        kind: ParamKind,
        value: f32,
    ) -> Result<f32, ParamError> {
        if !Self::supports(instrument, kind) {
            return Err(ParamError::Unsupported { instrument, kind });
        }
        if !value.is_finite() {
            return Err(ParamError::NotFinite { kind, value });
        }

        let value = kind.clamp(value);
        self.values
            .entry(instrument)
            .or_default()
            .insert(kind, value);
        Ok(value)
    }

    /// Back to factory settings for one instrument.
    pub fn reset(&mut self, instrument: Instrument) {
        self.values.remove(&instrument);
    }

    /// Resolve every knob for a trigger with the given accent (0..=1).
    pub fn settings(&self, instrument: Instrument, accent: f32) -> VoiceSettings {
        let neutral = VoiceSettings::default();
        let value = |kind: ParamKind, fallback: f32| self.get(instrument, kind).unwrap_or(fallback);

        VoiceSettings {
            level: value(ParamKind::Level, neutral.level),
            tone: value(ParamKind::Tone, neutral.tone),
            decay: value(ParamKind::Decay, neutral.decay),
            tuning: value(ParamKind::Tuning, neutral.tuning),
            snappy: value(ParamKind::Snappy, neutral.snappy),
            accent_gain: accent_gain(instrument, accent),
        }
    }
}

/// Kit parameters shared between the editor and the player.
///
/// One writer, many readers. The player reads at trigger time, so an edit
/// is heard from the next trigger on and never changes a voice already
/// sounding.
#[derive(Debug, Clone, Default)]
pub struct SharedVoiceParams(Arc<RwLock<VoiceParams>>);

impl SharedVoiceParams {
    pub fn new(params: VoiceParams) -> Self {
        Self(Arc::new(RwLock::new(params)))
    }

    pub fn settings(&self, instrument: Instrument, accent: f32) -> VoiceSettings {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .settings(instrument, accent)
    }

    pub fn get(&self, instrument: Instrument, kind: ParamKind) -> Option<f32> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(instrument, kind)
    }

    pub fn set(
        &self,
        instrument: Instrument,
        kind: ParamKind,
        value: f32,
    ) -> Result<f32, ParamError> {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(instrument, kind, value)
    }

    pub fn reset(&self, instrument: Instrument) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .reset(instrument);
    }

    /// Copy of the current values.
    pub fn snapshot(&self) -> VoiceParams {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
