/*
Step Patterns
=============

A pattern is one bar of sixteen steps. Every instrument owns a row of
sixteen on/off switches; the scheduler walks the steps in order and fires
whatever is switched on at the current column.

        1 . . . 2 . . . 3 . . . 4 . . .
    BD  ■ □ □ □ □ □ □ □ ■ □ □ □ □ □ □ □
    SD  □ □ □ □ ■ □ □ □ □ □ □ □ ■ □ □ □
    CH  ■ □ ■ □ ■ □ ■ □ ■ □ ■ □ ■ □ ■ □
    AC  □ □ □ □ □ □ □ □ □ □ □ □ □ □ □ □

Each step is a sixteenth note: `60 / bpm / 4` seconds.

Rows are optional. An instrument without a row is simply never active, so a
pattern that only mentions four instruments is still valid. The accent row
(AC) works the same way and marks steps whose triggers are accented.
*/

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instrument::Instrument;

/// Steps per pattern.
pub const STEPS: usize = 16;

/// Largest allowed swing amount.
pub const MAX_SWING: f64 = 0.75;

/// One instrument's row.
pub type Steps = [bool; STEPS];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatternError {
    #[error("step {0} is out of range (0..16)")]
    StepOutOfRange(usize),

    #[error("tempo must be a positive number of BPM, got {0}")]
    InvalidBpm(f64),

    #[error("swing must be within 0..=0.75, got {0}")]
    InvalidSwing(f64),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub name: String,
    pub bpm: f64,
    /// Reserved for offsetting every second step. Validated, not played.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub swing: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: BTreeMap<Instrument, Steps>,
    /// Steps whose triggers are accented.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accents: Steps,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::empty()
    }
}

impl Pattern {
    /// "Untitled" at 120 BPM with no rows.
    pub fn empty() -> Self {
        Self::new("Untitled", 120.0)
    }

    pub fn new(name: impl Into<String>, bpm: f64) -> Self {
        Self {
            name: name.into(),
            bpm,
            swing: None,
            steps: BTreeMap::new(),
            accents: [false; STEPS],
        }
    }

    /// Build a pattern from rows of step indices.
    pub fn with_steps(mut self, instrument: Instrument, active: &[usize]) -> Self {
        let row = self.steps.entry(instrument).or_insert([false; STEPS]);
        for &step in active.iter().filter(|&&s| s < STEPS) {
            row[step] = true;
        }
        self
    }

    pub fn with_accents(mut self, active: &[usize]) -> Self {
        for &step in active.iter().filter(|&&s| s < STEPS) {
            self.accents[step] = true;
        }
        self
    }

    /// Duration of one step (a sixteenth note) in seconds.
    pub fn step_duration(&self) -> f64 {
        60.0 / self.bpm / 4.0
    }

    /// Missing rows and out-of-range steps read as inactive.
    pub fn is_active(&self, instrument: Instrument, step: usize) -> bool {
        self.steps
            .get(&instrument)
            .and_then(|row| row.get(step))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_accented(&self, step: usize) -> bool {
        self.accents.get(step).copied().unwrap_or(false)
    }

    /// Flip one step and return its new state. A missing row is created.
    pub fn toggle_step(&mut self, instrument: Instrument, step: usize) -> Result<bool, PatternError> {
        if step >= STEPS {
            return Err(PatternError::StepOutOfRange(step));
        }
        let row = self.steps.entry(instrument).or_insert([false; STEPS]);
        row[step] = !row[step];
        Ok(row[step])
    }

    pub fn set_step(
        &mut self,
        instrument: Instrument,
        step: usize,
        active: bool,
    ) -> Result<(), PatternError> {
        if step >= STEPS {
            return Err(PatternError::StepOutOfRange(step));
        }
        self.steps.entry(instrument).or_insert([false; STEPS])[step] = active;
        Ok(())
    }

    pub fn toggle_accent(&mut self, step: usize) -> Result<bool, PatternError> {
        let slot = self
            .accents
            .get_mut(step)
            .ok_or(PatternError::StepOutOfRange(step))?;
        *slot = !*slot;
        Ok(*slot)
    }

    pub fn clear_row(&mut self, instrument: Instrument) {
        self.steps.remove(&instrument);
    }

    /// Instruments switched on at `step`, in kit order.
    pub fn active_instruments(&self, step: usize) -> impl Iterator<Item = Instrument> + '_ {
        Instrument::ALL
            .into_iter()
            .filter(move |&instrument| self.is_active(instrument, step))
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(PatternError::InvalidBpm(self.bpm));
        }
        if let Some(swing) = self.swing {
            if !(0.0..=MAX_SWING).contains(&swing) {
                return Err(PatternError::InvalidSwing(swing));
            }
        }
        Ok(())
    }
}
