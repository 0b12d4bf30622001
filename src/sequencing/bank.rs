use std::{collections::BTreeMap, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    instrument::Instrument,
    sequencing::pattern::{Pattern, PatternError},
};

/// One of the eight pattern memories, A through H.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PatternSlot {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl PatternSlot {
    pub const ALL: [PatternSlot; 8] = [
        PatternSlot::A,
        PatternSlot::B,
        PatternSlot::C,
        PatternSlot::D,
        PatternSlot::E,
        PatternSlot::F,
        PatternSlot::G,
        PatternSlot::H,
    ];

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for PatternSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for PatternSlot {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PatternSlot::ALL
            .into_iter()
            .find(|slot| s.eq_ignore_ascii_case(&slot.letter().to_string()))
            .ok_or_else(|| BankError::UnknownSlot(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("unknown pattern slot {0:?}")]
    UnknownSlot(String),

    #[error("current slot {0} holds no pattern")]
    MissingCurrent(PatternSlot),

    #[error("pattern {slot}: {source}")]
    Pattern {
        slot: PatternSlot,
        #[source]
        source: PatternError,
    },

    #[cfg(feature = "serde")]
    #[error("bank file: {0}")]
    Json(#[from] serde_json::Error),
}

/// The pattern memories plus the selected one.
///
/// The selected slot always holds a pattern; deserializing a bank that
/// breaks this fails.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BankFile"))]
#[derive(Debug, Clone, PartialEq)]
pub struct PatternBank {
    patterns: BTreeMap<PatternSlot, Pattern>,
    current: PatternSlot,
}

impl Default for PatternBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternBank {
    /// A basic groove in A and empty patterns in B–H.
    pub fn new() -> Self {
        let mut patterns: BTreeMap<_, _> = PatternSlot::ALL
            .into_iter()
            .map(|slot| (slot, Pattern::empty()))
            .collect();
        patterns.insert(PatternSlot::A, default_groove());

        Self {
            patterns,
            current: PatternSlot::A,
        }
    }

    pub fn current_slot(&self) -> PatternSlot {
        self.current
    }

    pub fn current(&self) -> &Pattern {
        // `current` always keys an entry, see `select` and `validate`
        &self.patterns[&self.current]
    }

    pub fn current_mut(&mut self) -> &mut Pattern {
        self.patterns.entry(self.current).or_default()
    }

    pub fn get(&self, slot: PatternSlot) -> Option<&Pattern> {
        self.patterns.get(&slot)
    }

    /// Make `slot` the playing pattern. An empty slot gets an empty pattern.
    pub fn select(&mut self, slot: PatternSlot) {
        self.patterns.entry(slot).or_default();
        self.current = slot;
    }

    /// Store a pattern, returning what was there before.
    pub fn replace(&mut self, slot: PatternSlot, pattern: Pattern) -> Result<Option<Pattern>, BankError> {
        pattern
            .validate()
            .map_err(|source| BankError::Pattern { slot, source })?;
        Ok(self.patterns.insert(slot, pattern))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternSlot, &Pattern)> {
        self.patterns.iter().map(|(slot, pattern)| (*slot, pattern))
    }

    pub fn validate(&self) -> Result<(), BankError> {
        if !self.patterns.contains_key(&self.current) {
            return Err(BankError::MissingCurrent(self.current));
        }
        for (slot, pattern) in self.iter() {
            pattern
                .validate()
                .map_err(|source| BankError::Pattern { slot, source })?;
        }
        Ok(())
    }

    /// Parse and validate a bank file.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, BankError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// On-disk shape of a bank, checked before it becomes a [`PatternBank`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BankFile {
    patterns: BTreeMap<PatternSlot, Pattern>,
    current: PatternSlot,
}

#[cfg(feature = "serde")]
impl TryFrom<BankFile> for PatternBank {
    type Error = BankError;

    fn try_from(file: BankFile) -> Result<Self, Self::Error> {
        let bank = PatternBank {
            patterns: file.patterns,
            current: file.current,
        };
        bank.validate()?;
        Ok(bank)
    }
}

/// Four on the floor with backbeat snare, eighth-note hats and an open hat
/// on the last offbeat.
fn default_groove() -> Pattern {
    Pattern::new("Basic", 120.0)
        .with_steps(Instrument::BassDrum, &[0, 4, 8, 12])
        .with_steps(Instrument::Snare, &[4, 12])
        .with_steps(Instrument::ClosedHat, &[0, 2, 4, 6, 8, 10, 12])
        .with_steps(Instrument::OpenHat, &[14])
        .with_accents(&[0, 8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bank_has_groove_in_a() {
        let bank = PatternBank::new();
        assert_eq!(bank.current_slot(), PatternSlot::A);
        assert!(bank.current().is_active(Instrument::BassDrum, 0));
        assert_eq!(bank.iter().count(), 8);
        assert!(bank.validate().is_ok());
    }

    #[test]
    fn test_select_and_edit() {
        let mut bank = PatternBank::new();
        bank.select(PatternSlot::C);
        bank.current_mut()
            .toggle_step(Instrument::Cowbell, 3)
            .unwrap();

        assert!(bank.get(PatternSlot::C).unwrap().is_active(Instrument::Cowbell, 3));
        assert!(!bank.get(PatternSlot::A).unwrap().is_active(Instrument::Cowbell, 3));
    }

    #[test]
    fn test_replace_rejects_invalid_pattern() {
        let mut bank = PatternBank::new();
        let result = bank.replace(PatternSlot::B, Pattern::new("bad", -1.0));
        assert!(matches!(result, Err(BankError::Pattern { slot: PatternSlot::B, .. })));
        assert_eq!(bank.get(PatternSlot::B), Some(&Pattern::empty()));
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("c".parse::<PatternSlot>().unwrap(), PatternSlot::C);
        assert!("Z".parse::<PatternSlot>().is_err());
        assert_eq!(PatternSlot::H.to_string(), "H");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let bank = PatternBank::new();
        let json = bank.to_json().unwrap();
        assert_eq!(PatternBank::from_json(&json).unwrap(), bank);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_missing_rows_are_inactive() {
        let json = r#"{
            "patterns": { "A": { "name": "sparse", "bpm": 96.0, "steps": { "RS": [
                true, false, false, false, false, false, false, false,
                false, false, false, false, false, false, false, false
            ] } } },
            "current": "A"
        }"#;
        let bank = PatternBank::from_json(json).unwrap();
        assert!(bank.current().is_active(Instrument::Rimshot, 0));
        assert!(!bank.current().is_active(Instrument::BassDrum, 0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_current_must_exist() {
        let json = r#"{ "patterns": {}, "current": "D" }"#;
        let err = PatternBank::from_json(json).unwrap_err();
        assert!(err.to_string().contains("current slot D"));
    }
}
