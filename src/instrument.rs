use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The twelve voices of the kit.
///
/// Variants are declared in the kit's canonical order; `Ord` and
/// [`Instrument::ALL`] both follow it, so anything iterating instruments
/// (pattern rows, triggers within a step) sees them in the same order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Instrument {
    #[cfg_attr(feature = "serde", serde(rename = "BD"))]
    BassDrum,
    #[cfg_attr(feature = "serde", serde(rename = "SD"))]
    Snare,
    #[cfg_attr(feature = "serde", serde(rename = "LT"))]
    LowTom,
    #[cfg_attr(feature = "serde", serde(rename = "MT"))]
    MidTom,
    #[cfg_attr(feature = "serde", serde(rename = "HT"))]
    HighTom,
    #[cfg_attr(feature = "serde", serde(rename = "RS"))]
    Rimshot,
    #[cfg_attr(feature = "serde", serde(rename = "CP"))]
    Clap,
    #[cfg_attr(feature = "serde", serde(rename = "CH"))]
    ClosedHat,
    #[cfg_attr(feature = "serde", serde(rename = "OH"))]
    OpenHat,
    #[cfg_attr(feature = "serde", serde(rename = "CY"))]
    Cymbal,
    #[cfg_attr(feature = "serde", serde(rename = "RD"))]
    Ride,
    #[cfg_attr(feature = "serde", serde(rename = "CB"))]
    Cowbell,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown instrument code {0:?}")]
pub struct UnknownInstrument(pub String);

impl Instrument {
    pub const ALL: [Instrument; 12] = [
        Instrument::BassDrum,
        Instrument::Snare,
        Instrument::LowTom,
        Instrument::MidTom,
        Instrument::HighTom,
        Instrument::Rimshot,
        Instrument::Clap,
        Instrument::ClosedHat,
        Instrument::OpenHat,
        Instrument::Cymbal,
        Instrument::Ride,
        Instrument::Cowbell,
    ];

    /// Two-letter panel code.
    pub fn code(self) -> &'static str {
        match self {
            Instrument::BassDrum => "BD",
            Instrument::Snare => "SD",
            Instrument::LowTom => "LT",
            Instrument::MidTom => "MT",
            Instrument::HighTom => "HT",
            Instrument::Rimshot => "RS",
            Instrument::Clap => "CP",
            Instrument::ClosedHat => "CH",
            Instrument::OpenHat => "OH",
            Instrument::Cymbal => "CY",
            Instrument::Ride => "RD",
            Instrument::Cowbell => "CB",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::BassDrum => "bass drum",
            Instrument::Snare => "snare drum",
            Instrument::LowTom => "low tom",
            Instrument::MidTom => "mid tom",
            Instrument::HighTom => "high tom",
            Instrument::Rimshot => "rimshot",
            Instrument::Clap => "hand clap",
            Instrument::ClosedHat => "closed hi-hat",
            Instrument::OpenHat => "open hi-hat",
            Instrument::Cymbal => "cymbal",
            Instrument::Ride => "ride",
            Instrument::Cowbell => "cowbell",
        }
    }

    /// Position in [`Instrument::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|i| i.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}
