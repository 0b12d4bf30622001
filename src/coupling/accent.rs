use crate::instrument::Instrument;

/// How strongly the accent bus pushes each voice.
pub fn accent_sensitivity(instrument: Instrument) -> f32 {
    match instrument {
        Instrument::BassDrum => 0.6,
        Instrument::ClosedHat | Instrument::OpenHat | Instrument::Cymbal | Instrument::Ride => 0.4,
        Instrument::Snare
        | Instrument::LowTom
        | Instrument::MidTom
        | Instrument::HighTom
        | Instrument::Rimshot
        | Instrument::Clap
        | Instrument::Cowbell => 0.5,
    }
}

/// Gain multiplier for a trigger: `1 + k * accent`.
///
/// `accent` is clamped to 0..=1; non-finite input counts as no accent.
pub fn accent_gain(instrument: Instrument, accent: f32) -> f32 {
    let accent = if accent.is_finite() {
        accent.clamp(0.0, 1.0)
    } else {
        0.0
    };
    1.0 + accent_sensitivity(instrument) * accent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_accent_is_unity() {
        for instrument in Instrument::ALL {
            assert_eq!(accent_gain(instrument, 0.0), 1.0);
        }
    }

    #[test]
    fn full_accent_per_voice() {
        assert!((accent_gain(Instrument::BassDrum, 1.0) - 1.6).abs() < 1e-6);
        assert!((accent_gain(Instrument::ClosedHat, 1.0) - 1.4).abs() < 1e-6);
        assert!((accent_gain(Instrument::Snare, 1.0) - 1.5).abs() < 1e-6);
        assert!((accent_gain(Instrument::Snare, 0.5) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn accent_is_clamped() {
        assert_eq!(accent_gain(Instrument::Cowbell, 4.0), 1.5);
        assert_eq!(accent_gain(Instrument::Cowbell, -1.0), 1.0);
        assert_eq!(accent_gain(Instrument::Cowbell, f32::NAN), 1.0);
    }
}
