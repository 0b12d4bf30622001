use crate::{
    dsp::{FilterType, Waveform},
    graph::{GraphError, GraphExt, SignalGraph},
    voices::{VoiceOutput, VoiceSettings},
};

/*
Metal Section
=============

Hats, cymbal and ride all share one sound source: six square waves at
fixed, mutually inharmonic pitches. Summed, they make a dense clangy
cluster with no clear pitch. The voices differ only in how that cluster is
filtered and how long it is allowed to ring.

    205.3 ─┐
    304.4 ─┤
    369.6 ─┼─► ×0.15 ─► BP 3.44k ─► BP 7.1k* ─► [HP]* ─► VCA ─► out
    522.7 ─┤            Q 2         Q 2
    540.0 ─┤
    800.0 ─┘

    * per voice:
      CH  window 0.19·(0.5 + decay)                 tail 60 ms
      OH  window 0.49·(0.5 + decay)                 tail 100 ms
      CY  window 1.2·(0.5 + decay), HP 3k + 4k·tone  tail 100 ms
      RD  window 1.9·(0.5 + decay), BP2 at 7.1k·(0.75 + 0.5·tone)

The bank is rebuilt for every trigger, so each hit gets its own
oscillators and its own envelope. Nothing is shared between triggers.
*/

pub const BANK_PITCHES: [f32; 6] = [205.3, 304.4, 369.6, 522.7, 540.0, 800.0];
const BANK_MIX: f32 = 0.15;
const LOW_BAND: f32 = 3440.0;
const HIGH_BAND: f32 = 7100.0;
const BAND_Q: f32 = 2.0;

/// How one member of the family shapes the bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetalShape {
    /// Envelope length in seconds.
    pub window: f64,
    /// Extra time the squares keep running after the envelope.
    pub tail: f64,
    /// Centre of the second band-pass.
    pub high_band: f32,
    /// Optional brightness high-pass `(cutoff, q)`.
    pub highpass: Option<(f32, f32)>,
}

impl MetalShape {
    /// Decay knob scaled around a base length.
    pub fn window_for(base: f64, decay: f32) -> f64 {
        base * (0.5 + decay as f64)
    }

    pub fn closed_hat(settings: &VoiceSettings) -> Self {
        Self {
            window: Self::window_for(0.19, settings.decay),
            tail: 0.06,
            high_band: HIGH_BAND,
            highpass: None,
        }
    }

    pub fn open_hat(settings: &VoiceSettings) -> Self {
        Self {
            window: Self::window_for(0.49, settings.decay),
            tail: 0.1,
            high_band: HIGH_BAND,
            highpass: None,
        }
    }

    pub fn cymbal(settings: &VoiceSettings) -> Self {
        Self {
            window: Self::window_for(1.2, settings.decay),
            tail: 0.1,
            high_band: HIGH_BAND,
            highpass: Some((3000.0 + 4000.0 * settings.tone, 1.0)),
        }
    }

    pub fn ride(settings: &VoiceSettings) -> Self {
        Self {
            window: Self::window_for(1.9, settings.decay),
            tail: 0.1,
            high_band: HIGH_BAND * (0.75 + 0.5 * settings.tone),
            highpass: None,
        }
    }
}

/// Build the square bank, shape it and schedule its envelope.
pub fn metal<G: SignalGraph + ?Sized>(
    graph: &mut G,
    time: f64,
    settings: &VoiceSettings,
    shape: MetalShape,
) -> Result<VoiceOutput, GraphError> {
    let amp = settings.amplitude();

    let mix = graph.gain(BANK_MIX)?;
    let low = graph.bandpass(LOW_BAND, BAND_Q)?;
    let high = graph.bandpass(shape.high_band, BAND_Q)?;
    let vca = graph.gain(amp)?;

    match shape.highpass {
        Some((cutoff, q)) => {
            let hp = graph.filter(FilterType::HighPass, cutoff, q)?;
            graph.chain(&[mix, low, high, hp, vca])?;
        }
        None => {
            graph.chain(&[mix, low, high, vca])?;
        }
    }
    graph.connect_output(vca)?;

    let stop = time + shape.window + shape.tail;
    for pitch in BANK_PITCHES {
        let osc = graph.oscillator(Waveform::Square, pitch)?;
        graph.connect(osc, mix)?;
        graph.play(osc, time, stop)?;
    }

    graph.decay_envelope(vca.gain(), amp, time, shape.window)?;

    Ok(VoiceOutput {
        gain: vca.gain(),
        end: time + shape.window,
    })
}
