//! Cross-voice interaction: accent scaling and hi-hat choke.
//!
//! [`Coupling::trigger`] is the single entry point the player uses to fire
//! a voice. It resolves nothing itself (settings arrive already scaled by
//! [`accent_gain`]); it applies chokes, plays the voice, and keeps the choke
//! registry up to date.

mod accent;
pub mod choke;

pub use accent::{accent_gain, accent_sensitivity};
pub use choke::{ChokeHandle, ChokeRegistry};

use log::warn;

use crate::{
    graph::{GraphError, SignalGraph},
    instrument::Instrument,
    voices::{self, VoiceOutput, VoiceSettings},
};

#[derive(Debug, Default)]
pub struct Coupling {
    chokes: ChokeRegistry,
}

impl Coupling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chokes(&self) -> &ChokeRegistry {
        &self.chokes
    }

    /// Forget every registered voice, e.g. when playback stops.
    pub fn reset(&mut self) {
        self.chokes.clear_all();
    }

    /// Fire one voice at audio-clock `time`.
    ///
    /// Everything the trigger issues is committed to the graph as one unit;
    /// on error the partial graph is aborted and the error returned. A failed
    /// choke only costs the choke, not the trigger. The choke registry only
    /// changes once the commit has gone through.
    pub fn trigger<G: SignalGraph + ?Sized>(
        &mut self,
        graph: &mut G,
        instrument: Instrument,
        time: f64,
        settings: &VoiceSettings,
    ) -> Result<VoiceOutput, GraphError> {
        let (output, edits) = match self.fire(graph, instrument, time, settings) {
            Ok(fired) => fired,
            Err(err) => {
                graph.abort();
                return Err(err);
            }
        };

        graph.commit()?;
        edits.apply(&mut self.chokes);
        Ok(output)
    }

    fn fire<G: SignalGraph + ?Sized>(
        &mut self,
        graph: &mut G,
        instrument: Instrument,
        time: f64,
        settings: &VoiceSettings,
    ) -> Result<(VoiceOutput, RegistryEdits), GraphError> {
        let mut edits = RegistryEdits::default();

        for &target in choke::choke_targets(instrument) {
            match self.chokes.choke(graph, target, time) {
                Ok(true) => edits.released.push(target),
                Ok(false) => {}
                Err(err) => warn!("{instrument} could not choke {target}: {err}"),
            }
        }

        let output = voices::play(graph, instrument, time, settings)?;

        if choke::is_chokable(instrument) {
            edits.registered = Some((
                instrument,
                ChokeHandle {
                    gain: output.gain,
                    until: output.end,
                },
            ));
        }
        Ok((output, edits))
    }
}

/// Registry changes staged by one trigger.
#[derive(Debug, Default)]
struct RegistryEdits {
    released: Vec<Instrument>,
    registered: Option<(Instrument, ChokeHandle)>,
}

impl RegistryEdits {
    fn apply(self, registry: &mut ChokeRegistry) {
        for target in self.released {
            registry.clear(target);
        }
        if let Some((instrument, handle)) = self.registered {
            registry.register(instrument, handle);
        }
    }
}
