use std::sync::{Arc, PoisonError, RwLock};

use log::{trace, warn};

use crate::{
    coupling::Coupling,
    engine::scheduler::StepHandler,
    graph::SignalGraph,
    sequencing::{PatternBank, PlaybackState},
    voices::SharedVoiceParams,
};

/// Transport state readable from outside the player.
pub type SharedPlayback = Arc<RwLock<PlaybackState>>;

/// Default accent amount applied on accented steps.
pub const DEFAULT_ACCENT: f32 = 1.0;

/// Step handler that plays the current pattern.
///
/// On every step it reads the selected pattern and the voice parameters as
/// they are right now, then fires each active instrument through the
/// coupling layer at the step's audio-clock time. A failed trigger is
/// logged and skipped; the rest of the step and the scheduler carry on.
pub struct PatternPlayer<G> {
    graph: G,
    bank: Arc<RwLock<PatternBank>>,
    params: SharedVoiceParams,
    coupling: Coupling,
    accent: f32,
    playback: SharedPlayback,
    failed: u64,
}

impl<G: SignalGraph> PatternPlayer<G> {
    pub fn new(graph: G, bank: Arc<RwLock<PatternBank>>, params: SharedVoiceParams) -> Self {
        let bpm = bank
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current()
            .bpm;

        Self {
            graph,
            bank,
            params,
            coupling: Coupling::new(),
            accent: DEFAULT_ACCENT,
            playback: Arc::new(RwLock::new(PlaybackState {
                bpm,
                ..PlaybackState::default()
            })),
            failed: 0,
        }
    }

    /// Accent amount (0..=1) used on steps marked in the accent row.
    pub fn with_accent(mut self, accent: f32) -> Self {
        self.accent = accent.clamp(0.0, 1.0);
        self
    }

    pub fn playback(&self) -> SharedPlayback {
        Arc::clone(&self.playback)
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// Triggers that failed since the player was created.
    pub fn failed_triggers(&self) -> u64 {
        self.failed
    }

    /// Fire everything active at `step`. Returns the number of voices played.
    pub fn play_step(&mut self, step: usize, time: f64) -> usize {
        let bank = self.bank.read().unwrap_or_else(PoisonError::into_inner);
        let pattern = bank.current();
        let accent = if pattern.is_accented(step) {
            self.accent
        } else {
            0.0
        };

        {
            let mut playback = self.playback.write().unwrap_or_else(PoisonError::into_inner);
            playback.is_playing = true;
            playback.current_step = step;
            playback.bpm = pattern.bpm;
        }

        let mut played = 0;
        for instrument in pattern.active_instruments(step) {
            let settings = self.params.settings(instrument, accent);
            match self
                .coupling
                .trigger(&mut self.graph, instrument, time, &settings)
            {
                Ok(_) => {
                    trace!("{instrument} at {time:.4}s");
                    played += 1;
                }
                Err(err) => {
                    self.failed += 1;
                    warn!("dropped {instrument} at step {step} ({time:.4}s): {err}");
                }
            }
        }
        played
    }
}

impl<G: SignalGraph> StepHandler for PatternPlayer<G> {
    fn on_step(&mut self, step: usize, time: f64) {
        self.play_step(step, time);
    }
}
