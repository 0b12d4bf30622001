use std::collections::BTreeMap;

use log::debug;

use crate::{
    dsp::SILENCE_FLOOR,
    graph::{GraphError, GraphExt, ParamRef, SignalGraph},
    instrument::Instrument,
};

/*
Hi-hat Choke
============

On the real machine the open and closed hats share one cymbal: striking the
open hat while the closed hat still rings cuts the closed hat off. Here the
coupling is an explicit registry.

  - Voices that can be choked register the gain stage of their latest
    trigger, together with the time their envelope ends.
  - Voices that choke look their targets up and force a fast release on
    the registered gain:

        cancel_and_hold(gain, t)            freeze wherever the decay is
        exp_ramp(gain, floor, t + 3 ms)     then drop to silence

  - A handle is only a reference. The registry never keeps a node alive,
    and once `until` has passed the handle is discarded instead of used.

Because the times are audio-clock times the choke lands on the right
sample even though the scheduler issues it up to a look-ahead window early.
*/

/// Length of the forced release.
pub const CHOKE_RELEASE: f64 = 0.003;

/// Non-owning reference to a sounding voice's output gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChokeHandle {
    pub gain: ParamRef,
    /// After this time the voice is silent anyway.
    pub until: f64,
}

/// Which voices choke which.
pub fn choke_targets(instrument: Instrument) -> &'static [Instrument] {
    match instrument {
        Instrument::OpenHat => &[Instrument::ClosedHat],
        _ => &[],
    }
}

/// Whether triggers of `instrument` should be registered for choking.
pub fn is_chokable(instrument: Instrument) -> bool {
    matches!(instrument, Instrument::ClosedHat)
}

#[derive(Debug, Default)]
pub struct ChokeRegistry {
    handles: BTreeMap<Instrument, ChokeHandle>,
}

impl ChokeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the latest trigger of `instrument`, replacing any earlier one.
    pub fn register(&mut self, instrument: Instrument, handle: ChokeHandle) {
        self.handles.insert(instrument, handle);
    }

    pub fn clear(&mut self, instrument: Instrument) {
        self.handles.remove(&instrument);
    }

    pub fn clear_all(&mut self) {
        self.handles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handle for `instrument` if it is still sounding at `time`.
    ///
    /// Expired handles are dropped.
    pub fn active(&mut self, instrument: Instrument, time: f64) -> Option<ChokeHandle> {
        let handle = *self.handles.get(&instrument)?;
        if handle.until <= time {
            self.handles.remove(&instrument);
            return None;
        }
        Some(handle)
    }

    /// Force a fast release on `target` at `time`. Returns whether anything
    /// was choked.
    ///
    /// The handle stays registered; the caller clears it once the release
    /// has actually been committed.
    pub fn choke<G: SignalGraph + ?Sized>(
        &mut self,
        graph: &mut G,
        target: Instrument,
        time: f64,
    ) -> Result<bool, GraphError> {
        let Some(handle) = self.active(target, time) else {
            return Ok(false);
        };

        graph.cancel_and_hold(handle.gain, time)?;
        graph.exponential_ramp_to_value_at_time(handle.gain, SILENCE_FLOOR, time + CHOKE_RELEASE)?;

        debug!("choked {target} at {time:.4}s");
        Ok(true)
    }
}
