use crate::MIN_TIME;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Parameter Automation
====================

Drum voices never run an ADSR state machine. Every control movement is
written ahead of time as a list of timestamped events on an audio-clock
timeline, and the renderer asks the curve for its value at each sample's
time. That is what lets the scheduler work ahead of the audio thread: a
voice triggered 80 ms early still starts, sweeps and decays at exactly the
right sample.

Vocabulary
----------

  event       (time, kind, value). Events are kept sorted by time; events
              with equal times keep insertion order.

  set         Jump to `value` at `time` and hold it.

  exp ramp    Glide from the previous event's value to `value`, arriving at
              `time`. The glide is exponential:

                  v(t) = v0 * (v1 / v0) ^ ((t - t0) / (t1 - t0))

              which is a straight line in decibels, the way struck drums
              decay. Both ends must be strictly positive, which is why
              envelopes decay to a small floor instead of zero.

  linear ramp Straight-line glide, same bookkeeping as exp ramp.

  hold        After the last event the value stays where it ended.


   gain
    1.0 ┤●
        │ ╲
        │  ╲__
        │     ╲____
   1e-4 ┤          ‾‾‾‾‾‾‾●────────  (hold)
        └─┬──────────────┬───────→ t
        set(1.0, t)   exp_ramp(1e-4, t + decay)


Cancel and hold
---------------

`cancel_and_hold(t)` freezes the curve at whatever value it has at `t` and
drops every event at or after `t`. A ramp that was still travelling at `t`
is cut short so it lands on the frozen value exactly at `t`; samples before
`t` are untouched. Anything scheduled afterwards starts from that value. The hi-hat
choke is built on this: freeze the closed hat where it is, then ramp it to
the floor over a few milliseconds.
*/

/// Floor used by every decay envelope. Exponential ramps cannot reach zero.
pub const SILENCE_FLOOR: f32 = 0.0001;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutomationKind {
    Set,
    LinearRamp,
    ExponentialRamp,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationEvent {
    pub kind: AutomationKind,
    pub value: f32,
    pub time: f64,
}

impl AutomationEvent {
    pub fn set(value: f32, time: f64) -> Self {
        Self {
            kind: AutomationKind::Set,
            value,
            time,
        }
    }

    pub fn linear_ramp(value: f32, time: f64) -> Self {
        Self {
            kind: AutomationKind::LinearRamp,
            value,
            time,
        }
    }

    pub fn exponential_ramp(value: f32, time: f64) -> Self {
        Self {
            kind: AutomationKind::ExponentialRamp,
            value,
            time,
        }
    }

    /// Whether the event can be placed on a curve at all.
    pub fn is_valid(&self) -> bool {
        let finite = self.value.is_finite() && self.time.is_finite() && self.time >= 0.0;
        match self.kind {
            AutomationKind::ExponentialRamp => finite && self.value > 0.0,
            _ => finite,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutomationCurve {
    default_value: f32,
    events: Vec<AutomationEvent>,
}

impl AutomationCurve {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::with_capacity(8),
        }
    }

    /// Start over from `default_value` with no events, keeping the storage.
    pub fn reset(&mut self, default_value: f32) {
        self.default_value = default_value;
        self.events.clear();
    }

    /// Insert an event, keeping the list sorted. Invalid events are refused.
    pub fn insert(&mut self, event: AutomationEvent) -> bool {
        if !event.is_valid() {
            return false;
        }

        let index = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(index, event);
        true
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> bool {
        self.insert(AutomationEvent::set(value, time))
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) -> bool {
        self.insert(AutomationEvent::exponential_ramp(value, time))
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) -> bool {
        self.insert(AutomationEvent::linear_ramp(value, time))
    }

    /// Drop every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|e| e.time < time);
    }

    /// Freeze the curve at its value at `time` and drop everything after.
    ///
    /// A ramp that was in flight at `time` is shortened to end there, so the
    /// curve before `time` is unchanged.
    pub fn cancel_and_hold(&mut self, time: f64) {
        let held = self.value_at(time);
        let first_cancelled = self.events.partition_point(|e| e.time < time);

        let in_flight = self
            .events
            .get(first_cancelled)
            .filter(|e| e.time > time && e.kind != AutomationKind::Set)
            .map(|e| e.kind);

        self.events.truncate(first_cancelled);
        self.events.push(AutomationEvent {
            kind: in_flight.unwrap_or(AutomationKind::Set),
            value: held,
            time,
        });
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    /// Evaluate the curve at an audio-clock time.
    pub fn value_at(&self, time: f64) -> f32 {
        // Index of the first event strictly after `time`
        let next = self.events.partition_point(|e| e.time <= time);

        let (start_value, start_time) = match next.checked_sub(1) {
            Some(prev) => (self.events[prev].value, self.events[prev].time),
            None => (self.default_value, 0.0),
        };

        let Some(target) = self.events.get(next) else {
            return start_value;
        };

        let span = target.time - start_time;
        if span <= MIN_TIME as f64 {
            return start_value;
        }
        let progress = ((time - start_time) / span).clamp(0.0, 1.0) as f32;

        match target.kind {
            AutomationKind::Set => start_value,
            AutomationKind::LinearRamp => start_value + (target.value - start_value) * progress,
            AutomationKind::ExponentialRamp => {
                // Sign change or zero start: hold until the ramp lands
                if start_value <= 0.0 {
                    return start_value;
                }
                start_value * (target.value / start_value).powf(progress)
            }
        }
    }
}
