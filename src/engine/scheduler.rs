/*
Look-ahead Step Scheduler
=========================

The scheduler never plays anything at "now". It is woken up every poll
interval (tens of milliseconds, with all the jitter a sleeping thread
brings), looks a short window into the future, and hands out every step
that falls inside it, each stamped with the exact audio-clock time it must
sound at.

                 poll           poll           poll
                  │              │              │
    audio clock ──┼──────────────┼──────────────┼──────────────►
                  │◄─ lookahead ─►│
                  │   s0     s1   │    s2    s3  │
                  │   ▲      ▲    │    ▲     ▲   │
                  └── dispatched here ─┘

Step times are computed, not measured:

    time(n) = origin + n × step_duration
    step_duration = 60 / bpm / 4          (sixteenth notes)

so a late poll only makes dispatch later, never the sound. As long as the
poll interval is shorter than the look-ahead window no step is ever missed.

States:

    Idle ──start()──► Running ──stop()──► Idle
             ▲                     │
             └─────────────────────┘  (restart from step 0 at the new "now")

`start` while running is ignored and its handler dropped. `stop` is
idempotent and may be raised from inside a step handler through a
[`StopHandle`]; no handler call happens after the flag is seen, even later
in the same poll.
*/

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, trace, warn};
use thiserror::Error;

use crate::sequencing::STEPS;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TempoError {
    #[error("tempo must be a positive, finite BPM value, got {0}")]
    Invalid(f64),
}

/// A validated tempo in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tempo(f64);

impl Tempo {
    pub fn new(bpm: f64) -> Result<Self, TempoError> {
        if bpm.is_finite() && bpm > 0.0 {
            Ok(Self(bpm))
        } else {
            Err(TempoError::Invalid(bpm))
        }
    }

    pub fn bpm(self) -> f64 {
        self.0
    }

    /// Length of one sixteenth-note step in seconds.
    pub fn step_duration(self) -> f64 {
        60.0 / self.0 / 4.0
    }
}

impl TryFrom<f64> for Tempo {
    type Error = TempoError;

    fn try_from(bpm: f64) -> Result<Self, Self::Error> {
        Tempo::new(bpm)
    }
}

/// Receives each step with its audio-clock time.
pub trait StepHandler {
    fn on_step(&mut self, step: usize, time: f64);
}

impl<F> StepHandler for F
where
    F: FnMut(usize, f64),
{
    fn on_step(&mut self, step: usize, time: f64) {
        self(step, time)
    }
}

/// Shared running flag.
///
/// Cloning is cheap; any clone can stop the scheduler, including from
/// inside its own step handler.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn arm(&self) {
        self.0.store(true, Ordering::Release);
    }
}

struct Session {
    tempo: Tempo,
    origin: f64,
    dispatched: u64,
    handler: Box<dyn StepHandler + Send>,
}

impl Session {
    fn next_time(&self) -> f64 {
        self.origin + self.dispatched as f64 * self.tempo.step_duration()
    }
}

pub struct Scheduler {
    lookahead: f64,
    running: StopHandle,
    step: usize,
    session: Option<Session>,
}

impl Scheduler {
    /// `lookahead` is how far past "now" each poll schedules, in seconds.
    pub fn new(lookahead: f64) -> Self {
        Self {
            lookahead,
            running: StopHandle::default(),
            step: 0,
            session: None,
        }
    }

    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    /// Begin at audio-clock `now`, step 0. Returns `false` (and drops
    /// `handler`) if already running.
    pub fn start<H>(&mut self, now: f64, tempo: Tempo, handler: H) -> bool
    where
        H: StepHandler + Send + 'static,
    {
        if self.is_running() {
            debug!("scheduler already running; start ignored");
            return false;
        }

        self.step = 0;
        self.session = Some(Session {
            tempo,
            origin: now,
            dispatched: 0,
            handler: Box::new(handler),
        });
        self.running.arm();
        debug!(
            "scheduler started at {now:.4}s, {} bpm, step {:.4}s",
            tempo.bpm(),
            tempo.step_duration()
        );
        true
    }

    /// Halt dispatch. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        if self.running.is_running() {
            debug!("scheduler stopped at step {}", self.step);
        }
        self.running.stop();
        self.session = None;
    }

    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Index of the next step to be dispatched.
    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn tempo(&self) -> Option<Tempo> {
        self.session.as_ref().map(|s| s.tempo)
    }

    /// A handle that stops this scheduler from anywhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }

    /// Audio-clock time of the next step, if running.
    pub fn next_event_time(&self) -> Option<f64> {
        self.session
            .as_ref()
            .filter(|_| self.is_running())
            .map(Session::next_time)
    }

    /// One poll: dispatch every step due before `now + lookahead`.
    /// Returns the number of steps dispatched.
    pub fn tick(&mut self, now: f64) -> usize {
        let horizon = now + self.lookahead;
        let mut fired = 0;

        if !horizon.is_finite() {
            warn!("poll at {now}s with look-ahead {}s ignored", self.lookahead);
            return 0;
        }

        if let Some(session) = self.session.as_mut() {
            while self.running.is_running() && session.next_time() < horizon {
                let time = session.next_time();
                trace!("step {} at {time:.4}s", self.step);
                session.handler.on_step(self.step, time);
                session.dispatched += 1;
                self.step = (self.step + 1) % STEPS;
                fired += 1;
            }
        }

        // Stopped through a handle: release the handler
        if !self.running.is_running() && self.session.take().is_some() {
            debug!("scheduler stopped at step {}", self.step);
        }
        fired
    }
}
