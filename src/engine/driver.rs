use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error};

use crate::engine::{
    clock::AudioClock,
    scheduler::{Scheduler, StepHandler, StopHandle, Tempo},
};

/// Runs a [`Scheduler`] on its own thread, polling every `poll_interval`.
///
/// Step handlers run on the polling thread with the scheduler locked, so a
/// handler must not call back into the driver. To stop from inside a
/// handler use the [`StopHandle`] from [`PollingDriver::stop_handle`].
pub struct PollingDriver {
    scheduler: Arc<Mutex<Scheduler>>,
    clock: Arc<dyn AudioClock>,
    poll_interval: Duration,
    worker: Option<JoinHandle<()>>,
}

impl PollingDriver {
    pub fn new(clock: Arc<dyn AudioClock>, lookahead: f64, poll_interval: Duration) -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(Scheduler::new(lookahead))),
            clock,
            poll_interval,
            worker: None,
        }
    }

    fn scheduler(&self) -> MutexGuard<'_, Scheduler> {
        self.scheduler.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start scheduling from the clock's current time. Returns `false` if
    /// already running.
    pub fn start<H>(&mut self, tempo: Tempo, handler: H) -> bool
    where
        H: StepHandler + Send + 'static,
    {
        if self.is_running() {
            return false;
        }
        // A worker from a previous run exits within one poll of its stop
        self.join_worker();

        if !self.scheduler().start(self.clock.now(), tempo, handler) {
            return false;
        }

        let scheduler = Arc::clone(&self.scheduler);
        let clock = Arc::clone(&self.clock);
        let poll_interval = self.poll_interval;

        let worker = thread::Builder::new()
            .name("step-scheduler".into())
            .spawn(move || loop {
                {
                    let mut scheduler = scheduler.lock().unwrap_or_else(PoisonError::into_inner);
                    scheduler.tick(clock.now());
                    if !scheduler.is_running() {
                        break;
                    }
                }
                thread::sleep(poll_interval);
            });

        match worker {
            Ok(handle) => {
                self.worker = Some(handle);
                debug!("polling every {poll_interval:?}");
                true
            }
            Err(err) => {
                error!("could not spawn scheduler thread: {err}");
                self.scheduler().stop();
                false
            }
        }
    }

    pub fn stop(&mut self) {
        self.scheduler().stop();
        self.join_worker();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler().is_running()
    }

    pub fn current_step(&self) -> usize {
        self.scheduler().current_step()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.scheduler().stop_handle()
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("scheduler thread panicked");
            }
        }
    }
}

impl Drop for PollingDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
