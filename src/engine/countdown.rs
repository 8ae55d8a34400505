//! Countdown state machine

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};
use tracing::{debug, info, trace};

use super::{
    scheduler::{ScheduleHandle, Scheduler},
    INITIAL_DURATION, TICK_PERIOD,
};
use crate::state::TimerState;

/// Callback receiving a fresh snapshot after every state change.
///
/// Runs with the engine locked, so it must not call back into the countdown.
pub type ChangeListener = Box<dyn Fn(&TimerState) + Send + Sync + 'static>;

struct CountdownEngine<S: Scheduler> {
    remaining_seconds: u32,
    /// The only registered schedule; running iff present
    active: Option<ScheduleHandle>,
    scheduler: S,
    listener: Option<ChangeListener>,
}

impl<S: Scheduler> CountdownEngine<S> {
    fn is_running(&self) -> bool {
        self.active.is_some()
    }

    fn snapshot(&self) -> TimerState {
        TimerState::from_parts(self.remaining_seconds, self.is_running())
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener(&self.snapshot());
        }
    }

    /// Cancel the active schedule, if any. Returns whether one was cancelled.
    fn halt(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    fn tick(&mut self, handle: ScheduleHandle) {
        if self.active != Some(handle) {
            trace!("Ignoring tick from inactive {}", handle);
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        trace!("Tick: {} seconds remaining", self.remaining_seconds);

        if self.remaining_seconds == 0 {
            self.halt();
            info!("Countdown finished");
        }

        self.notify();
    }
}

impl<S: Scheduler> Drop for CountdownEngine<S> {
    fn drop(&mut self) {
        if self.halt() {
            debug!("Countdown dropped while running, schedule cancelled");
        }
    }
}

/// Pomodoro countdown from 25:00 to 00:00, one tick per second.
///
/// Cheap to clone; clones share one engine. The engine owns at most one
/// schedule on its `Scheduler`, so repeated `start` calls never speed the
/// countdown up. Dropping the last clone cancels a running schedule.
pub struct Countdown<S: Scheduler> {
    inner: Arc<Mutex<CountdownEngine<S>>>,
}

impl<S: Scheduler> Countdown<S> {
    /// Create a stopped countdown at 25:00
    pub fn new(scheduler: S) -> Self {
        Self::build(scheduler, None)
    }

    /// Create a stopped countdown that reports every state change to `listener`
    pub fn with_listener<F>(scheduler: S, listener: F) -> Self
    where
        F: Fn(&TimerState) + Send + Sync + 'static,
    {
        Self::build(scheduler, Some(Box::new(listener)))
    }

    fn build(scheduler: S, listener: Option<ChangeListener>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CountdownEngine {
                remaining_seconds: INITIAL_DURATION,
                active: None,
                scheduler,
                listener,
            })),
        }
    }

    fn lock(inner: &Mutex<CountdownEngine<S>>) -> MutexGuard<'_, CountdownEngine<S>> {
        inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Begin ticking. Does nothing while already running or at 00:00.
    pub fn start(&self) {
        let mut engine = Self::lock(&self.inner);
        if engine.is_running() {
            debug!("Start ignored, countdown already running");
            return;
        }
        if engine.remaining_seconds == 0 {
            debug!("Start ignored, countdown finished; reset first");
            return;
        }

        let weak: Weak<Mutex<CountdownEngine<S>>> = Arc::downgrade(&self.inner);
        let handle = engine.scheduler.schedule(
            TICK_PERIOD,
            Box::new(move |handle| {
                if let Some(inner) = weak.upgrade() {
                    Self::lock(&inner).tick(handle);
                }
            }),
        );
        engine.active = Some(handle);

        info!("Countdown started at {} ({})", engine.snapshot().display, handle);
        engine.notify();
    }

    /// Halt ticking, keeping the remaining time. Does nothing while stopped.
    pub fn stop(&self) {
        let mut engine = Self::lock(&self.inner);
        if engine.halt() {
            info!("Countdown stopped at {}", engine.snapshot().display);
            engine.notify();
        } else {
            debug!("Stop ignored, countdown not running");
        }
    }

    /// Halt ticking and restore 25:00, from any state
    pub fn reset(&self) {
        let mut engine = Self::lock(&self.inner);
        engine.halt();
        engine.remaining_seconds = INITIAL_DURATION;

        info!("Countdown reset to {}", engine.snapshot().display);
        engine.notify();
    }

    /// Current remaining time, running flag and display string
    pub fn snapshot(&self) -> TimerState {
        Self::lock(&self.inner).snapshot()
    }

    /// Seconds left on the countdown
    pub fn remaining_seconds(&self) -> u32 {
        Self::lock(&self.inner).remaining_seconds
    }

    /// Check if the countdown is ticking
    pub fn is_running(&self) -> bool {
        Self::lock(&self.inner).is_running()
    }

    /// `mm:ss` rendering of the remaining time
    pub fn display(&self) -> String {
        self.snapshot().display
    }
}

impl<S: Scheduler> Clone for Countdown<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Scheduler> fmt::Debug for Countdown<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = Self::lock(&self.inner);
        f.debug_struct("Countdown")
            .field("remaining_seconds", &engine.remaining_seconds)
            .field("active", &engine.active)
            .finish()
    }
}
