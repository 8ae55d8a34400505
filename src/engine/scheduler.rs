//! Scheduling capability used by the countdown engine

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tracing::trace;

/// Opaque handle identifying one registered repeating action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    /// Wrap a raw schedule id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw schedule id
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schedule#{}", self.0)
    }
}

/// Action fired on every period; receives the handle it was registered under
pub type TickAction = Box<dyn FnMut(ScheduleHandle) + Send + 'static>;

/// Repeat an action every fixed interval until cancelled.
///
/// Implementations must stop firing a handle once `cancel` returns for it.
/// Cancelling an unknown or already cancelled handle is a no-op.
pub trait Scheduler: Send + 'static {
    /// Register `action` to fire once per `period`, first firing one period from now
    fn schedule(&mut self, period: Duration, action: TickAction) -> ScheduleHandle;

    /// Cancel a previously registered action
    fn cancel(&mut self, handle: ScheduleHandle);
}

struct ManualEntry {
    period: Duration,
    next_due: Duration,
    action: Option<TickAction>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<ScheduleHandle, ManualEntry>,
    scheduled: Vec<ScheduleHandle>,
    cancelled: Vec<ScheduleHandle>,
}

/// Scheduler driven by a virtual clock that only moves on `advance`.
///
/// Clones share the same clock and registrations, so a test can keep one
/// clone while the engine owns another. Every `schedule` and `cancel` call is
/// recorded for inspection.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the virtual clock forward, firing every action that falls due.
    ///
    /// Actions fire in due order with no internal lock held, so an action may
    /// call back into `schedule` or `cancel`.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;

        loop {
            let mut inner = self.lock();
            let fired = inner
                .entries
                .iter_mut()
                .filter(|(_, entry)| entry.next_due <= target)
                .min_by_key(|(handle, entry)| (entry.next_due, **handle))
                .map(|(handle, entry)| {
                    let due = entry.next_due;
                    entry.next_due += entry.period;
                    (*handle, due, entry.action.take())
                });

            let Some((handle, due, action)) = fired else {
                inner.now = target;
                return;
            };
            inner.now = due;
            drop(inner);

            if let Some(mut action) = action {
                trace!("Firing {} at {:?}", handle, due);
                action(handle);

                // Put the action back unless it was cancelled while firing
                if let Some(entry) = self.lock().entries.get_mut(&handle) {
                    entry.action = Some(action);
                }
            }
        }
    }

    /// Move the virtual clock forward by whole seconds
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of registrations still firing
    pub fn active_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Every handle returned by `schedule`, in order
    pub fn scheduled(&self) -> Vec<ScheduleHandle> {
        self.lock().scheduled.clone()
    }

    /// Every handle passed to `cancel`, in order, including redundant calls
    pub fn cancelled(&self) -> Vec<ScheduleHandle> {
        self.lock().cancelled.clone()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, period: Duration, action: TickAction) -> ScheduleHandle {
        let mut inner = self.lock();
        inner.next_id += 1;
        let handle = ScheduleHandle::new(inner.next_id);
        let next_due = inner.now + period;
        inner.entries.insert(
            handle,
            ManualEntry {
                period,
                next_due,
                action: Some(action),
            },
        );
        inner.scheduled.push(handle);
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        let mut inner = self.lock();
        inner.cancelled.push(handle);
        inner.entries.remove(&handle);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("active", &inner.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
