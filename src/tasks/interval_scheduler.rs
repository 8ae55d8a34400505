//! Interval scheduler backed by tokio tasks

use std::{collections::HashMap, time::Duration};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::engine::{ScheduleHandle, Scheduler, TickAction};

/// Scheduler that runs each registration as its own tokio interval task
#[derive(Debug)]
pub struct IntervalScheduler {
    runtime: Handle,
    next_id: u64,
    tasks: HashMap<ScheduleHandle, JoinHandle<()>>,
}

impl IntervalScheduler {
    /// Create a scheduler spawning its tasks onto `runtime`
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of registrations still running
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, period: Duration, mut action: TickAction) -> ScheduleHandle {
        self.next_id += 1;
        let handle = ScheduleHandle::new(self.next_id);

        let first_tick = Instant::now() + period;
        let task = self.runtime.spawn(async move {
            // Missed ticks burst to catch up, so a stalled runtime does not lose seconds
            let mut interval = interval_at(first_tick, period);
            loop {
                interval.tick().await;
                action(handle);
            }
        });

        debug!("Spawned interval task for {} every {:?}", handle, period);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Aborted interval task for {}", handle);
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    use crate::engine::Countdown;

    fn counting_action(counter: &Arc<AtomicUsize>) -> TickAction {
        let counter = Arc::clone(counter);
        Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_every_period_until_cancelled() {
        let mut scheduler = IntervalScheduler::new(Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));
        let handle = scheduler.schedule(Duration::from_secs(1), counting_action(&counter));

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        scheduler.cancel(handle);
        assert_eq!(scheduler.active_count(), 0);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_per_handle() {
        let mut scheduler = IntervalScheduler::new(Handle::current());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let handle = scheduler.schedule(Duration::from_secs(1), counting_action(&first));
        scheduler.schedule(Duration::from_secs(1), counting_action(&second));

        scheduler.cancel(handle);
        scheduler.cancel(handle);
        sleep(Duration::from_millis(2500)).await;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.active_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drives_a_countdown_in_real_time() {
        let countdown = Countdown::new(IntervalScheduler::new(Handle::current()));

        countdown.start();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(countdown.display(), "24:59");

        countdown.start();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(countdown.display(), "24:58");

        countdown.stop();
        sleep(Duration::from_secs(3)).await;
        assert_eq!(countdown.display(), "24:58");

        countdown.reset();
        assert_eq!(countdown.display(), "25:00");
        assert!(!countdown.is_running());
    }
}
