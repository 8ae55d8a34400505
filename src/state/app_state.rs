//! Main application state management

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use tokio::{runtime::Handle, sync::watch};
use tracing::{info, warn};

use super::TimerState;
use crate::{
    controls::ControlPanel,
    engine::Countdown,
    tasks::IntervalScheduler,
};

/// Main application state shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// The countdown and the buttons wired to it
    pub timer: Countdown<IntervalScheduler>,
    pub controls: ControlPanel,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Latest timer snapshot, updated on every countdown change
    pub timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState whose countdown ticks on `runtime`
    pub fn new(port: u16, host: String, runtime: Handle) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        let timer = Countdown::with_listener(IntervalScheduler::new(runtime), move |state| {
            timer_update_tx.send_replace(state.clone());
        });
        let controls = ControlPanel::for_countdown(&timer);

        Self {
            timer,
            controls,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_rx,
        }
    }

    /// Activate the control with the given label.
    ///
    /// Returns the resulting timer state, or `None` when no control has that label.
    pub fn activate(&self, label: &str) -> Option<TimerState> {
        let button = self.controls.button(label)?;
        info!("Control activated: {}", button.label());
        button.activate();

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(button.label().to_lowercase());
        } else {
            warn!("Failed to record last action");
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Some(self.timer.snapshot())
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.timer.snapshot()
    }

    /// Subscribe to timer state changes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_rx.clone()
    }

    /// Plain-text rendering of the widget: display line, then the control row
    pub fn render(&self) -> String {
        format!("{}\n{}\n", self.timer.display(), self.controls)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
