//! Timer state snapshot published by the countdown engine

use serde::{Deserialize, Serialize};

use crate::engine::{format_remaining, INITIAL_DURATION};

/// Point-in-time view of the countdown, used for rendering the display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub running: bool,
    /// `mm:ss` rendering of `remaining_seconds`
    pub display: String,
}

impl TimerState {
    /// Create the state of a freshly mounted timer (25:00, stopped)
    pub fn new() -> Self {
        Self::from_parts(INITIAL_DURATION, false)
    }

    /// Build a snapshot, deriving the display string
    pub fn from_parts(remaining_seconds: u32, running: bool) -> Self {
        Self {
            remaining_seconds,
            running,
            display: format_remaining(remaining_seconds),
        }
    }

    /// Check if the countdown is ticking
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Human readable status word
    pub fn status(&self) -> &'static str {
        if self.running { "running" } else { "stopped" }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_full_and_stopped() {
        let state = TimerState::new();
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.display, "25:00");
        assert!(!state.is_running());
        assert_eq!(state.status(), "stopped");
    }

    #[test]
    fn display_follows_remaining_seconds() {
        let state = TimerState::from_parts(1497, true);
        assert_eq!(state.display, "24:57");
        assert_eq!(state.status(), "running");
    }
}
