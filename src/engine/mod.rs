//! Countdown engine module
//! 
//! This module contains the countdown state machine, the scheduling
//! capability it depends on, and display formatting.

pub mod countdown;
pub mod display;
pub mod scheduler;

use std::time::Duration;

// Re-export main types
pub use countdown::{ChangeListener, Countdown};
pub use display::format_remaining;
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler, TickAction};

/// Length of one Pomodoro in seconds (25:00)
pub const INITIAL_DURATION: u32 = 1500;

/// Interval between two ticks of a running countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
