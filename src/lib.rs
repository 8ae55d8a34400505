//! Pomodoro Timer - A 25 minute countdown with Start, Stop and Reset controls
//! 
//! This library provides the countdown engine, the scheduling capability it
//! runs on, the control buttons bound to it, and an HTTP surface for hosting.

pub mod config;
pub mod engine;
pub mod controls;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Countdown, ManualScheduler, Scheduler, INITIAL_DURATION};
pub use controls::{ControlPanel, TimerButton};
pub use state::{AppState, TimerState};
pub use tasks::IntervalScheduler;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
