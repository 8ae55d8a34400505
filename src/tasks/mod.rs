//! Background tasks module
//! 
//! This module contains the tokio tasks that drive a running countdown.

pub mod interval_scheduler;

// Re-export main types
pub use interval_scheduler::IntervalScheduler;
