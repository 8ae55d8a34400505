//! Control surface module
//! 
//! This module contains the stateless buttons that trigger countdown operations.

pub mod button;
pub mod panel;

// Re-export main types
pub use button::TimerButton;
pub use panel::ControlPanel;
