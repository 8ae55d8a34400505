//! Start/Stop/Reset buttons bound to one countdown

use std::fmt;

use super::TimerButton;
use crate::engine::{Countdown, Scheduler};

pub const START: &str = "Start";
pub const STOP: &str = "Stop";
pub const RESET: &str = "Reset";

/// The row of controls shown under the timer display
#[derive(Debug, Clone)]
pub struct ControlPanel {
    buttons: Vec<TimerButton>,
}

impl ControlPanel {
    /// Wire Start, Stop and Reset to the given countdown
    pub fn for_countdown<S: Scheduler>(countdown: &Countdown<S>) -> Self {
        let start = countdown.clone();
        let stop = countdown.clone();
        let reset = countdown.clone();

        Self {
            buttons: vec![
                TimerButton::new(START, move || start.start()),
                TimerButton::new(STOP, move || stop.stop()),
                TimerButton::new(RESET, move || reset.reset()),
            ],
        }
    }

    /// Find a button by label, ignoring case
    pub fn button(&self, label: &str) -> Option<&TimerButton> {
        self.buttons
            .iter()
            .find(|button| button.label().eq_ignore_ascii_case(label))
    }

    /// All buttons in display order
    pub fn buttons(&self) -> &[TimerButton] {
        &self.buttons
    }

    /// Labels of all buttons in display order
    pub fn labels(&self) -> Vec<String> {
        self.buttons.iter().map(|b| b.label().to_string()).collect()
    }
}

impl fmt::Display for ControlPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", button)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualScheduler;

    #[test]
    fn renders_buttons_in_order() {
        let countdown = Countdown::new(ManualScheduler::new());
        let panel = ControlPanel::for_countdown(&countdown);

        assert_eq!(panel.to_string(), "[ Start ] [ Stop ] [ Reset ]");
        assert_eq!(panel.labels(), vec!["Start", "Stop", "Reset"]);
    }

    #[test]
    fn buttons_drive_the_countdown() {
        let scheduler = ManualScheduler::new();
        let countdown = Countdown::new(scheduler.clone());
        let panel = ControlPanel::for_countdown(&countdown);

        panel.button("start").unwrap().activate();
        panel.button("Start").unwrap().activate();
        scheduler.advance_secs(3);
        panel.button("STOP").unwrap().activate();
        assert_eq!(countdown.display(), "24:57");
        assert_eq!(scheduler.cancelled().len(), 1);

        panel.button("Reset").unwrap().activate();
        assert_eq!(countdown.display(), "25:00");
        assert!(!countdown.is_running());
    }

    #[test]
    fn unknown_label_has_no_button() {
        let countdown = Countdown::new(ManualScheduler::new());
        let panel = ControlPanel::for_countdown(&countdown);

        assert!(panel.button("Pause").is_none());
    }
}
