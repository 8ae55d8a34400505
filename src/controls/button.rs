//! Labelled button invoking a callback on activation

use std::{fmt, sync::Arc};

/// A stateless control: a label and the action it triggers.
///
/// Every activation invokes the action exactly once. Rapid activations are
/// passed straight through; deduplication is up to whatever the action drives.
#[derive(Clone)]
pub struct TimerButton {
    label: String,
    action: Arc<dyn Fn() + Send + Sync>,
}

impl TimerButton {
    /// Create a button that runs `action` when activated
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            action: Arc::new(action),
        }
    }

    /// Text shown on the button
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invoke the action once
    pub fn activate(&self) {
        (self.action)();
    }
}

impl fmt::Display for TimerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} ]", self.label)
    }
}

impl fmt::Debug for TimerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerButton")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
