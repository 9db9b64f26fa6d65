//! Mock navigator for testing.

use crate::pipeline::Navigator;
use std::sync::{Arc, Mutex, PoisonError};

/// Navigator that records every route it is sent to.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    /// Create a navigator with no recorded visits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to, oldest first.
    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
