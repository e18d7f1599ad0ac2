//! Terminal stand-ins for browser alerts and page navigation.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::ports::{Navigator, Notifier};

/// Writes alerts to standard error, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        if let Err(err) = writeln!(io::stderr().lock(), "{message}") {
            drop(err);
        }
    }
}

/// Records the navigation target so the caller can act on it after the flow.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    target: Mutex<Option<String>>,
}

impl RecordingNavigator {
    /// Create a navigator with no pending target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation target, if any.
    pub fn target(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        info!(path, "navigation requested");
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_owned());
    }
}
