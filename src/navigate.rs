//! Link navigation abstraction.
//!
//! Click-through from a rendered region goes through a [`Navigator`]: the
//! host decides what "opening" a reference means (a pane, a search, a
//! browser). The engine only supplies the reference identifier and the
//! source document it came from.

use std::sync::Mutex;

use tracing::info;

/// Opens a reference on the host's UI surface.
pub trait Navigator: Send + Sync {
    /// Open `identifier` (a document link, embed target, or `#tag` search)
    /// from the context of `source_path`, optionally in a new pane.
    fn open_reference(&self, identifier: &str, source_path: &str, new_pane: bool);
}

/// Host navigator that only logs the request. Used by the CLI, where there
/// is no pane to open.
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn open_reference(&self, identifier: &str, source_path: &str, new_pane: bool) {
        info!(identifier, source_path, new_pane, "open reference");
    }
}

/// Records every navigation request for assertions in tests.
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<NavigationCall>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCall {
    pub identifier: String,
    pub source_path: String,
    pub new_pane: bool,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open_reference(&self, identifier: &str, source_path: &str, new_pane: bool) {
        self.calls.lock().unwrap().push(NavigationCall {
            identifier: identifier.to_string(),
            source_path: source_path.to_string(),
            new_pane,
        });
    }
}
