//! Session tuning knobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between the last edit and the store write it produces.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Configuration for an editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Debounce window for cell state and title writes.
    pub debounce_window: Duration,
    /// Capacity of the session event broadcast channel.
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            event_capacity: 64,
        }
    }
}
