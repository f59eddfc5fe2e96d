//! List controller defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Defaults applied to every list controller unless a resource overrides them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Quiet period after the last keystroke before a search is issued.
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
    /// `limit` sent by screens that fetch the whole collection at once.
    #[serde(default = "default_bulk_limit")]
    pub bulk_limit: u64,
    /// Upper bound on a single load before it is abandoned.
    #[serde(default = "default_load_watchdog")]
    pub load_watchdog_seconds: u64,
}

impl ControllerConfig {
    /// Debounce window as a `Duration`.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Load watchdog as a `Duration`.
    pub fn load_watchdog(&self) -> Duration {
        Duration::from_secs(self.load_watchdog_seconds)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce(),
            bulk_limit: default_bulk_limit(),
            load_watchdog_seconds: default_load_watchdog(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_search_debounce() -> u64 {
    500
}

fn default_bulk_limit() -> u64 {
    1000
}

fn default_load_watchdog() -> u64 {
    30
}
