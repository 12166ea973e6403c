//! Fill configuration.

use crate::classes;
use crate::driver::{DriverConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};

/// Settings for a batch of fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillConfig {
    /// Compound selector of the form root
    pub form_selector: String,
    /// Abort the batch on the first failing field
    pub stop_on_error: bool,
    /// Per-action wait budget, in milliseconds
    pub timeout_ms: u64,
    /// Polling interval while waiting, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            form_selector: classes::FORM.to_string(),
            stop_on_error: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl FillConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the form root selector
    #[must_use]
    pub fn form_selector(mut self, selector: impl Into<String>) -> Self {
        self.form_selector = selector.into();
        self
    }

    /// Abort the batch on the first failure
    #[must_use]
    pub const fn stop_on_error(mut self, stop: bool) -> Self {
        self.stop_on_error = stop;
        self
    }

    /// Set the per-action timeout
    #[must_use]
    pub const fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Driver settings carrying this config's wait budget
    #[must_use]
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig::new()
            .element_timeout(self.timeout_ms)
            .poll_interval(self.poll_interval_ms)
    }
}
