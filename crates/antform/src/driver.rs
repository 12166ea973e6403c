//! PageDriver - Abstract Browser Automation Trait
//!
//! The form helper never talks to a browser directly. Every interaction goes
//! through [`PageDriver`], which lets the same strategies run against a real
//! Chromium page ([`ChromiumDriver`](crate::ChromiumDriver), feature
//! `browser`) or the in-memory [`MockPage`](crate::mock::MockPage).
//!
//! # Contract
//!
//! - Every action auto-waits for its target to be attached, up to
//!   [`DriverConfig::element_timeout`], then acts on the first match in
//!   document order.
//! - A target that never shows up yields
//!   [`FormError::Timeout`](crate::FormError::Timeout); the helper never
//!   retries on its own.
//! - Calls are awaited one at a time by the helper, so implementations do
//!   not need to guard against overlapping actions on the same page.

use crate::locator::Locator;
use crate::result::FormResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Element state awaited by [`PageDriver::wait_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    /// At least one element matches
    Attached,
    /// No element matches
    Detached,
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attached => write!(f, "attached"),
            Self::Detached => write!(f, "detached"),
        }
    }
}

/// Browser configuration for drivers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for element waits, in milliseconds
    pub element_timeout_ms: u64,
    /// Polling interval while waiting, in milliseconds
    pub poll_interval_ms: u64,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Executable path override
    pub executable_path: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            element_timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            sandbox: true,
            executable_path: None,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set element timeout
    #[must_use]
    pub const fn element_timeout(mut self, timeout_ms: u64) -> Self {
        self.element_timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set executable path
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Element timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    /// Poll interval as Duration
    #[must_use]
    pub const fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Number of polls that fit in the element timeout
    #[must_use]
    pub fn max_polls(&self) -> u64 {
        (self.element_timeout_ms / self.poll_interval_ms.max(1)).max(1)
    }
}

/// Abstract driver trait for browser automation
///
/// # Implementations
///
/// - `ChromiumDriver` - CDP via chromiumoxide (feature `browser`)
/// - `MockPage` - in-memory DOM for unit testing
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Click the element
    async fn click(&self, target: &Locator) -> FormResult<()>;

    /// Double-click the element
    async fn dblclick(&self, target: &Locator) -> FormResult<()>;

    /// Replace the content of a text box
    async fn fill(&self, target: &Locator, text: &str) -> FormResult<()>;

    /// Press a named key (e.g. `Enter`) with the element focused
    async fn press(&self, target: &Locator, key: &str) -> FormResult<()>;

    /// Wait until the locator reaches `state`
    async fn wait_for(&self, target: &Locator, state: ElementState) -> FormResult<()>;

    /// Whether the element carries `class`
    async fn has_class(&self, target: &Locator, class: &str) -> FormResult<bool>;

    /// Whether the element has a descendant matching the compound selector `css`
    async fn query_exists(&self, target: &Locator, css: &str) -> FormResult<bool>;

    /// Click the first descendant matching `css`, if any. Returns whether a click happened.
    async fn click_descendant(&self, target: &Locator, css: &str) -> FormResult<bool>;

    /// Click at an offset from the element's top-left corner
    async fn click_at(&self, target: &Locator, x: f64, y: f64) -> FormResult<()>;

    /// Number of elements currently matching, without waiting
    async fn count(&self, target: &Locator) -> FormResult<usize>;

    /// Replace the auto-wait budget used by every later action
    fn set_wait_budget(&mut self, element_timeout_ms: u64, poll_interval_ms: u64);
}
