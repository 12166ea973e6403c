//! Result and error types for antform.

use thiserror::Error;

/// Result type for antform operations
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while filling a form
#[derive(Debug, Error)]
pub enum FormError {
    /// Widget tag outside the supported set
    #[error("input type: {tag} not supported")]
    UnsupportedWidgetType {
        /// The tag as supplied by the caller
        tag: String,
    },

    /// Fill value does not have the shape the widget requires
    #[error("{widget} expects {expected}")]
    InvalidValue {
        /// Widget the value was meant for
        widget: String,
        /// Human readable description of the accepted shape
        expected: &'static str,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {selector}")]
    Timeout {
        /// Rendered locator
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Failure reported by the browser automation backend
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    /// Create an unsupported widget error
    #[must_use]
    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::UnsupportedWidgetType { tag: tag.into() }
    }

    /// Create an invalid value error
    #[must_use]
    pub fn invalid_value(widget: impl std::fmt::Display, expected: &'static str) -> Self {
        Self::InvalidValue {
            widget: widget.to_string(),
            expected,
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether the error came from the page rather than from the caller's input
    #[must_use]
    pub const fn is_interaction_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Driver { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_tag() {
        let err = FormError::unsupported("Rate");
        assert_eq!(err.to_string(), "input type: Rate not supported");
        assert!(!err.is_interaction_failure());
    }

    #[test]
    fn test_invalid_value_message() {
        let err = FormError::invalid_value("CheckboxGroup", "a label to boolean mapping");
        assert!(err.to_string().contains("CheckboxGroup"));
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_timeout_is_interaction_failure() {
        let err = FormError::Timeout {
            selector: ".ant-select".to_string(),
            ms: 5000,
        };
        assert!(err.is_interaction_failure());
        assert!(err.to_string().contains("5000ms"));
    }

    #[test]
    fn test_only_page_errors_are_interaction_failures() {
        assert!(FormError::driver("target closed").is_interaction_failure());
        let launch = FormError::BrowserLaunch {
            message: "no chromium".to_string(),
        };
        assert!(!launch.is_interaction_failure());
        let json: FormError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(!json.is_interaction_failure());
    }
}
