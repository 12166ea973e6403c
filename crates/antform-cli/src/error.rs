//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Spec file could not be parsed
    #[error("Invalid spec file {path}: {message}")]
    SpecFile {
        /// Path of the offending file
        path: String,
        /// Parser message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Form filling error
    #[error("Form error: {0}")]
    Form(#[from] antform::FormError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a spec file error
    #[must_use]
    pub fn spec_file(path: impl std::fmt::Display, message: impl std::fmt::Display) -> Self {
        Self::SpecFile {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}
