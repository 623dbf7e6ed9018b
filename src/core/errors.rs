//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for corridormap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Aggregation parameters rejected at the boundary
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Element collection rejected before it reaches the engine
    #[error("Invalid input: {0}")]
    Input(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a parameter error for the named parameter
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the caller can fix this by changing what they passed in.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::Input(_) | Self::Configuration(_) | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_names_parameter() {
        let err = Error::invalid_parameter("d_max_m", "must be non-negative, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `d_max_m`: must be non-negative, got -1"
        );
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::Input("duplicate element id `a`".into()));
        let err = result.context("loading elements").unwrap_err();
        assert_eq!(
            err.to_string(),
            "loading elements: Invalid input: duplicate element id `a`"
        );
    }

    #[test]
    fn test_io_error_is_not_user_fixable() {
        let err: Error = std::io::Error::other("disk on fire").into();
        assert!(!err.is_user_fixable());
    }
}
