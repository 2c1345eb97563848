//! Error handling for FieldGuide
//!
//! The geometry and interaction core is infallible: degenerate input is
//! skipped or clamped rather than rejected. Errors only arise at the edges,
//! when configuration is read from or written to disk.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Configuration error type
///
/// Represents a configuration value that fails validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field holds a value outside its valid range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file format is not supported
    #[error("Unsupported config format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),
}

/// Main error type for FieldGuide
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Shorthand for an [`ConfigError::InvalidValue`] wrapped in [`Error`]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Config(ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        })
    }

    /// Check if this is a configuration validation error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this error came from reading or parsing a file
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Json(_) | Error::TomlDe(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = Error::invalid_config("zoom_min", "must be positive");
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Invalid value for 'zoom_min': must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_config_error());
    }
}
