//! Domain error types
//!
//! This module defines the error hierarchy for polystore. All errors are
//! domain-specific and don't expose third-party driver types; driver failures
//! are carried as messages inside the matching variant.

use thiserror::Error;

/// Main polystore error type
///
/// This is the primary error type used throughout the crate. Backend driver
/// errors propagate through the `Connection` and `Database` variants without
/// translation beyond stringification.
#[derive(Debug, Error)]
pub enum PolystoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No builder registered for the requested backend kind
    #[error("Unsupported backend kind: {0}")]
    UnsupportedBackend(String),

    /// Failed to establish or verify a backend connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend operation errors (generic)
    #[error("Database error: {0}")]
    Database(String),

    /// Validation errors (malformed records, unsafe identifiers, bad page tokens)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A persistence operation reported no instance where one is mandatory
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for PolystoreError {
    fn from(err: std::io::Error) -> Self {
        PolystoreError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PolystoreError {
    fn from(err: serde_json::Error) -> Self {
        PolystoreError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PolystoreError {
    fn from(err: toml::de::Error) -> Self {
        PolystoreError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PolystoreError::Configuration("missing region".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing region");
    }

    #[test]
    fn test_unsupported_backend_display_names_kind() {
        let err = PolystoreError::UnsupportedBackend("graph".to_string());
        assert_eq!(err.to_string(), "Unsupported backend kind: graph");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PolystoreError = io_err.into();
        assert!(matches!(err, PolystoreError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PolystoreError = json_err.into();
        assert!(matches!(err, PolystoreError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("a = b = c").unwrap_err();
        let err: PolystoreError = toml_err.into();
        assert!(matches!(err, PolystoreError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = PolystoreError::Validation("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
