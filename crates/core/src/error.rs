//! Error types for the kbchat CLI.
//!
//! This module defines a unified error enum covering the three failure
//! categories at the adapter and extractor boundaries (validation,
//! retrieval-service, extraction) plus configuration, I/O, and
//! serialization errors.

use thiserror::Error;

/// Unified error type for the kbchat CLI.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing configuration, or an empty query.
    /// Always raised before any network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any failure of the outbound retrieve-and-generate call:
    /// timeout, authentication, non-success status, undecodable body.
    #[error("Retrieval service error: {0}")]
    Retrieval(String),

    /// Response decoded but missing a field the extractor needs.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Startup configuration problems (environment, config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and terminal errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories_are_distinguishable() {
        let validation = AppError::Validation("query must not be empty".to_string());
        let retrieval = AppError::Retrieval("connect timeout".to_string());
        let extraction = AppError::Extraction("response has no output text".to_string());

        assert!(validation.to_string().starts_with("Validation error"));
        assert!(retrieval.to_string().starts_with("Retrieval service error"));
        assert!(extraction.to_string().starts_with("Extraction error"));
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Serialization(_)));
    }
}
