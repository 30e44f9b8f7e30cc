//! Error types for SDK configuration.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use grandson_api::{ApiBaseUrl, ConfigError};
//!
//! let result = ApiBaseUrl::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidApiBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme (e.g., 'http://localhost:3001').")]
    InvalidApiBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The order number does not match the external contract.
    #[error("Invalid order number '{value}'. Expected format: 'GRP-YYYYMMDD-NNNN' (e.g., 'GRP-20241105-0001').")]
    InvalidOrderNumber {
        /// The invalid order number that was provided.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_api_base_url_error_message() {
        let error = ConfigError::InvalidApiBaseUrl {
            url: "ftp://weird".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp://weird"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_invalid_order_number_error_message() {
        let error = ConfigError::InvalidOrderNumber {
            value: "ORD-123".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ORD-123"));
        assert!(message.contains("GRP-YYYYMMDD-NNNN"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidOrderNumber {
            value: String::new(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
