//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated backend base URL.
///
/// This newtype ensures the URL carries an `http://` or `https://` scheme
/// and normalizes away a trailing slash, so request paths can always be
/// joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use grandson_api::ApiBaseUrl;
///
/// let base = ApiBaseUrl::new("http://localhost:3001/").unwrap();
/// assert_eq!(base.as_ref(), "http://localhost:3001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl(String);

impl ApiBaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBaseUrl`] if the value is empty or
    /// does not start with `http://` or `https://`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidApiBaseUrl { url });
        }

        // Bare scheme with no host is still invalid.
        let after_scheme = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        if after_scheme.is_empty() {
            return Err(ConfigError::InvalidApiBaseUrl { url });
        }

        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ApiBaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ApiBaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}

/// A validated order number in the external `GRP-YYYYMMDD-NNNN` format.
///
/// Order numbers are issued by the backend and consumed for display and
/// URL routing (`/order-confirmation/{orderNumber}`). The format is an
/// external contract: a fixed `GRP` prefix, an eight-digit date, and a
/// four-digit daily sequence.
///
/// # Example
///
/// ```rust
/// use grandson_api::OrderNumber;
///
/// let number = OrderNumber::new("GRP-20241105-0001").unwrap();
/// assert_eq!(number.date_part(), "20241105");
/// assert_eq!(number.sequence(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    const PREFIX: &'static str = "GRP-";

    /// Creates a new validated order number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOrderNumber`] if the value does not
    /// match `GRP-YYYYMMDD-NNNN`.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();

        let invalid = || ConfigError::InvalidOrderNumber {
            value: value.clone(),
        };

        let rest = value.strip_prefix(Self::PREFIX).ok_or_else(invalid)?;
        let (date, sequence) = rest.split_once('-').ok_or_else(invalid)?;

        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if sequence.len() != 4 || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(Self(value))
    }

    /// Returns the `YYYYMMDD` date portion of the order number.
    #[must_use]
    pub fn date_part(&self) -> &str {
        &self.0[Self::PREFIX.len()..Self::PREFIX.len() + 8]
    }

    /// Returns the daily sequence portion as a number.
    ///
    /// For `GRP-20241105-0001`, this returns `1`.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        // Validated as four ASCII digits on construction.
        self.0[Self::PREFIX.len() + 9..].parse().unwrap_or(0)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for OrderNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OrderNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_accepts_http_and_https() {
        assert!(ApiBaseUrl::new("http://localhost:3001").is_ok());
        assert!(ApiBaseUrl::new("https://grandson-backend.onrender.com").is_ok());
    }

    #[test]
    fn test_api_base_url_strips_trailing_slash() {
        let base = ApiBaseUrl::new("http://192.168.1.10:3001/").unwrap();
        assert_eq!(base.as_ref(), "http://192.168.1.10:3001");
    }

    #[test]
    fn test_api_base_url_rejects_missing_scheme() {
        let result = ApiBaseUrl::new("localhost:3001");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidApiBaseUrl { url }) if url == "localhost:3001"
        ));
    }

    #[test]
    fn test_api_base_url_rejects_bare_scheme() {
        assert!(ApiBaseUrl::new("http://").is_err());
        assert!(ApiBaseUrl::new("").is_err());
    }

    #[test]
    fn test_api_base_url_serde_round_trip() {
        let base = ApiBaseUrl::new("https://grandson-backend.onrender.com").unwrap();
        let json = serde_json::to_string(&base).unwrap();
        assert_eq!(json, r#""https://grandson-backend.onrender.com""#);

        let back: ApiBaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, base);
    }

    #[test]
    fn test_order_number_accepts_contract_format() {
        let number = OrderNumber::new("GRP-20241105-0001").unwrap();
        assert_eq!(number.as_ref(), "GRP-20241105-0001");
        assert_eq!(number.date_part(), "20241105");
        assert_eq!(number.sequence(), 1);
    }

    #[test]
    fn test_order_number_rejects_wrong_prefix() {
        assert!(OrderNumber::new("ORD-20241105-0001").is_err());
    }

    #[test]
    fn test_order_number_rejects_short_date() {
        assert!(OrderNumber::new("GRP-2024115-0001").is_err());
    }

    #[test]
    fn test_order_number_rejects_non_numeric_sequence() {
        assert!(OrderNumber::new("GRP-20241105-00AB").is_err());
    }

    #[test]
    fn test_order_number_rejects_missing_sequence() {
        assert!(OrderNumber::new("GRP-20241105").is_err());
        assert!(OrderNumber::new("GRP-20241105-").is_err());
    }

    #[test]
    fn test_order_number_deserializes_from_string() {
        let number: OrderNumber = serde_json::from_str(r#""GRP-20241105-0042""#).unwrap();
        assert_eq!(number.sequence(), 42);

        let bad: Result<OrderNumber, _> = serde_json::from_str(r#""nope""#);
        assert!(bad.is_err());
    }
}
