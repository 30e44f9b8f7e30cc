//! Error types for API communication.
//!
//! This module contains error types for HTTP operations against the
//! Grandson backend: normalized response errors, retry exhaustion, and
//! transport failures.
//!
//! # Error Handling
//!
//! Non-2xx responses are normalized into a single [`ResponseError`]
//! carrying a human-readable message and a machine-readable
//! [`ErrorKind`] — callers pattern-match on the kind, never on message
//! substrings and never on raw HTTP status codes.
//!
//! # Example
//!
//! ```rust,ignore
//! use grandson_api::clients::{ApiError, ErrorKind};
//!
//! match client.post("/api/orders", &payload, false).await {
//!     Ok(body) => { /* handle success */ }
//!     Err(ApiError::Response(e)) if e.kind == ErrorKind::InsufficientStock => {
//!         // the stock changed between validation and submission
//!     }
//!     Err(ApiError::RetriesExhausted(e)) => {
//!         println!("gave up after {} attempts", e.attempts);
//!     }
//!     Err(err) => println!("request failed: {err}"),
//! }
//! ```

use thiserror::Error;

/// Machine-readable classification of a backend error response.
///
/// The backend signals domain errors through an `error.code` field in its
/// response envelope; older endpoints only embed a marker substring in the
/// message. Both generations are mapped into this discriminant at the
/// transport boundary so calling code never string-matches on messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// A requested quantity exceeds the available stock.
    InsufficientStock,
    /// The request was rejected for missing or invalid credentials.
    Unauthorized,
    /// Any other backend error.
    #[default]
    Other,
}

impl ErrorKind {
    /// Classifies a response from its status code, envelope error code,
    /// and message text.
    ///
    /// The structured `error.code` wins; the legacy message marker and the
    /// 401 status are fallbacks for older endpoints.
    #[must_use]
    pub fn classify(status: u16, code: Option<&str>, message: &str) -> Self {
        match code {
            Some("INSUFFICIENT_STOCK") => return Self::InsufficientStock,
            Some("UNAUTHORIZED") | Some("INVALID_TOKEN") => return Self::Unauthorized,
            _ => {}
        }
        if message.contains("INSUFFICIENT_STOCK") {
            return Self::InsufficientStock;
        }
        if status == 401 {
            return Self::Unauthorized;
        }
        Self::Other
    }
}

/// Error returned when the backend answers with a non-2xx response.
///
/// The message is extracted from the response body's `error.message` or
/// `message` field, falling back to the HTTP status text when the body is
/// not parseable. The status code is carried for diagnostics only —
/// callers branch on [`ErrorKind`], not on `status`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ResponseError {
    /// The HTTP status code, for diagnostics.
    pub status: u16,
    /// Machine-readable classification.
    pub kind: ErrorKind,
    /// Human-readable message extracted from the response.
    pub message: String,
}

/// Error returned when GET retry attempts have been exhausted.
///
/// Wraps the last underlying failure (timeout or network error).
#[derive(Debug, Error)]
#[error("Request failed after {attempts} attempts: {source}")]
pub struct RetriesExhaustedError {
    /// How many attempts were made.
    pub attempts: u32,
    /// The last underlying error.
    #[source]
    pub source: Box<ApiError>,
}

/// Unified error type for all API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx response.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// GET retry attempts were exhausted.
    #[error(transparent)]
    RetriesExhausted(#[from] RetriesExhaustedError),

    /// A single attempt did not complete within its timeout.
    #[error("Request timed out after {seconds}s")]
    Timeout {
        /// The per-attempt timeout that elapsed.
        seconds: u64,
    },

    /// The request was cancelled by its owning scope.
    #[error("Request cancelled")]
    Cancelled,

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns the machine-readable kind when the backend produced one.
    ///
    /// Transport-level failures (timeouts, network errors, exhausted
    /// retries) classify as [`ErrorKind::Other`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Response(e) => e.kind,
            Self::RetriesExhausted(e) => e.source.kind(),
            _ => ErrorKind::Other,
        }
    }

    /// Returns `true` when the backend rejected the request for
    /// insufficient stock.
    #[must_use]
    pub fn is_insufficient_stock(&self) -> bool {
        self.kind() == ErrorKind::InsufficientStock
    }

    /// Returns `true` for failures worth retrying: timeouts and network
    /// errors. Normalized backend responses are never retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network(_))
    }
}
