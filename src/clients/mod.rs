//! HTTP client layer for Grandson backend communication.
//!
//! This module provides the authenticated transport for the SDK: request
//! construction, retry logic, cancellation, and the normalization of both
//! response envelopes and error bodies at this single boundary.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiClient`]: the async HTTP client (get/post/put/delete/upload)
//! - [`Envelope`]: normalized response payloads, tolerant of legacy shapes
//! - [`ApiError`] / [`ErrorKind`]: the unified error taxonomy
//!
//! # Retry Behavior
//!
//! Only GET requests are retried: up to 3 attempts, each bounded by a
//! per-attempt timeout (15 s mobile, 5 s desktop), with a linear backoff
//! of `1000ms * attempt_number` between attempts. Timeouts and network
//! failures retry; normalized backend errors and all non-idempotent verbs
//! (POST/PUT/DELETE) never do.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grandson_api::auth::{MemoryStore, TokenStore};
//! use grandson_api::{ApiClient, ClientContext, Envelope, GrandsonConfig};
//!
//! let tokens = Arc::new(TokenStore::new(Arc::new(MemoryStore::new())));
//! let client = ApiClient::new(&config, &context, tokens);
//!
//! let body = client.get("/api/products", false).await?;
//! let products = Envelope::parse(body).list("products");
//! ```

mod envelope;
mod errors;
mod http_client;

pub use envelope::{extract_error_code, extract_error_message, Envelope, EnvelopeError};
pub use errors::{ApiError, ErrorKind, ResponseError, RetriesExhaustedError};
pub use http_client::{
    ApiClient, DESKTOP_ATTEMPT_TIMEOUT, GET_RETRY_ATTEMPTS, MOBILE_ATTEMPT_TIMEOUT,
    MOBILE_MARKER_HEADER, RETRY_BACKOFF, SDK_VERSION,
};
