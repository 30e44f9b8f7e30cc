//! Authenticated HTTP client for the Grandson backend.
//!
//! This module provides the [`ApiClient`] type: auth-header injection from
//! the token store, mobile cache-busting headers, GET retry with linear
//! backoff and per-attempt timeouts, and uniform error normalization.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::auth::TokenStore;
use crate::clients::envelope::{extract_error_code, extract_error_message};
use crate::clients::errors::{ApiError, ErrorKind, ResponseError, RetriesExhaustedError};
use crate::config::{resolve_api_base, ClientContext, GrandsonConfig, Platform};

/// Number of attempts for GET requests (1 initial + 2 retries).
pub const GET_RETRY_ATTEMPTS: u32 = 3;

/// Base backoff between GET attempts; the wait is `base * attempt_number`.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(1000);

/// Per-attempt timeout on mobile devices, which ride slower networks.
pub const MOBILE_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-attempt timeout on desktop.
pub const DESKTOP_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Marker header attached to every request from a mobile device.
pub const MOBILE_MARKER_HEADER: &str = "X-Mobile-Request";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Grandson backend.
///
/// The client handles:
/// - Base URL resolution from config and runtime context
/// - Bearer-token injection from the [`TokenStore`]
/// - Mobile cache-busting headers on every request type
/// - GET-only retry with linear backoff and per-attempt timeouts
/// - Normalization of non-2xx responses into [`ResponseError`]
///
/// Non-idempotent operations (POST/PUT/DELETE) are never silently
/// retried.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use grandson_api::auth::{MemoryStore, TokenStore};
/// use grandson_api::{ApiClient, ClientContext, GrandsonConfig};
///
/// let tokens = Arc::new(TokenStore::new(Arc::new(MemoryStore::new())));
/// let client = ApiClient::new(
///     &GrandsonConfig::from_env(),
///     &ClientContext::browser("localhost", user_agent),
///     tokens,
/// );
///
/// let products = client.get("/api/products", false).await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Resolved backend base URL, without a trailing slash.
    base_url: String,
    /// The detected client platform.
    platform: Platform,
    /// Headers attached to every request.
    default_headers: HashMap<String, String>,
    /// Source of the bearer token.
    tokens: Arc<TokenStore>,
    /// Per-attempt timeout; platform-dependent.
    attempt_timeout: Duration,
    /// Base backoff between GET attempts.
    retry_backoff: Duration,
    /// Scope token cancelling every in-flight request of this client.
    cancel: CancellationToken,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a new client for the given configuration and runtime context.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(
        config: &GrandsonConfig,
        context: &ClientContext,
        tokens: Arc<TokenStore>,
    ) -> Self {
        let base_url = resolve_api_base(config, context);
        let platform = context.platform();

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Grandson API Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        // Mobile devices sit behind aggressive carrier caches; bust them
        // on every request type.
        if platform.is_mobile() {
            default_headers.insert(
                "Cache-Control".to_string(),
                "no-cache, no-store, must-revalidate".to_string(),
            );
            default_headers.insert("Pragma".to_string(), "no-cache".to_string());
            default_headers.insert("Expires".to_string(), "0".to_string());
            default_headers.insert(MOBILE_MARKER_HEADER.to_string(), "true".to_string());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        let attempt_timeout = if platform.is_mobile() {
            MOBILE_ATTEMPT_TIMEOUT
        } else {
            DESKTOP_ATTEMPT_TIMEOUT
        };

        Self {
            client,
            base_url,
            platform,
            default_headers,
            tokens,
            attempt_timeout,
            retry_backoff: RETRY_BACKOFF,
            cancel: CancellationToken::new(),
        }
    }

    /// Overrides the per-attempt timeout.
    ///
    /// The platform default (15 s mobile, 5 s desktop) is right for
    /// production; tests shorten it to exercise the retry path quickly.
    #[must_use]
    pub const fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Overrides the base retry backoff.
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Returns the resolved backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the detected client platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the headers attached to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the token store backing this client.
    #[must_use]
    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Cancels every in-flight and future request made through this client.
    ///
    /// Call when the owning scope is being torn down (the view-unmount
    /// case) so responses cannot land on disposed state.
    pub fn cancel_all(&self) {
        self.cancel.cancel();
    }

    /// Returns a child token tied to this client's cancellation scope.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// Sends a GET request.
    ///
    /// GETs are retried up to 3 times on timeout or network failure, with
    /// a linear backoff (`1000ms * attempt_number`) between attempts.
    /// Normalized backend errors are returned immediately, never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Response`] for non-2xx responses,
    /// [`ApiError::RetriesExhausted`] when all attempts fail, or
    /// [`ApiError::Cancelled`] if the client scope was cancelled.
    pub async fn get(&self, path: &str, authenticated: bool) -> Result<Value, ApiError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let result = self
                .send(reqwest::Method::GET, path, None, authenticated)
                .await;

            match result {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() => {
                    if attempt >= GET_RETRY_ATTEMPTS {
                        return Err(RetriesExhaustedError {
                            attempts: attempt,
                            source: Box::new(err),
                        }
                        .into());
                    }
                    tracing::warn!(attempt, path, "GET attempt failed, retrying: {err}");
                    // Linear backoff: 1s, then 2s.
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sends a POST request with a JSON body. Never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport failure or non-2xx response.
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ApiError> {
        self.send(reqwest::Method::POST, path, Some(body), authenticated)
            .await
    }

    /// Sends a PUT request with a JSON body. Never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport failure or non-2xx response.
    pub async fn put(
        &self,
        path: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ApiError> {
        self.send(reqwest::Method::PUT, path, Some(body), authenticated)
            .await
    }

    /// Sends a DELETE request. Never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport failure or non-2xx response.
    pub async fn delete(&self, path: &str, authenticated: bool) -> Result<Value, ApiError> {
        self.send(reqwest::Method::DELETE, path, None, authenticated)
            .await
    }

    /// Uploads a multipart form.
    ///
    /// Only the bearer header is attached — no explicit `Content-Type`,
    /// so the platform sets the multipart boundary. On success the
    /// response text is parsed as JSON, yielding an empty object if
    /// parsing fails; a malformed success body is never an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx response.
    pub async fn upload(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(path);

        let mut builder = self.client.post(&url).multipart(form);
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if let Some(token) = self.tokens.get_token() {
            builder = builder.bearer_auth(token);
        }

        let response = tokio::select! {
            () = self.cancel.cancelled() => return Err(ApiError::Cancelled),
            result = builder.send() => result?,
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            return Ok(serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({})));
        }

        Err(Self::normalize_error(status, &text).into())
    }

    /// Joins a request path onto the base URL, normalizing slashes.
    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends one attempt: builds the request, enforces the per-attempt
    /// timeout via cancellation, and normalizes the response.
    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
        authenticated: bool,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(path);

        let mut builder = self.client.request(method, &url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        // Missing token: omit the header and let the server answer 401.
        if authenticated {
            if let Some(token) = self.tokens.get_token() {
                builder = builder.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = tokio::select! {
            () = self.cancel.cancelled() => return Err(ApiError::Cancelled),
            result = tokio::time::timeout(self.attempt_timeout, builder.send()) => {
                match result {
                    Ok(sent) => sent?,
                    Err(_) => {
                        return Err(ApiError::Timeout {
                            seconds: self.attempt_timeout.as_secs(),
                        })
                    }
                }
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            if text.is_empty() {
                return Ok(serde_json::json!({}));
            }
            return serde_json::from_str(&text).map_err(|_| {
                // A 2xx with an unparseable body is a backend bug; surface
                // it as a normalized error rather than a panic.
                ApiError::Response(ResponseError {
                    status: status.as_u16(),
                    kind: ErrorKind::Other,
                    message: "Réponse illisible du serveur".to_string(),
                })
            });
        }

        Err(Self::normalize_error(status, &text).into())
    }

    /// Normalizes a non-2xx response into a [`ResponseError`].
    fn normalize_error(status: reqwest::StatusCode, text: &str) -> ResponseError {
        let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);
        let message = extract_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        let code = extract_error_code(&body);
        let kind = ErrorKind::classify(status.as_u16(), code.as_deref(), &message);

        ResponseError {
            status: status.as_u16(),
            kind,
            message,
        }
    }
}
