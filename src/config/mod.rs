//! Configuration types for the Grandson API SDK.
//!
//! This module provides the core configuration types used to initialize
//! the SDK, plus environment-aware backend endpoint resolution.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GrandsonConfig`]: The main configuration struct holding all SDK settings
//! - [`GrandsonConfigBuilder`]: A builder for constructing [`GrandsonConfig`] instances
//! - [`ApiBaseUrl`]: A validated backend base URL newtype
//! - [`OrderNumber`]: A validated order number in the external display format
//! - [`Platform`] / [`ClientContext`] / [`resolve_api_base`]: runtime
//!   environment detection and endpoint resolution
//!
//! # Example
//!
//! ```rust
//! use grandson_api::{ApiBaseUrl, GrandsonConfig};
//!
//! let config = GrandsonConfig::builder()
//!     .api_base(ApiBaseUrl::new("http://localhost:3001").unwrap())
//!     .user_agent_prefix("GrandsonAdmin/2.1")
//!     .build();
//!
//! assert!(config.api_base().is_some());
//! ```

mod environment;
mod newtypes;

pub use environment::{
    resolve_api_base, ClientContext, Platform, DESKTOP_API_PORT, LOCAL_API_BASE, MOBILE_API_PORT,
    PRODUCTION_API_BASE,
};
pub use newtypes::{ApiBaseUrl, OrderNumber};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV_VAR: &str = "GRANDSON_API_URL";

/// Configuration for the Grandson API SDK.
///
/// All settings are optional: an empty configuration leaves endpoint
/// resolution entirely to the runtime heuristics in
/// [`resolve_api_base`]. Configuration is instance-based and passed
/// explicitly — there is no global state.
///
/// # Thread Safety
///
/// `GrandsonConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use grandson_api::{ApiBaseUrl, GrandsonConfig};
///
/// let config = GrandsonConfig::builder()
///     .api_base(ApiBaseUrl::new("https://grandson-backend.onrender.com").unwrap())
///     .build();
///
/// assert_eq!(
///     config.api_base().map(AsRef::as_ref),
///     Some("https://grandson-backend.onrender.com")
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct GrandsonConfig {
    api_base: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl GrandsonConfig {
    /// Creates a new builder for constructing a `GrandsonConfig`.
    #[must_use]
    pub fn builder() -> GrandsonConfigBuilder {
        GrandsonConfigBuilder::new()
    }

    /// Creates a configuration from the process environment.
    ///
    /// Reads the `GRANDSON_API_URL` environment variable into the base URL
    /// override. An unset variable leaves heuristic resolution in force;
    /// a set-but-invalid value is ignored with a warning rather than
    /// failing startup.
    #[must_use]
    pub fn from_env() -> Self {
        let api_base = std::env::var(API_URL_ENV_VAR).ok().and_then(|raw| {
            ApiBaseUrl::new(&raw).map_or_else(
                |error| {
                    tracing::warn!("Ignoring {API_URL_ENV_VAR}: {error}");
                    None
                },
                Some,
            )
        });

        Self {
            api_base,
            user_agent_prefix: None,
        }
    }

    /// Returns the explicit base URL override, if configured.
    #[must_use]
    pub const fn api_base(&self) -> Option<&ApiBaseUrl> {
        self.api_base.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify GrandsonConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GrandsonConfig>();
};

/// Builder for constructing [`GrandsonConfig`] instances.
///
/// Every field is optional, so `build()` is infallible.
///
/// # Example
///
/// ```rust
/// use grandson_api::{ApiBaseUrl, GrandsonConfig};
///
/// let config = GrandsonConfig::builder()
///     .api_base(ApiBaseUrl::new("http://localhost:3001").unwrap())
///     .user_agent_prefix("GrandsonStorefront/1.0")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct GrandsonConfigBuilder {
    api_base: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl GrandsonConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit base URL override.
    #[must_use]
    pub fn api_base(mut self, base: ApiBaseUrl) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`GrandsonConfig`].
    #[must_use]
    pub fn build(self) -> GrandsonConfig {
        GrandsonConfig {
            api_base: self.api_base,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
