//! Environment-aware backend endpoint resolution.
//!
//! This module determines the backend base URL from explicit configuration,
//! or infers it from the runtime surroundings: the hostname the frontend is
//! being served from and the client's user agent.
//!
//! Resolution is a pure function of `(configuration, context)` — nothing is
//! cached between calls, since the hostname can change between environments
//! (e.g., tests).
//!
//! # Example
//!
//! ```rust
//! use grandson_api::{resolve_api_base, ClientContext, GrandsonConfig};
//!
//! let config = GrandsonConfig::builder().build();
//! let context = ClientContext::browser("localhost", "Mozilla/5.0 (X11; Linux x86_64)");
//!
//! assert_eq!(resolve_api_base(&config, &context), "http://localhost:3001");
//! ```

use crate::config::GrandsonConfig;

/// Fixed local backend default, also the non-browser fallback.
pub const LOCAL_API_BASE: &str = "http://localhost:3001";

/// Fixed production backend URL.
pub const PRODUCTION_API_BASE: &str = "https://grandson-backend.onrender.com";

/// Hostname substrings that identify a production deployment.
const PRODUCTION_HOST_MARKERS: &[&str] = &["grandson-project", "grandson.shop"];

/// Backend port served to desktop clients on LAN/IP access.
pub const DESKTOP_API_PORT: u16 = 3001;

/// Backend port served to mobile clients on LAN/IP access.
pub const MOBILE_API_PORT: u16 = 3000;

/// User-agent substrings that identify a mobile device.
const MOBILE_UA_MARKERS: &[&str] = &[
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
    "opera mini",
    "mobile",
];

/// The kind of device a request originates from.
///
/// Derived from the user-agent string with a substring heuristic. The
/// platform selects the LAN backend port, the per-attempt request timeout,
/// and whether cache-busting headers are attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Platform {
    /// A desktop browser (the default when no user agent is known).
    #[default]
    Desktop,
    /// A mobile device (phone or tablet).
    Mobile,
}

impl Platform {
    /// Detects the platform from a user-agent string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grandson_api::Platform;
    ///
    /// assert_eq!(
    ///     Platform::from_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"),
    ///     Platform::Mobile
    /// );
    /// assert_eq!(
    ///     Platform::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)"),
    ///     Platform::Desktop
    /// );
    /// ```
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        let lowered = user_agent.to_lowercase();
        if MOBILE_UA_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Returns `true` for mobile platforms.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Returns the LAN backend port for this platform.
    #[must_use]
    pub const fn api_port(self) -> u16 {
        match self {
            Self::Desktop => DESKTOP_API_PORT,
            Self::Mobile => MOBILE_API_PORT,
        }
    }
}

/// The runtime surroundings resolution is computed from.
///
/// `hostname` is the host the frontend is currently served from; `None`
/// means a non-browser context (server-side render), which always falls
/// back to the local default rather than failing.
///
/// # Example
///
/// ```rust
/// use grandson_api::{ClientContext, Platform};
///
/// let browser = ClientContext::browser("192.168.1.10", "Mozilla/5.0 (Linux; Android 14)");
/// assert_eq!(browser.platform(), Platform::Mobile);
///
/// let headless = ClientContext::non_browser();
/// assert!(headless.hostname().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientContext {
    hostname: Option<String>,
    user_agent: Option<String>,
}

impl ClientContext {
    /// Creates a context for a browser environment.
    #[must_use]
    pub fn browser(hostname: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            user_agent: Some(user_agent.into()),
        }
    }

    /// Creates a context for a non-browser environment (server-side render).
    #[must_use]
    pub const fn non_browser() -> Self {
        Self {
            hostname: None,
            user_agent: None,
        }
    }

    /// Returns the current hostname, if running in a browser context.
    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Returns the user-agent string, if known.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the detected platform, defaulting to desktop when the
    /// user agent is unknown.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.user_agent
            .as_deref()
            .map_or(Platform::Desktop, Platform::from_user_agent)
    }
}

/// Resolves the backend base URL for the given configuration and context.
///
/// Decision order:
///
/// 1. An explicit [`GrandsonConfig::api_base`] override wins unconditionally.
/// 2. Outside a browser context, the local default is returned; this
///    function never fails.
/// 3. `localhost`/`127.0.0.1` resolve to the local default.
/// 4. Hostnames matching a production marker resolve to the fixed
///    production backend.
/// 5. Any other hostname (LAN/IP access) resolves to
///    `http://{hostname}:{port}`, where the port depends on the
///    mobile-vs-desktop heuristic.
///
/// # Example
///
/// ```rust
/// use grandson_api::{resolve_api_base, ClientContext, GrandsonConfig};
///
/// let config = GrandsonConfig::builder().build();
///
/// let mobile = ClientContext::browser("192.168.1.10", "Mozilla/5.0 (Linux; Android 14)");
/// assert_eq!(resolve_api_base(&config, &mobile), "http://192.168.1.10:3000");
/// ```
#[must_use]
pub fn resolve_api_base(config: &GrandsonConfig, context: &ClientContext) -> String {
    if let Some(base) = config.api_base() {
        return base.as_ref().to_string();
    }

    let Some(hostname) = context.hostname() else {
        return LOCAL_API_BASE.to_string();
    };

    if hostname == "localhost" || hostname == "127.0.0.1" {
        return LOCAL_API_BASE.to_string();
    }

    if PRODUCTION_HOST_MARKERS
        .iter()
        .any(|marker| hostname.contains(marker))
    {
        return PRODUCTION_API_BASE.to_string();
    }

    format!("http://{hostname}:{}", context.platform().api_port())
}
