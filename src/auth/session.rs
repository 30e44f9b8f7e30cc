//! Session types for authenticated API calls.
//!
//! This module provides the [`AuthSession`] type — the bearer token plus
//! the minimal user record the backend returns at login — with expiry
//! bookkeeping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a session stays valid after issuance.
pub const SESSION_TTL_HOURS: i64 = 24;

/// The role attached to an authenticated back-office user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Limited back-office access.
    #[default]
    Staff,
}

/// The minimal user record carried alongside the bearer token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// The unique identifier of the user.
    pub id: String,
    /// The login name of the user.
    pub username: String,
    /// The user's back-office role.
    #[serde(default)]
    pub role: UserRole,
}

/// An authenticated session: an opaque bearer token, the user it belongs
/// to, and when it was issued and expires.
///
/// Sessions are considered valid only while `now < expires_at`; any read
/// after expiry must treat the session as absent (the token store purges
/// it as a side effect).
///
/// # Thread Safety
///
/// `AuthSession` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use grandson_api::auth::{AuthSession, AuthUser, UserRole};
///
/// let session = AuthSession::issue(
///     "opaque-bearer-token".to_string(),
///     AuthUser {
///         id: "1".to_string(),
///         username: "admin".to_string(),
///         role: UserRole::Admin,
///     },
/// );
///
/// assert!(!session.expired());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// The opaque bearer token.
    pub token: String,

    /// The user this session belongs to.
    pub user: AuthUser,

    /// When this session was issued.
    pub issued_at: DateTime<Utc>,

    /// When this session expires.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Creates a session issued now, expiring after the fixed 24 h window.
    #[must_use]
    pub fn issue(token: String, user: AuthUser) -> Self {
        Self::issue_at(token, user, Utc::now())
    }

    /// Creates a session issued at the given instant.
    ///
    /// Used by tests to build sessions around the expiry boundary.
    #[must_use]
    pub fn issue_at(token: String, user: AuthUser, issued_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user,
            issued_at,
            expires_at: issued_at + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Returns `true` if this session has expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

// Verify AuthSession is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthSession>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            username: "admin".to_string(),
            role: UserRole::Admin,
        }
    }

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = AuthSession::issue("token".to_string(), test_user());
        assert!(!session.expired());
        assert_eq!(
            session.expires_at - session.issued_at,
            Duration::hours(SESSION_TTL_HOURS)
        );
    }

    #[test]
    fn test_session_past_window_is_expired() {
        let issued = Utc::now() - Duration::hours(SESSION_TTL_HOURS + 1);
        let session = AuthSession::issue_at("token".to_string(), test_user(), issued);
        assert!(session.expired());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = AuthSession::issue("token".to_string(), test_user());
        let json = serde_json::to_value(&session).unwrap();

        assert!(json.get("issuedAt").is_some());
        assert!(json.get("expiresAt").is_some());
        assert_eq!(json["user"]["role"], "admin");
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let session = AuthSession::issue("token".to_string(), test_user());
        let json = serde_json::to_string(&session).unwrap();
        let back: AuthSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
