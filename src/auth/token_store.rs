//! Centralized token lifecycle management.
//!
//! All reads and writes of the persisted auth record go through
//! [`TokenStore`] — one interface with an explicit lifecycle
//! (store/read/expire/clear) instead of storage access scattered across
//! call sites.
//!
//! Expiry is passive: it is checked on every read, never pushed by a
//! background refresh. Stale or corrupt records self-heal to "logged out"
//! rather than surfacing errors to downstream reads.

use std::sync::Arc;

use crate::auth::session::{AuthSession, AuthUser};
use crate::auth::storage::{KeyValueStore, StorageError};

/// Fixed storage key for the persisted auth record.
pub const AUTH_STORAGE_KEY: &str = "grandson_auth";

/// Bounded number of write attempts before a persist is reported failed.
pub const STORE_WRITE_ATTEMPTS: u32 = 3;

/// The outcome of persisting an auth record.
///
/// Persistence to browser-style storage can transiently fail, so the
/// write is retried a bounded number of times and the outcome is reported
/// as data rather than thrown — login flows can distinguish "session save
/// failed" from "wrong credentials".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    /// Whether the record was persisted.
    pub success: bool,
    /// How many retries were needed (0 when the first attempt succeeded).
    pub retries: u32,
    /// The last storage error, when `success` is false.
    pub error: Option<StorageError>,
}

/// Holds the bearer token and minimal user record, with expiry bookkeeping.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use grandson_api::auth::{AuthUser, MemoryStore, TokenStore, UserRole};
///
/// let store = TokenStore::new(Arc::new(MemoryStore::new()));
///
/// let report = store.store_auth_data(
///     "bearer-token".to_string(),
///     AuthUser {
///         id: "1".to_string(),
///         username: "admin".to_string(),
///         role: UserRole::Admin,
///     },
/// );
/// assert!(report.success);
/// assert!(store.is_authenticated());
/// assert_eq!(store.get_token(), Some("bearer-token".to_string()));
/// ```
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Creates a token store over the given durable storage.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Persists a fresh session for `token` and `user`.
    ///
    /// The session is stamped with `issued_at = now` and
    /// `expires_at = now + 24h`. The write is attempted up to
    /// [`STORE_WRITE_ATTEMPTS`] times; the returned [`StoreReport`] carries
    /// success, the retry count, and the last error on failure.
    pub fn store_auth_data(&self, token: String, user: AuthUser) -> StoreReport {
        self.store_session(&AuthSession::issue(token, user))
    }

    /// Persists an already-built session. See [`Self::store_auth_data`].
    pub fn store_session(&self, session: &AuthSession) -> StoreReport {
        let payload = match serde_json::to_string(session) {
            Ok(payload) => payload,
            Err(err) => {
                return StoreReport {
                    success: false,
                    retries: 0,
                    error: Some(StorageError::WriteFailed {
                        reason: err.to_string(),
                    }),
                }
            }
        };

        let mut last_error = None;
        for attempt in 0..STORE_WRITE_ATTEMPTS {
            match self.storage.set(AUTH_STORAGE_KEY, &payload) {
                Ok(()) => {
                    return StoreReport {
                        success: true,
                        retries: attempt,
                        error: None,
                    }
                }
                Err(err) => {
                    tracing::warn!(attempt, "Auth record write failed: {err}");
                    last_error = Some(err);
                }
            }
        }

        StoreReport {
            success: false,
            retries: STORE_WRITE_ATTEMPTS - 1,
            error: last_error,
        }
    }

    /// Returns the bearer token of the current valid session, if any.
    #[must_use]
    pub fn get_token(&self) -> Option<String> {
        self.get_auth_data().map(|session| session.token)
    }

    /// Returns the current session, if one exists and is still valid.
    ///
    /// A missing record returns `None`. A record that fails to parse, or
    /// whose expiry has passed, is purged from storage as a side effect
    /// and also returns `None`.
    #[must_use]
    pub fn get_auth_data(&self) -> Option<AuthSession> {
        let raw = match self.storage.get(AUTH_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("Auth record read failed: {err}");
                return None;
            }
        };

        match serde_json::from_str::<AuthSession>(&raw) {
            Ok(session) if !session.expired() => Some(session),
            Ok(_) => {
                self.clear_auth_data();
                None
            }
            Err(err) => {
                tracing::warn!("Purging corrupt auth record: {err}");
                self.clear_auth_data();
                None
            }
        }
    }

    /// Returns `true` iff a well-formed, unexpired session is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_auth_data().is_some()
    }

    /// Removes the persisted auth record.
    pub fn clear_auth_data(&self) {
        if let Err(err) = self.storage.remove(AUTH_STORAGE_KEY) {
            tracing::warn!("Auth record removal failed: {err}");
        }
    }
}

// Verify TokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenStore>();
};
