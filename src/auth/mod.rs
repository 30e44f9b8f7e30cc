//! Authentication state for the Grandson API SDK.
//!
//! This module holds the client-side authentication lifecycle: the
//! persisted session record, the durable storage it lives in, and the
//! [`TokenStore`] that centralizes every read and write of it.
//!
//! # Overview
//!
//! - [`AuthSession`] / [`AuthUser`] / [`UserRole`]: the bearer token plus
//!   the minimal user record, with issued/expiry timestamps
//! - [`KeyValueStore`]: the durable storage seam, with [`MemoryStore`] and
//!   [`JsonFileStore`] implementations
//! - [`TokenStore`]: store / read / expire / clear, with passive expiry
//!   checked on every read
//!
//! # Lifecycle
//!
//! Sessions are valid for a fixed 24 h window from issuance. There is no
//! background refresh: a read after expiry treats the session as absent
//! and purges storage, so stale or corrupt records self-heal to
//! "logged out".
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use grandson_api::auth::{AuthUser, MemoryStore, TokenStore, UserRole};
//!
//! let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
//!
//! let report = tokens.store_auth_data(
//!     "bearer-token".to_string(),
//!     AuthUser {
//!         id: "1".to_string(),
//!         username: "admin".to_string(),
//!         role: UserRole::Admin,
//!     },
//! );
//! assert!(report.success);
//!
//! tokens.clear_auth_data();
//! assert!(!tokens.is_authenticated());
//! ```

mod session;
mod storage;
mod token_store;

pub use session::{AuthSession, AuthUser, UserRole, SESSION_TTL_HOURS};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use token_store::{StoreReport, TokenStore, AUTH_STORAGE_KEY, STORE_WRITE_ATTEMPTS};
