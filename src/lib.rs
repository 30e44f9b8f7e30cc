//! # Grandson API Rust SDK
//!
//! A Rust client SDK for the Grandson Project storefront backend,
//! providing environment-aware endpoint resolution, authenticated HTTP
//! with bounded retry, token lifecycle management, tolerant record
//! transforms, image URL resolution, and the checkout flow.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Instance-based configuration via [`GrandsonConfig`] and [`GrandsonConfigBuilder`]
//! - Backend endpoint resolution from config, hostname, and user agent via [`resolve_api_base`]
//! - An async HTTP client with bearer injection, mobile cache-busting,
//!   and GET retry via [`ApiClient`]
//! - Token lifecycle with passive expiry via [`auth::TokenStore`]
//! - Backend→frontend record transforms via [`transform`]
//! - CDN image URL resolution via [`images`]
//! - The cart and checkout state machine via [`checkout`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use grandson_api::auth::{MemoryStore, TokenStore};
//! use grandson_api::{ApiClient, ClientContext, GrandsonConfig};
//!
//! // Resolve the backend from the runtime surroundings
//! let config = GrandsonConfig::builder().build();
//! let context = ClientContext::browser(
//!     "localhost",
//!     "Mozilla/5.0 (X11; Linux x86_64)",
//! );
//!
//! let tokens = Arc::new(TokenStore::new(Arc::new(MemoryStore::new())));
//! let client = ApiClient::new(&config, &context, tokens);
//! assert_eq!(client.base_url(), "http://localhost:3001");
//! ```
//!
//! ## Fetching and Transforming Records
//!
//! ```rust,ignore
//! use grandson_api::{transform::transform_products, Envelope};
//!
//! let body = client.get("/api/products", false).await?;
//! let products = transform_products(Envelope::parse(body).list("products"));
//! ```
//!
//! ## Checkout
//!
//! ```rust,ignore
//! use grandson_api::checkout::{Cart, CheckoutFlow, CheckoutState};
//!
//! let mut flow = CheckoutFlow::new(client, Cart::load(storage));
//! if let CheckoutState::Ready = flow.validate_stock().await {
//!     flow.submit(&customer, &zone).await;
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **One boundary**: response envelopes and error bodies are normalized
//!   in the client layer, never at call sites
//! - **Structured errors**: domain failures carry a machine-readable
//!   [`ErrorKind`], not message substrings
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod images;
pub mod models;
pub mod transform;

// Re-export public types at crate root for convenience
pub use config::{
    resolve_api_base, ApiBaseUrl, ClientContext, GrandsonConfig, GrandsonConfigBuilder,
    OrderNumber, Platform,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiClient, ApiError, Envelope, ErrorKind, ResponseError, RetriesExhaustedError,
};

// Re-export the record models
pub use models::{CartItem, DeliveryZone, Order, OrderItem, OrderStatus, PageContent, Product};
