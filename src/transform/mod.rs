//! Backend-to-frontend record transforms.
//!
//! Pure mapping functions from the backend's loosely-typed snake_case
//! records into the frontend camelCase shapes in [`crate::models`]: one
//! function per entity plus plural convenience wrappers that map over
//! lists.
//!
//! The transforms are total over optional fields — a missing `stock`
//! defaults to 0, missing `images`/`sizes` to empty lists, `colors` to
//! `None` — and only the identity field is assumed present. They are also
//! idempotent: transforming an already-transformed record yields the same
//! record, because every model accepts both namings on the way in and
//! emits camelCase on the way out.
//!
//! # Example
//!
//! ```rust
//! use grandson_api::transform::transform_product;
//! use serde_json::json;
//!
//! let product = transform_product(json!({
//!     "id": 1,
//!     "name": "Maillot domicile",
//!     "is_active": true,
//!     "stock": 4
//! }))
//! .unwrap();
//!
//! assert_eq!(product.id, "1");
//! assert!(product.is_active);
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::models::{DeliveryZone, Order, PageContent, Product};

/// Error produced when a record cannot be transformed.
///
/// Only a missing or malformed identity field triggers this; every other
/// field degrades to its safe default instead.
#[derive(Debug, Error)]
#[error("Malformed record: {0}")]
pub struct TransformError(#[from] serde_json::Error);

/// Transforms one backend product record.
///
/// # Errors
///
/// Returns [`TransformError`] when the record has no usable identity.
pub fn transform_product(raw: Value) -> Result<Product, TransformError> {
    Ok(serde_json::from_value(raw)?)
}

/// Transforms one backend order record.
///
/// # Errors
///
/// Returns [`TransformError`] when the record has no usable identity.
pub fn transform_order(raw: Value) -> Result<Order, TransformError> {
    Ok(serde_json::from_value(raw)?)
}

/// Transforms one backend delivery zone record.
///
/// # Errors
///
/// Returns [`TransformError`] when the record has no usable identity.
pub fn transform_delivery_zone(raw: Value) -> Result<DeliveryZone, TransformError> {
    Ok(serde_json::from_value(raw)?)
}

/// Transforms one backend page content record.
///
/// # Errors
///
/// Returns [`TransformError`] when the record has no usable identity.
pub fn transform_page_content(raw: Value) -> Result<PageContent, TransformError> {
    Ok(serde_json::from_value(raw)?)
}

/// Transforms a list of product records, dropping malformed entries.
pub fn transform_products<I: IntoIterator<Item = Value>>(items: I) -> Vec<Product> {
    collect("product", items, transform_product)
}

/// Transforms a list of order records, dropping malformed entries.
pub fn transform_orders<I: IntoIterator<Item = Value>>(items: I) -> Vec<Order> {
    collect("order", items, transform_order)
}

/// Transforms a list of delivery zone records, dropping malformed entries.
pub fn transform_delivery_zones<I: IntoIterator<Item = Value>>(items: I) -> Vec<DeliveryZone> {
    collect("delivery zone", items, transform_delivery_zone)
}

/// Transforms a list of page content records, dropping malformed entries.
pub fn transform_page_contents<I: IntoIterator<Item = Value>>(items: I) -> Vec<PageContent> {
    collect("page content", items, transform_page_content)
}

/// Maps `transform` over `items`; a malformed entry is dropped with a
/// warning rather than failing the batch.
fn collect<T, I, F>(entity: &'static str, items: I, transform: F) -> Vec<T>
where
    I: IntoIterator<Item = Value>,
    F: Fn(Value) -> Result<T, TransformError>,
{
    items
        .into_iter()
        .filter_map(|raw| match transform(raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("Dropping malformed {entity} record: {err}");
                None
            }
        })
        .collect()
}
