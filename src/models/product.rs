//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de;

/// A storefront product.
///
/// Deserialization is tolerant of both backend generations: snake_case
/// fields are accepted through aliases, missing optional fields take safe
/// defaults, and unrecognized fields pass through untouched. Serialization
/// always produces the frontend camelCase shape, which makes the
/// product transform idempotent.
///
/// Invariants: `stock` is non-negative (negative input clamps to 0);
/// `is_active == false` hides the product from the storefront regardless
/// of stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The unique identifier of the product.
    #[serde(alias = "_id", deserialize_with = "de::id")]
    pub id: String,

    /// The display name of the product.
    #[serde(default)]
    pub name: String,

    /// The product description.
    #[serde(default)]
    pub description: String,

    /// The price in integer currency units.
    #[serde(default, deserialize_with = "de::lenient_int")]
    pub price: i64,

    /// Free-text category label.
    #[serde(default)]
    pub category: String,

    /// Available sizes, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Image URLs or upload paths; the first entry is the primary image.
    #[serde(default)]
    pub images: Vec<String>,

    /// Available colors; `None` when the backend sent nothing usable.
    #[serde(default, deserialize_with = "de::colors")]
    pub colors: Option<Vec<String>>,

    /// Units in stock.
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub stock: u32,

    /// Whether the product is visible on the storefront.
    #[serde(alias = "is_active", default = "de::default_true")]
    pub is_active: bool,

    /// When the product was created.
    #[serde(
        alias = "created_at",
        default,
        deserialize_with = "de::lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    #[serde(
        alias = "updated_at",
        default,
        deserialize_with = "de::lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Fields this SDK does not model, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Returns the primary image path, if the product has any images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns `true` when the product can be shown on the storefront.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.is_active
    }

    /// Returns `true` when `quantity` units can currently be ordered.
    ///
    /// Inactive products are never orderable, regardless of stock.
    #[must_use]
    pub const fn can_order(&self, quantity: u32) -> bool {
        self.is_active && quantity <= self.stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_snake_case_backend_record() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Maillot domicile",
            "price": 15000,
            "is_active": false,
            "created_at": "2024-11-05T10:00:00Z",
            "vendor_note": "legacy field"
        }))
        .unwrap();

        assert_eq!(product.id, "7");
        assert!(!product.is_active);
        assert!(product.created_at.is_some());
        assert_eq!(product.stock, 0);
        assert!(product.sizes.is_empty());
        assert_eq!(product.colors, None);
        assert_eq!(product.extra["vendor_note"], "legacy field");
    }

    #[test]
    fn test_serializes_camel_case() {
        let product: Product =
            serde_json::from_value(json!({ "id": "1", "is_active": true })).unwrap();
        let value = serde_json::to_value(&product).unwrap();

        assert!(value.get("isActive").is_some());
        assert!(value.get("is_active").is_none());
    }

    #[test]
    fn test_can_order_respects_active_flag_and_stock() {
        let active: Product =
            serde_json::from_value(json!({ "id": "1", "stock": 5, "is_active": true })).unwrap();
        assert!(active.can_order(5));
        assert!(!active.can_order(6));

        let hidden: Product =
            serde_json::from_value(json!({ "id": "1", "stock": 5, "is_active": false })).unwrap();
        assert!(!hidden.can_order(1));
    }

    #[test]
    fn test_primary_image_is_first() {
        let product: Product = serde_json::from_value(json!({
            "id": "1",
            "images": ["/uploads/a.jpg", "/uploads/b.jpg"]
        }))
        .unwrap();
        assert_eq!(product.primary_image(), Some("/uploads/a.jpg"));
    }
}
