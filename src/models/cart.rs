//! Cart line records.
//!
//! Cart items live only on the client — they are never persisted
//! server-side until checkout submits them as order lines.

use serde::{Deserialize, Serialize};

use super::de;

/// One line in the client-side cart.
///
/// Carries a denormalized price/name/image snapshot so the cart renders
/// without refetching products. The snapshot is display-only; checkout
/// revalidates stock against the backend before submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// The product this line references.
    #[serde(alias = "product_id", deserialize_with = "de::id")]
    pub product_id: String,

    /// The selected size.
    #[serde(default)]
    pub size: String,

    /// How many units are in the cart.
    #[serde(default = "de::default_quantity", deserialize_with = "de::lenient_quantity")]
    pub quantity: u32,

    /// Unit price snapshot, in integer currency units.
    #[serde(default, deserialize_with = "de::lenient_int")]
    pub price: i64,

    /// Product name snapshot, for display.
    #[serde(default)]
    pub name: String,

    /// Primary image snapshot, for display.
    #[serde(default)]
    pub image: String,
}

impl CartItem {
    /// Returns this line's contribution to the cart subtotal.
    #[must_use]
    pub const fn subtotal(&self) -> i64 {
        self.price * self.quantity as i64
    }

    /// Returns `true` when `other` is the same product in the same size.
    #[must_use]
    pub fn same_line(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.size == other.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subtotal() {
        let item: CartItem = serde_json::from_value(json!({
            "productId": "1", "size": "M", "quantity": 2, "price": 50000
        }))
        .unwrap();
        assert_eq!(item.subtotal(), 100000);
    }

    #[test]
    fn test_same_line_matches_product_and_size() {
        let a: CartItem =
            serde_json::from_value(json!({ "productId": "1", "size": "M" })).unwrap();
        let b: CartItem =
            serde_json::from_value(json!({ "productId": "1", "size": "L" })).unwrap();
        let c: CartItem =
            serde_json::from_value(json!({ "product_id": "1", "size": "M" })).unwrap();

        assert!(!a.same_line(&b));
        assert!(a.same_line(&c));
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let item: CartItem = serde_json::from_value(json!({ "productId": "1" })).unwrap();
        assert_eq!(item.quantity, 1);
    }
}
