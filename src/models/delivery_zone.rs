//! Delivery zone records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de;

/// A delivery zone the storefront can ship to.
///
/// `is_active` gates storefront selection: inactive zones stay in the
/// back office but are never offered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryZone {
    /// The unique identifier of the zone.
    #[serde(alias = "_id", deserialize_with = "de::id")]
    pub id: String,

    /// Unique display label (e.g., "Dakar Plateau").
    #[serde(default)]
    pub name: String,

    /// The delivery fee for this zone, in integer currency units.
    #[serde(default, deserialize_with = "de::lenient_int")]
    pub price: i64,

    /// Whether the zone can be selected on the storefront.
    #[serde(alias = "is_active", default = "de::default_true")]
    pub is_active: bool,

    /// Fields this SDK does not model, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_snake_case_backend_record() {
        let zone: DeliveryZone = serde_json::from_value(json!({
            "id": 3,
            "name": "Pikine",
            "price": 2500,
            "is_active": false
        }))
        .unwrap();

        assert_eq!(zone.id, "3");
        assert_eq!(zone.price, 2500);
        assert!(!zone.is_active);
    }

    #[test]
    fn test_missing_fields_take_safe_defaults() {
        let zone: DeliveryZone = serde_json::from_value(json!({ "id": "z" })).unwrap();
        assert_eq!(zone.price, 0);
        assert!(zone.is_active);
    }
}
