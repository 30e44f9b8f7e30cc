//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::de;

/// The lifecycle status of an order.
///
/// Orders are created in `Pending` by checkout submission; every later
/// transition is an admin action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Newly submitted, awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed by the back office.
    Confirmed,
    /// Handed to delivery.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled by the back office.
    Cancelled,
}

/// Lenient status parsing: unknown strings fall back to `Pending` so an
/// unexpected backend value cannot fail the whole record.
fn order_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderStatus, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Some(raw) = value.as_str() else {
        return Ok(OrderStatus::Pending);
    };
    Ok(match raw.to_lowercase().as_str() {
        "confirmed" => OrderStatus::Confirmed,
        "shipped" => OrderStatus::Shipped,
        "delivered" => OrderStatus::Delivered,
        "cancelled" => OrderStatus::Cancelled,
        _ => OrderStatus::Pending,
    })
}

/// One line of an order.
///
/// Carries a snapshot of the size and unit price at the time of order —
/// later price changes on the product must not retroactively alter
/// historical orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// The product this line references.
    #[serde(alias = "product_id", alias = "product", deserialize_with = "de::id")]
    pub product_id: String,

    /// The product name snapshot, for display.
    #[serde(alias = "product_name", default)]
    pub product_name: String,

    /// The selected size.
    #[serde(default)]
    pub size: String,

    /// How many units were ordered. Always positive.
    #[serde(default = "de::default_quantity", deserialize_with = "de::lenient_quantity")]
    pub quantity: u32,

    /// The unit price at the time of order, in integer currency units.
    #[serde(default, deserialize_with = "de::lenient_int")]
    pub price: i64,

    /// Fields this SDK does not model, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderItem {
    /// Returns this line's contribution to the order total.
    #[must_use]
    pub const fn subtotal(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// A customer order.
///
/// `total_amount` equals the sum of item subtotals plus the delivery fee;
/// the backend enforces it and [`Order::computed_total`] lets clients
/// cross-check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The unique identifier of the order.
    #[serde(alias = "_id", deserialize_with = "de::id")]
    pub id: String,

    /// Human-readable order number (`GRP-YYYYMMDD-NNNN`).
    #[serde(alias = "order_number", default)]
    pub order_number: String,

    /// The customer's name.
    #[serde(alias = "customer_name", default)]
    pub customer_name: String,

    /// The customer's phone number.
    #[serde(alias = "customer_phone", default)]
    pub customer_phone: String,

    /// The customer's email, when provided.
    #[serde(alias = "customer_email", default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// The delivery address.
    #[serde(alias = "delivery_address", default)]
    pub delivery_address: String,

    /// The delivery zone name.
    #[serde(alias = "delivery_zone", default)]
    pub delivery_zone: String,

    /// The delivery fee, in integer currency units.
    #[serde(alias = "delivery_fee", default, deserialize_with = "de::lenient_int")]
    pub delivery_fee: i64,

    /// The order total, in integer currency units.
    #[serde(alias = "total_amount", default, deserialize_with = "de::lenient_int")]
    pub total_amount: i64,

    /// The lifecycle status.
    #[serde(default, deserialize_with = "order_status")]
    pub status: OrderStatus,

    /// The ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// When the order was created.
    #[serde(
        alias = "created_at",
        default,
        deserialize_with = "de::lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// When the order was last updated.
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

impl Order {
    /// Recomputes the total from the lines and delivery fee.
    #[must_use]
    pub fn computed_total(&self) -> i64 {
        self.items.iter().map(OrderItem::subtotal).sum::<i64>() + self.delivery_fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_snake_case_backend_record() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "order_number": "GRP-20241105-0001",
            "customer_name": "Awa Diop",
            "delivery_zone": "Dakar Plateau",
            "delivery_fee": 10000,
            "total_amount": 110000,
            "status": "pending",
            "items": [
                { "product_id": 1, "size": "M", "quantity": 2, "price": 50000 }
            ]
        }))
        .unwrap();

        assert_eq!(order.order_number, "GRP-20241105-0001");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, "1");
        assert_eq!(order.computed_total(), 110000);
    }

    #[test]
    fn test_total_matches_items_plus_fee() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "delivery_fee": 2000,
            "items": [
                { "productId": "a", "quantity": 3, "price": 1500 },
                { "productId": "b", "quantity": 1, "price": 7000 }
            ]
        }))
        .unwrap();
        assert_eq!(order.computed_total(), 3 * 1500 + 7000 + 2000);
    }

    #[test]
    fn test_unknown_status_falls_back_to_pending() {
        let order: Order =
            serde_json::from_value(json!({ "id": "o1", "status": "teleported" })).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_serializes_camel_case() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "order_number": "GRP-20241105-0002",
            "customer_name": "Awa Diop"
        }))
        .unwrap();
        let value = serde_json::to_value(&order).unwrap();

        assert!(value.get("orderNumber").is_some());
        assert!(value.get("customerName").is_some());
        assert!(value.get("order_number").is_none());
    }
}
