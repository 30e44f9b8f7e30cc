//! Integration tests for the backend-to-frontend record transforms.
//!
//! These tests pin the tolerance contract: snake_case input, safe
//! defaults, pass-through of unmodeled fields, and idempotence under
//! repeated transformation.

use serde_json::json;

use grandson_api::transform::{
    transform_delivery_zone, transform_order, transform_page_content, transform_product,
    transform_products,
};
use grandson_api::OrderStatus;

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_product_transform_is_idempotent_across_shapes() {
    let records = [
        json!({ "id": 1 }),
        json!({ "id": "2", "name": "Maillot", "price": 15000, "stock": 3, "is_active": true }),
        json!({
            "id": "3",
            "order_weirdness": { "nested": [1, 2] },
            "colors": ["noir"],
            "images": ["/uploads/a.jpg"],
            "is_active": false,
            "created_at": "2024-11-05T10:00:00Z"
        }),
    ];

    for raw in records {
        let once = transform_product(raw).unwrap();
        let twice = transform_product(serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_order_transform_is_idempotent() {
    let raw = json!({
        "id": "o1",
        "order_number": "GRP-20241105-0001",
        "customer_name": "Awa Diop",
        "customer_phone": "+221770000000",
        "delivery_address": "Rue 12, Dakar",
        "delivery_zone": "Dakar Plateau",
        "delivery_fee": 10000,
        "total_amount": 110000,
        "status": "shipped",
        "items": [
            { "product_id": 1, "size": "M", "quantity": 2, "price": 50000 }
        ],
        "created_at": "2024-11-05T09:00:00Z"
    });

    let once = transform_order(raw).unwrap();
    let twice = transform_order(serde_json::to_value(&once).unwrap()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.status, OrderStatus::Shipped);
    assert_eq!(twice.order_number, "GRP-20241105-0001");
}

// ============================================================================
// Defaults and Tolerance
// ============================================================================

#[test]
fn test_product_defaults_for_missing_fields() {
    let product = transform_product(json!({ "id": "p1" })).unwrap();

    assert_eq!(product.stock, 0);
    assert!(product.sizes.is_empty());
    assert!(product.images.is_empty());
    assert_eq!(product.colors, None);
    assert!(product.is_active);
    assert_eq!(product.price, 0);
    assert!(product.created_at.is_none());
}

#[test]
fn test_colors_non_array_becomes_none() {
    let junk = transform_product(json!({ "id": "p1", "colors": "noir" })).unwrap();
    assert_eq!(junk.colors, None);

    let listed = transform_product(json!({ "id": "p1", "colors": ["noir", "or"] })).unwrap();
    assert_eq!(
        listed.colors,
        Some(vec!["noir".to_string(), "or".to_string()])
    );
}

#[test]
fn test_unmodeled_fields_pass_through() {
    let product = transform_product(json!({
        "id": "p1",
        "supplier_ref": "SKU-99",
        "promo": { "percent": 20 }
    }))
    .unwrap();

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["supplier_ref"], "SKU-99");
    assert_eq!(value["promo"]["percent"], 20);
}

#[test]
fn test_delivery_zone_and_page_content_transforms() {
    let zone = transform_delivery_zone(json!({
        "id": 4,
        "name": "Guédiawaye",
        "price": "3000",
        "is_active": true
    }))
    .unwrap();
    assert_eq!(zone.id, "4");
    assert_eq!(zone.price, 3000);

    let block = transform_page_content(json!({
        "id": "pc1",
        "page_name": "about",
        "title": "Notre histoire"
    }))
    .unwrap();
    assert_eq!(block.page, "about");
}

// ============================================================================
// Plural Wrappers
// ============================================================================

#[test]
fn test_plural_wrapper_maps_and_drops_malformed() {
    let products = transform_products(vec![
        json!({ "id": "1" }),
        json!({ "no": "identity" }),
        json!(42),
        json!({ "id": 3, "name": "ok" }),
    ]);

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].id, "3");
}
