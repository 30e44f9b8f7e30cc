//! Cart state and the checkout flow.
//!
//! The cart is owned by the client session: it lives in durable key-value
//! storage under a fixed key and is cleared on successful order
//! submission. [`CheckoutFlow`] drives a single checkout attempt through
//! its states, re-validating stock against the backend on cart mutation
//! and on a fixed periodic interval while checkout is open — stock can
//! change concurrently from other customers, so passing validation once
//! is no guarantee submission will succeed.
//!
//! # States
//!
//! `Idle → Validating → Ready | Blocked → Submitting → Confirmed | Failed`
//!
//! `Blocked` carries the specific offending lines (product, requested,
//! available) so the UI can offer line removal. `Failed` after a
//! passed validation is expected when the stock race loses; it carries a
//! stock-specific message distinct from the generic one.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::auth::KeyValueStore;
use crate::clients::{ApiClient, Envelope, ErrorKind};
use crate::models::{CartItem, DeliveryZone};
use crate::transform::transform_product;

/// Fixed storage key for the persisted cart.
pub const CART_STORAGE_KEY: &str = "grandson_cart";

/// How often stock is re-validated while checkout is open.
pub const REVALIDATION_INTERVAL: Duration = Duration::from_secs(30);

/// User-visible message when cart lines exceed available stock.
pub const OUT_OF_STOCK_MESSAGE: &str =
    "Certains articles de votre panier ne sont plus disponibles en quantité suffisante.";

/// User-visible message for any other submission failure.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Une erreur est survenue lors de la commande. Veuillez réessayer.";

/// The client-side cart, persisted through a [`KeyValueStore`].
///
/// Persistence is best-effort: a failed write logs a warning and the
/// in-memory cart stays authoritative for the session, matching how the
/// storefront treats browser storage.
pub struct Cart {
    storage: Arc<dyn KeyValueStore>,
    items: Vec<CartItem>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart").field("items", &self.items).finish()
    }
}

impl Cart {
    /// Loads the cart from storage. A missing or corrupt record reads as
    /// an empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(entries) => entries
                    .into_iter()
                    .filter_map(|entry| match serde_json::from_value::<CartItem>(entry) {
                        Ok(item) => Some(item),
                        Err(err) => {
                            tracing::warn!("Dropping malformed cart line: {err}");
                            None
                        }
                    })
                    .collect(),
                Err(err) => {
                    tracing::warn!("Ignoring corrupt cart record: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("Cart read failed: {err}");
                Vec::new()
            }
        };

        Self { storage, items }
    }

    /// Returns the cart lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns `true` when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a line, merging quantities with an existing line for the same
    /// product and size.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.same_line(&item)) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
        self.persist();
    }

    /// Sets the quantity of a line; a quantity of 0 removes it.
    pub fn set_quantity(&mut self, product_id: &str, size: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id, size);
            return;
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id && line.size == size)
        {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Removes the line for the given product and size.
    pub fn remove(&mut self, product_id: &str, size: &str) {
        self.items
            .retain(|line| !(line.product_id == product_id && line.size == size));
        self.persist();
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Returns the sum of line subtotals, before delivery fees.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Cart serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(CART_STORAGE_KEY, &payload) {
            tracing::warn!("Cart write failed: {err}");
        }
    }
}

/// Customer contact fields collected by the checkout form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerInfo {
    /// The customer's name.
    pub name: String,
    /// The customer's phone number.
    pub phone: String,
    /// The customer's email, when provided.
    pub email: Option<String>,
    /// The delivery address.
    pub address: String,
}

/// One cart line whose requested quantity exceeds the available stock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockIssue {
    /// The product the line references.
    pub product_id: String,
    /// The product name, for display.
    pub name: String,
    /// How many units the cart requests.
    pub requested_quantity: u32,
    /// How many units the backend currently has.
    pub available_stock: u32,
}

/// The state of a single checkout attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutState {
    /// Checkout not started, or the cart is empty.
    Idle,
    /// A stock check is in flight.
    Validating,
    /// Every line is available; submission is allowed.
    Ready,
    /// One or more lines exceed available stock.
    Blocked(Vec<StockIssue>),
    /// The order is being submitted.
    Submitting,
    /// The order was accepted.
    Confirmed {
        /// The backend-issued order number, for display and routing.
        order_number: String,
    },
    /// The attempt failed; resubmitting issues a new request.
    Failed {
        /// Machine-readable failure classification.
        kind: ErrorKind,
        /// French-language message for inline display.
        message: String,
    },
}

/// Orchestrates stock validation, delivery-fee totaling, and order
/// submission for one checkout attempt.
///
/// # Example
///
/// ```rust,ignore
/// let mut flow = CheckoutFlow::new(client, Cart::load(storage));
///
/// if let CheckoutState::Ready = flow.validate_stock().await {
///     flow.submit(&customer, &zone).await;
/// }
/// match flow.state() {
///     CheckoutState::Confirmed { order_number } => { /* route to confirmation */ }
///     CheckoutState::Blocked(issues) => { /* offer line removal */ }
///     _ => {}
/// }
/// ```
pub struct CheckoutFlow {
    client: Arc<ApiClient>,
    cart: Cart,
    state: CheckoutState,
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CheckoutFlow {
    /// Creates a flow over the given client and cart, starting `Idle`.
    #[must_use]
    pub const fn new(client: Arc<ApiClient>, cart: Cart) -> Self {
        Self {
            client,
            cart,
            state: CheckoutState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Returns the cart under checkout.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the amount a submission with this zone would carry.
    #[must_use]
    pub fn total_amount(&self, zone: &DeliveryZone) -> i64 {
        self.cart.subtotal() + zone.price
    }

    /// Checks current stock for every cart line.
    ///
    /// Transitions to `Ready` when every line is available, or `Blocked`
    /// with the offending lines. An unreachable backend fails the check
    /// (`Failed`) rather than letting an unvalidated submission through.
    pub async fn validate_stock(&mut self) -> &CheckoutState {
        if self.cart.is_empty() {
            self.state = CheckoutState::Idle;
            return &self.state;
        }

        self.state = CheckoutState::Validating;

        let mut issues = Vec::new();
        for line in self.cart.items() {
            match self.fetch_available_stock(&line.product_id).await {
                Ok(available) if line.quantity > available => {
                    issues.push(StockIssue {
                        product_id: line.product_id.clone(),
                        name: line.name.clone(),
                        requested_quantity: line.quantity,
                        available_stock: available,
                    });
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(product_id = %line.product_id, "Stock check failed: {err}");
                    self.state = CheckoutState::Failed {
                        kind: err.kind(),
                        message: GENERIC_FAILURE_MESSAGE.to_string(),
                    };
                    return &self.state;
                }
            }
        }

        self.state = if issues.is_empty() {
            CheckoutState::Ready
        } else {
            CheckoutState::Blocked(issues)
        };
        &self.state
    }

    /// Changes a line's quantity and re-validates stock.
    pub async fn set_quantity(
        &mut self,
        product_id: &str,
        size: &str,
        quantity: u32,
    ) -> &CheckoutState {
        self.cart.set_quantity(product_id, size, quantity);
        self.validate_stock().await
    }

    /// Removes a line (typically one reported in `Blocked`) and
    /// re-validates stock.
    pub async fn remove_line(&mut self, product_id: &str, size: &str) -> &CheckoutState {
        self.cart.remove(product_id, size);
        self.validate_stock().await
    }

    /// Submits the order.
    ///
    /// Runs a stock validation first unless the flow is already `Ready`.
    /// On success the cart is cleared and the state carries the
    /// backend-issued order number. An `INSUFFICIENT_STOCK` rejection
    /// after validation passed is the expected stock race and surfaces
    /// with a stock-specific message; every other failure is generic.
    pub async fn submit(&mut self, customer: &CustomerInfo, zone: &DeliveryZone) -> &CheckoutState {
        if self.state != CheckoutState::Ready {
            self.validate_stock().await;
            if self.state != CheckoutState::Ready {
                return &self.state;
            }
        }

        self.state = CheckoutState::Submitting;

        let payload = json!({
            "customerName": customer.name,
            "customerPhone": customer.phone,
            "customerEmail": customer.email,
            "deliveryAddress": customer.address,
            "deliveryZone": zone.name,
            "deliveryFee": zone.price,
            "items": self.cart.items(),
            "totalAmount": self.total_amount(zone),
        });

        match self.client.post("/api/orders", &payload, false).await {
            Ok(body) => {
                let envelope = Envelope::parse(body);
                match Self::extract_order_number(&envelope.into_data()) {
                    Some(order_number) => {
                        self.cart.clear();
                        self.state = CheckoutState::Confirmed { order_number };
                    }
                    None => {
                        tracing::warn!("Order accepted without an order number");
                        self.state = CheckoutState::Failed {
                            kind: ErrorKind::Other,
                            message: GENERIC_FAILURE_MESSAGE.to_string(),
                        };
                    }
                }
            }
            Err(err) if err.is_insufficient_stock() => {
                self.state = CheckoutState::Failed {
                    kind: ErrorKind::InsufficientStock,
                    message: OUT_OF_STOCK_MESSAGE.to_string(),
                };
            }
            Err(err) => {
                tracing::warn!("Order submission failed: {err}");
                self.state = CheckoutState::Failed {
                    kind: err.kind(),
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                };
            }
        }

        &self.state
    }

    /// Re-validates stock on a fixed interval until `cancel` fires.
    ///
    /// The owning view starts this when checkout opens and cancels it on
    /// unmount; cancellation is the only way the loop ends, so a
    /// forgotten token would leak the timer. Submission states are left
    /// untouched — the loop only refreshes `Ready`/`Blocked`.
    pub async fn run_revalidation(&mut self, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick of a tokio interval fires immediately; the
        // opening validation is the caller's explicit call.
        ticker.tick().await;

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if matches!(
                        self.state,
                        CheckoutState::Submitting
                            | CheckoutState::Confirmed { .. }
                            | CheckoutState::Failed { .. }
                    ) {
                        continue;
                    }
                    self.validate_stock().await;
                }
            }
        }
    }

    /// Fetches the orderable stock for a product: its stock count, or 0
    /// when the product has been deactivated.
    async fn fetch_available_stock(&self, product_id: &str) -> Result<u32, crate::ApiError> {
        let body = self
            .client
            .get(&format!("/api/products/{product_id}"), false)
            .await?;

        let envelope = Envelope::parse(body);
        let data = envelope.into_data();
        let record = data.get("product").cloned().unwrap_or(data);

        Ok(transform_product(record).map_or(0, |product| {
            if product.is_active {
                product.stock
            } else {
                0
            }
        }))
    }

    /// Extracts the order number from a submission response, tolerating
    /// both envelope generations.
    fn extract_order_number(data: &Value) -> Option<String> {
        data.get("order")
            .and_then(|order| {
                order
                    .get("orderNumber")
                    .or_else(|| order.get("order_number"))
            })
            .or_else(|| data.get("orderNumber"))
            .or_else(|| data.get("order_number"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;
    use serde_json::json;

    fn line(product_id: &str, size: &str, quantity: u32, price: i64) -> CartItem {
        serde_json::from_value(json!({
            "productId": product_id,
            "size": size,
            "quantity": quantity,
            "price": price,
            "name": format!("Produit {product_id}"),
            "image": "/uploads/p.jpg"
        }))
        .unwrap()
    }

    #[test]
    fn test_cart_add_merges_same_line() {
        let mut cart = Cart::load(Arc::new(MemoryStore::new()));
        cart.add(line("1", "M", 1, 50000));
        cart.add(line("1", "M", 2, 50000));
        cart.add(line("1", "L", 1, 50000));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.subtotal(), 4 * 50000);
    }

    #[test]
    fn test_cart_set_quantity_zero_removes_line() {
        let mut cart = Cart::load(Arc::new(MemoryStore::new()));
        cart.add(line("1", "M", 2, 50000));
        cart.set_quantity("1", "M", 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_persists_across_loads() {
        let storage = Arc::new(MemoryStore::new());

        let mut cart = Cart::load(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
        cart.add(line("1", "M", 2, 50000));
        drop(cart);

        let reloaded = Cart::load(storage);
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].quantity, 2);
    }

    #[test]
    fn test_cart_corrupt_record_reads_as_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(CART_STORAGE_KEY, "{definitely not a cart").unwrap();

        let cart = Cart::load(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_extract_order_number_tolerates_both_shapes() {
        assert_eq!(
            CheckoutFlow::extract_order_number(
                &json!({ "order": { "orderNumber": "GRP-20241105-0001" } })
            ),
            Some("GRP-20241105-0001".to_string())
        );
        assert_eq!(
            CheckoutFlow::extract_order_number(&json!({ "order_number": "GRP-20241105-0002" })),
            Some("GRP-20241105-0002".to_string())
        );
        assert_eq!(CheckoutFlow::extract_order_number(&json!({})), None);
    }
}
