//! Frontend-shaped record models.
//!
//! These are the canonical shapes the rest of the SDK works with: the
//! camelCase frontend form of the backend's snake_case records. Each model
//! deserializes tolerantly (aliases for both namings, safe defaults for
//! missing optional fields, pass-through of unmodeled fields) and
//! serializes to camelCase, which is what makes the transforms in
//! [`crate::transform`] idempotent.

pub(crate) mod de;

mod cart;
mod delivery_zone;
mod order;
mod page_content;
mod product;

pub use cart::CartItem;
pub use delivery_zone::DeliveryZone;
pub use order::{Order, OrderItem, OrderStatus};
pub use page_content::PageContent;
pub use product::Product;
