//! Editable page content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de;

/// A block of editable storefront page content (hero text, about page,
/// contact details), keyed by page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// The unique identifier of the content block.
    #[serde(alias = "_id", deserialize_with = "de::id")]
    pub id: String,

    /// Which page this block belongs to (e.g., "home", "about").
    #[serde(alias = "page_name", default)]
    pub page: String,

    /// The block title.
    #[serde(default)]
    pub title: String,

    /// The block body.
    #[serde(default)]
    pub content: String,

    /// When the block was last updated.
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
