//! Response-envelope normalization.
//!
//! The backend's success envelope is `{ success: bool, data?: T,
//! error?: { code, message } }`, but some legacy endpoints return bare
//! arrays or objects without the envelope. Both shapes are normalized
//! here, once, at the transport boundary — every caller receives one
//! canonical shape instead of repeating `data?.orders || orders || []`
//! at each call site.

use serde_json::Value;

/// The error half of a backend envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvelopeError {
    /// The machine-readable error code, when the backend provides one.
    pub code: Option<String>,
    /// The human-readable error message.
    pub message: Option<String>,
}

/// A parsed response body, tolerant of both backend generations.
///
/// # Example
///
/// ```rust
/// use grandson_api::clients::Envelope;
/// use serde_json::json;
///
/// // Enveloped shape
/// let enveloped = Envelope::parse(json!({
///     "success": true,
///     "data": { "orders": [{ "id": 1 }] }
/// }));
/// assert_eq!(enveloped.list("orders").len(), 1);
///
/// // Legacy bare shape
/// let bare = Envelope::parse(json!({ "orders": [{ "id": 1 }] }));
/// assert_eq!(bare.list("orders").len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    /// The `success` flag, when the envelope carried one.
    pub success: Option<bool>,
    /// The payload: `data` when enveloped, the whole body otherwise.
    pub data: Value,
    /// The error object, when present.
    pub error: Option<EnvelopeError>,
}

impl Envelope {
    /// Parses a response body into its normalized form.
    ///
    /// A body with a `success`, `data`, or `error` key is treated as
    /// enveloped; anything else (legacy bare arrays/objects, scalars) is
    /// passed through as the payload itself.
    #[must_use]
    pub fn parse(body: Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self {
                success: None,
                data: body,
                error: None,
            };
        };

        let is_enveloped = object.contains_key("success")
            || object.contains_key("data")
            || object.contains_key("error");
        if !is_enveloped {
            return Self {
                success: None,
                data: body,
                error: None,
            };
        }

        let success = object.get("success").and_then(Value::as_bool);
        let error = object.get("error").map(|raw| EnvelopeError {
            code: raw
                .get("code")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            message: raw
                .get("message")
                .and_then(Value::as_str)
                .map(ToString::to_string)
                .or_else(|| raw.as_str().map(ToString::to_string)),
        });
        let data = object.get("data").cloned().unwrap_or_else(|| {
            // Enveloped but without `data`: expose the body minus the
            // envelope keys so callers still see sibling fields.
            let mut rest = object.clone();
            rest.remove("success");
            rest.remove("error");
            Value::Object(rest)
        });

        Self {
            success,
            data,
            error,
        }
    }

    /// Extracts a named list from the payload.
    ///
    /// Looks for `data[key]` first, then a top-level `key` (the legacy
    /// shape), then an unkeyed bare array; anything else yields an empty
    /// list.
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<Value> {
        if let Some(items) = self.data.get(key).and_then(Value::as_array) {
            return items.clone();
        }
        if let Some(items) = self.data.as_array() {
            return items.clone();
        }
        Vec::new()
    }

    /// Consumes the envelope, returning the payload.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }
}

/// Extracts the human-readable message from an error response body.
///
/// Tries the two known shapes — `error.message` then `message` — and
/// gives up (returns `None`) on anything else; the caller falls back to
/// the HTTP status text.
#[must_use]
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(ToString::to_string)
}

/// Extracts the machine-readable error code, when present.
#[must_use]
pub fn extract_error_code(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_enveloped_success() {
        let envelope = Envelope::parse(json!({
            "success": true,
            "data": { "order": { "orderNumber": "GRP-20241105-0001" } }
        }));

        assert_eq!(envelope.success, Some(true));
        assert!(envelope.error.is_none());
        assert_eq!(
            envelope.data["order"]["orderNumber"],
            "GRP-20241105-0001"
        );
    }

    #[test]
    fn test_parse_enveloped_error() {
        let envelope = Envelope::parse(json!({
            "success": false,
            "error": { "code": "INSUFFICIENT_STOCK", "message": "Stock insuffisant" }
        }));

        assert_eq!(envelope.success, Some(false));
        let error = envelope.error.unwrap();
        assert_eq!(error.code.as_deref(), Some("INSUFFICIENT_STOCK"));
        assert_eq!(error.message.as_deref(), Some("Stock insuffisant"));
    }

    #[test]
    fn test_parse_legacy_bare_object() {
        let envelope = Envelope::parse(json!({ "orders": [{ "id": 1 }, { "id": 2 }] }));

        assert_eq!(envelope.success, None);
        assert_eq!(envelope.list("orders").len(), 2);
    }

    #[test]
    fn test_parse_legacy_bare_array() {
        let envelope = Envelope::parse(json!([{ "id": 1 }]));

        assert_eq!(envelope.success, None);
        assert_eq!(envelope.list("products").len(), 1);
    }

    #[test]
    fn test_list_prefers_keyed_payload() {
        let envelope = Envelope::parse(json!({
            "success": true,
            "data": { "orders": [{ "id": 1 }] }
        }));
        assert_eq!(envelope.list("orders").len(), 1);
        assert!(envelope.list("products").is_empty());
    }

    #[test]
    fn test_list_on_scalar_payload_is_empty() {
        let envelope = Envelope::parse(json!("plain string"));
        assert!(envelope.list("orders").is_empty());
    }

    #[test]
    fn test_enveloped_without_data_keeps_sibling_fields() {
        let envelope = Envelope::parse(json!({
            "success": true,
            "order": { "id": 7 }
        }));
        assert_eq!(envelope.data["order"]["id"], 7);
        assert!(envelope.data.get("success").is_none());
    }

    #[test]
    fn test_extract_error_message_both_shapes() {
        assert_eq!(
            extract_error_message(&json!({ "error": { "message": "nested" } })),
            Some("nested".to_string())
        );
        assert_eq!(
            extract_error_message(&json!({ "message": "flat" })),
            Some("flat".to_string())
        );
        assert_eq!(extract_error_message(&json!({ "other": 1 })), None);
    }

    #[test]
    fn test_extract_error_code() {
        assert_eq!(
            extract_error_code(&json!({ "error": { "code": "INSUFFICIENT_STOCK" } })),
            Some("INSUFFICIENT_STOCK".to_string())
        );
        assert_eq!(extract_error_code(&json!({ "message": "flat" })), None);
    }
}
