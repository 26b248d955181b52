//! Extraction of human-readable messages from server error bodies.
//!
//! The API reports failures in several shapes: `{"detail": "..."}` for
//! general rejections, `{"error": "..."}` from some endpoints, and
//! field-keyed maps of message lists (`{"title": ["required"], ...}`) for
//! validation. Each store action has its own preference order; these
//! helpers are the shared pieces.

use serde_json::Value;

/// The `detail` field, when present and a string.
pub(crate) fn detail(body: &Value) -> Option<String> {
    body.get("detail")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// The `error` field, when present and a string.
pub(crate) fn error_field(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// The first entry of a field's message list, when present.
pub(crate) fn field_first(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::Array(items) => items.first().and_then(Value::as_str).map(ToOwned::to_owned),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Flatten every field's message list into one comma-joined string.
/// Returns `None` when the body is not an object or yields nothing.
pub(crate) fn flatten_fields(body: &Value) -> Option<String> {
    let map = body.as_object()?;
    let mut parts = Vec::new();
    for value in map.values() {
        match value {
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(s) => parts.push(s.clone()),
                        other => parts.push(other.to_string()),
                    }
                }
            }
            Value::String(s) => parts.push(s.clone()),
            other => parts.push(other.to_string()),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_is_extracted() {
        assert_eq!(
            detail(&json!({"detail": "Invalid credentials"})).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(detail(&json!({"detail": 42})), None);
        assert_eq!(detail(&json!("plain text")), None);
    }

    #[test]
    fn field_first_takes_the_leading_entry() {
        let body = json!({"username": ["already taken", "too short"]});
        assert_eq!(field_first(&body, "username").as_deref(), Some("already taken"));
        assert_eq!(field_first(&body, "email"), None);
    }

    #[test]
    fn field_first_accepts_bare_string() {
        let body = json!({"username": "already taken"});
        assert_eq!(field_first(&body, "username").as_deref(), Some("already taken"));
    }

    #[test]
    fn flatten_joins_all_field_messages() {
        let body = json!({
            "title": ["This field is required."],
            "content": ["This field is required.", "too short"]
        });
        let flat = flatten_fields(&body).unwrap();
        assert!(flat.contains("This field is required."));
        assert!(flat.contains("too short"));
        assert_eq!(flat.matches(", ").count(), 2);
    }

    #[test]
    fn flatten_rejects_non_objects() {
        assert_eq!(flatten_fields(&json!("oops")), None);
        assert_eq!(flatten_fields(&json!({})), None);
    }
}
