use serde::Deserialize;

/// Wire shape of a list endpoint response.
///
/// The API returns either a bare JSON array or a paginated envelope with a
/// `results` field depending on server-side pagination settings. Callers
/// normalize with [`ListEnvelope::into_vec`] and never observe which shape
/// arrived.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListEnvelope<T> {
    /// Collapse either shape into the item sequence, preserving order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paginated { results: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_normalizes() {
        let env: ListEnvelope<i64> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(env.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn paginated_envelope_normalizes() {
        let env: ListEnvelope<i64> =
            serde_json::from_str(r#"{"count": 3, "next": null, "results": [1, 2, 3]}"#).unwrap();
        assert_eq!(env.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_results_field_normalizes_to_empty() {
        let env: ListEnvelope<i64> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(env.into_vec().is_empty());
    }
}
