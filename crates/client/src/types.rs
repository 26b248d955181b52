//! Wire-level request and response types for the auth endpoints and the
//! blog list query.

use inkpost_core::{BlogStatus, User};
use serde::{Deserialize, Serialize};

/// Credentials sent to `POST /auth/login/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Response of `POST /auth/login/`.
///
/// The server has shipped two token spellings over time: a JWT pair
/// (`access` + `refresh`) and a single `token` field. Both are accepted;
/// [`LoginResponse::access_token`] resolves them in that order. The user
/// object is optional — some deployments return only tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    /// The access token, whichever field carried it.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access.as_deref().or(self.token.as_deref())
    }
}

/// Payload for `POST /users/` (registration).
///
/// `password2` is the confirmation field the server validates against
/// `password`; it is part of the wire contract, not client-side sugar.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password2: password2.into(),
            first_name: None,
            last_name: None,
        }
    }
}

/// Query parameters for `GET /blogs/blogs/`.
///
/// Every field is optional; unset fields are omitted from the query
/// string entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlogFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl BlogFilters {
    /// No filters: the server returns its default listing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Restrict to a publication status.
    #[must_use]
    pub fn status(mut self, status: BlogStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to one author by id.
    #[must_use]
    pub fn author(mut self, author_id: i64) -> Self {
        self.author = Some(author_id);
        self
    }

    /// Restrict to one category by id.
    #[must_use]
    pub fn category(mut self, category_id: i64) -> Self {
        self.category = Some(category_id);
        self
    }

    /// Restrict to featured posts.
    #[must_use]
    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    /// Full-text search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_field_wins_over_token() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access": "jwt-a", "token": "legacy-t", "refresh": "jwt-r"}"#,
        )
        .unwrap();
        assert_eq!(resp.access_token(), Some("jwt-a"));
        assert_eq!(resp.refresh.as_deref(), Some("jwt-r"));
    }

    #[test]
    fn legacy_token_field_is_accepted() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token": "legacy-t"}"#).unwrap();
        assert_eq!(resp.access_token(), Some("legacy-t"));
        assert!(resp.refresh.is_none());
        assert!(resp.user.is_none());
    }

    #[test]
    fn tokenless_response_resolves_to_none() {
        let resp: LoginResponse = serde_json::from_str(r#"{"user": {"username": "a"}}"#).unwrap();
        assert_eq!(resp.access_token(), None);
    }

    #[test]
    fn unset_filters_serialize_to_empty_query() {
        let query = serde_urlencoded_like(&BlogFilters::none());
        assert_eq!(query, "");
    }

    #[test]
    fn set_filters_appear_in_query() {
        let filters = BlogFilters::none()
            .status(BlogStatus::Published)
            .author(42);
        let query = serde_urlencoded_like(&filters);
        assert!(query.contains("status=published"));
        assert!(query.contains("author=42"));
        assert!(!query.contains("category"));
    }

    // reqwest encodes `.query(&T)` through serde_urlencoded; serializing
    // through serde_json key/value pairs mirrors the field skipping.
    fn serde_urlencoded_like(filters: &BlogFilters) -> String {
        let value = serde_json::to_value(filters).unwrap();
        let map = value.as_object().unwrap();
        map.iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => format!("{k}={s}"),
                other => format!("{k}={other}"),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
