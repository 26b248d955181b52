use tracing::debug;

use inkpost_client::{ApiClient, BlogFilters, BlogPayload, Error};
use inkpost_core::Blog;

use crate::error::StoreError;
use crate::messages;

/// Read-only snapshot of content state.
#[derive(Debug, Clone, Default)]
pub struct BlogState {
    /// Result of the most recent completed list fetch, in server order.
    pub blogs: Vec<Blog>,
    /// Result of the most recent completed detail fetch.
    pub selected_blog: Option<Blog>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Owns the in-memory blog list and the selected detail, performing CRUD
/// against the API.
pub struct BlogStore {
    api: ApiClient,
    state: BlogState,
}

impl BlogStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: BlogState::default(),
        }
    }

    /// Read-only state snapshot.
    pub fn state(&self) -> &BlogState {
        &self.state
    }

    /// Restore the initial state.
    pub fn reset(&mut self) {
        self.state = BlogState::default();
    }

    /// Fetch the list matching `filters`, replacing `blogs` wholesale.
    ///
    /// The returned sequence is also handed back so callers that issue
    /// repeated calls with different filters can keep their own copy:
    /// `blogs` is a single shared slot and the most recently completed
    /// fetch wins.
    pub async fn fetch_blogs(&mut self, filters: &BlogFilters) -> Result<Vec<Blog>, StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.api.list_blogs(filters).await;
        self.state.loading = false;
        match result {
            Ok(blogs) => {
                debug!(count = blogs.len(), "fetched blog list");
                self.state.blogs = blogs.clone();
                Ok(blogs)
            }
            Err(e) => {
                self.state.blogs = Vec::new();
                let err = StoreError::action(e.to_string(), e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch one blog by id, replacing `selected_blog` wholesale.
    pub async fn fetch_blog_detail(&mut self, id: i64) -> Result<Blog, StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.api.blog_detail(id).await;
        self.state.loading = false;
        match result {
            Ok(blog) => {
                self.state.selected_blog = Some(blog.clone());
                Ok(blog)
            }
            Err(e) => {
                let err = StoreError::action(e.to_string(), e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Create a blog and append the server's returned entity to `blogs`.
    pub async fn create_blog(&mut self, payload: &BlogPayload) -> Result<Blog, StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.api.create_blog(payload).await;
        self.state.loading = false;
        match result {
            Ok(blog) => {
                self.state.blogs.push(blog.clone());
                Ok(blog)
            }
            Err(e) => {
                let err = StoreError::action(write_message(&e), e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Update a blog, replacing `selected_blog` with the returned
    /// representation.
    ///
    /// The `blogs` list is deliberately left untouched: a list view keeps
    /// showing pre-edit data until its next explicit fetch. Known
    /// staleness gap, preserved as-is.
    pub async fn update_blog(
        &mut self,
        id: i64,
        payload: &BlogPayload,
    ) -> Result<Blog, StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.api.update_blog(id, payload).await;
        self.state.loading = false;
        match result {
            Ok(blog) => {
                self.state.selected_blog = Some(blog.clone());
                Ok(blog)
            }
            Err(e) => {
                let err = StoreError::action(e.to_string(), e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a blog, removing it from `blogs` and clearing
    /// `selected_blog` if it was the deleted entity.
    pub async fn delete_blog(&mut self, id: i64) -> Result<(), StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.api.delete_blog(id).await;
        self.state.loading = false;
        match result {
            Ok(()) => {
                self.state.blogs.retain(|blog| blog.id != id);
                if self
                    .state
                    .selected_blog
                    .as_ref()
                    .is_some_and(|blog| blog.id == id)
                {
                    self.state.selected_blog = None;
                }
                Ok(())
            }
            Err(e) => {
                let err = StoreError::action(delete_message(&e), e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// Message for a failed create: `detail`, then `error`, then every field's
/// validation messages flattened, then the raw error text.
fn write_message(err: &Error) -> String {
    err.api_body()
        .and_then(|body| {
            messages::detail(body)
                .or_else(|| messages::error_field(body))
                .or_else(|| messages::flatten_fields(body))
        })
        .unwrap_or_else(|| err.to_string())
}

/// Message for a failed delete: `detail`, then `error`, then a generic
/// fallback.
fn delete_message(err: &Error) -> String {
    err.api_body()
        .and_then(|body| messages::detail(body).or_else(|| messages::error_field(body)))
        .unwrap_or_else(|| "Failed to delete blog".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(body: serde_json::Value) -> Error {
        Error::Api { status: 400, body }
    }

    #[test]
    fn write_message_prefers_detail_then_error_then_fields() {
        let err = api_error(json!({"detail": "not allowed"}));
        assert_eq!(write_message(&err), "not allowed");

        let err = api_error(json!({"error": "boom"}));
        assert_eq!(write_message(&err), "boom");

        let err = api_error(json!({
            "title": ["This field is required."],
            "content": ["This field is required."]
        }));
        let msg = write_message(&err);
        assert!(msg.contains("This field is required."));
        assert!(msg.contains(", "));
    }

    #[test]
    fn write_message_falls_back_to_error_text() {
        let err = Error::Connection("refused".to_owned());
        assert_eq!(write_message(&err), "connection error: refused");
    }

    #[test]
    fn delete_message_has_its_own_fallback() {
        let err = api_error(json!({}));
        assert_eq!(delete_message(&err), "Failed to delete blog");

        let err = api_error(json!({"detail": "forbidden"}));
        assert_eq!(delete_message(&err), "forbidden");
    }
}
