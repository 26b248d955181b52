//! inkpost HTTP Client
//!
//! A typed Rust client for the blog CMS REST API. Requests automatically
//! carry the bearer access token held in the session store, so callers
//! never thread credentials through individual calls.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use inkpost_client::{ApiClient, BlogFilters, LoginRequest};
//! use inkpost_session::MemorySessionStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), inkpost_client::Error> {
//!     let session = Arc::new(MemorySessionStore::new());
//!     let client = ApiClient::new("http://localhost:8000/api", session);
//!
//!     let response = client
//!         .login(&LoginRequest::new("alice", "hunter2hunter2"))
//!         .await?;
//!     println!("token: {:?}", response.access_token());
//!
//!     let blogs = client.list_blogs(&BlogFilters::none()).await?;
//!     println!("{} blogs", blogs.len());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Use the builder for a custom timeout or a preconfigured
//! [`reqwest::Client`]:
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use inkpost_client::ApiClientBuilder;
//! use inkpost_session::MemorySessionStore;
//!
//! let client = ApiClientBuilder::new("http://localhost:8000/api", Arc::new(MemorySessionStore::new()))
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

mod error;
mod payload;
mod types;

pub use error::Error;
pub use payload::{BlogDraft, BlogPayload, ImageUpload};
pub use types::{BlogFilters, LoginRequest, LoginResponse, RegisterRequest};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use inkpost_core::{Blog, Category, ListEnvelope, Tag, User};
use inkpost_session::{SessionStore, ACCESS_TOKEN_KEY};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the blog CMS API.
///
/// Cheap to clone; clones share the underlying connection pool and
/// session store handle.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring an [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    session: Arc<dyn SessionStore>,
    client: Option<Client>,
}

impl ApiClientBuilder {
    /// Create a new builder with the given base URL and session store.
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            session,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient, Error> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(ApiClient {
            client,
            base_url: self.base_url,
            session: self.session,
        })
    }
}

impl ApiClient {
    /// Create a new client with default configuration.
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        ApiClientBuilder::new(base_url, session)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url, session)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach the stored bearer token, when one is present.
    ///
    /// A session read failure is treated as "no token": the request still
    /// goes out and the server decides whether it needs authentication.
    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.get(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                req.header("Authorization", format!("Bearer {token}"))
            }
            _ => req,
        }
    }

    /// Send a request and split the response into success or a structured
    /// API error with the body preserved.
    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let response = self
            .add_auth(req)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Deserialization(e.to_string()))
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticate with username and password: `POST /auth/login/`.
    ///
    /// The client does not persist anything itself; the caller decides
    /// what to store from the [`LoginResponse`].
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, Error> {
        let url = format!("{}/auth/login/", self.base_url);
        let response = self.execute(self.client.post(&url).json(request)).await?;
        Self::decode(response).await
    }

    /// Create a new user account: `POST /users/`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, Error> {
        let url = format!("{}/users/", self.base_url);
        let response = self.execute(self.client.post(&url).json(request)).await?;
        Self::decode(response).await
    }

    /// Fetch the authenticated user's profile: `GET /users/profile/`.
    pub async fn profile(&self) -> Result<User, Error> {
        let url = format!("{}/users/profile/", self.base_url);
        let response = self.execute(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Blogs
    // =========================================================================

    /// List blogs matching the filters: `GET /blogs/blogs/`.
    ///
    /// Accepts both wire shapes (bare array or paginated envelope) and
    /// returns a plain sequence in server order.
    pub async fn list_blogs(&self, filters: &BlogFilters) -> Result<Vec<Blog>, Error> {
        let url = format!("{}/blogs/blogs/", self.base_url);
        let response = self.execute(self.client.get(&url).query(filters)).await?;
        let envelope: ListEnvelope<Blog> = Self::decode(response).await?;
        Ok(envelope.into_vec())
    }

    /// Fetch one blog with comments: `GET /blogs/blogs/:id/`.
    pub async fn blog_detail(&self, id: i64) -> Result<Blog, Error> {
        let url = format!("{}/blogs/blogs/{id}/", self.base_url);
        let response = self.execute(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    /// Create a blog: `POST /blogs/blogs/`.
    ///
    /// A [`BlogPayload::Structured`] payload is sent as JSON; a
    /// [`BlogPayload::WithImage`] payload is sent as multipart form data
    /// with the content-type header (and its boundary) set by the
    /// transport, never by hand.
    pub async fn create_blog(&self, payload: &BlogPayload) -> Result<Blog, Error> {
        let url = format!("{}/blogs/blogs/", self.base_url);
        let request = self.blog_write_request(self.client.post(&url), payload)?;
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// Update a blog: `PUT /blogs/blogs/:id/`.
    ///
    /// Same payload encoding rules as [`ApiClient::create_blog`].
    pub async fn update_blog(&self, id: i64, payload: &BlogPayload) -> Result<Blog, Error> {
        let url = format!("{}/blogs/blogs/{id}/", self.base_url);
        let request = self.blog_write_request(self.client.put(&url), payload)?;
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// Delete a blog: `DELETE /blogs/blogs/:id/`.
    pub async fn delete_blog(&self, id: i64) -> Result<(), Error> {
        let url = format!("{}/blogs/blogs/{id}/", self.base_url);
        self.execute(self.client.delete(&url)).await?;
        Ok(())
    }

    fn blog_write_request(
        &self,
        req: reqwest::RequestBuilder,
        payload: &BlogPayload,
    ) -> Result<reqwest::RequestBuilder, Error> {
        match payload {
            BlogPayload::Structured(draft) => Ok(req.json(draft)),
            BlogPayload::WithImage { draft, image } => {
                let form = payload::multipart_form(draft, Some(image))?;
                Ok(req.multipart(form))
            }
        }
    }

    // =========================================================================
    // Reference data
    // =========================================================================

    /// List all categories: `GET /blogs/categories/`.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        let url = format!("{}/blogs/categories/", self.base_url);
        let response = self.execute(self.client.get(&url)).await?;
        let envelope: ListEnvelope<Category> = Self::decode(response).await?;
        Ok(envelope.into_vec())
    }

    /// List all tags: `GET /blogs/tags/`.
    pub async fn tags(&self) -> Result<Vec<Tag>, Error> {
        let url = format!("{}/blogs/tags/", self.base_url);
        let response = self.execute(self.client.get(&url)).await?;
        let envelope: ListEnvelope<Tag> = Self::decode(response).await?;
        Ok(envelope.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_session::MemorySessionStore;

    fn test_client() -> ApiClient {
        ApiClient::new("http://localhost:8000", Arc::new(MemorySessionStore::new()))
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ApiClient::new(
            "http://localhost:8000/",
            Arc::new(MemorySessionStore::new()),
        );
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn client_preserves_url_without_slash() {
        let client = test_client();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn builder_accepts_custom_timeout() {
        let client = ApiClientBuilder::new(
            "http://localhost:8000",
            Arc::new(MemorySessionStore::new()),
        )
        .timeout(Duration::from_secs(5))
        .build();
        assert!(client.is_ok());
    }

    #[test]
    fn auth_header_attached_only_when_token_stored() {
        let session = Arc::new(MemorySessionStore::new());
        let client = ApiClient::new("http://localhost:8000", Arc::clone(&session) as _);

        let req = client.add_auth(client.client.get("http://localhost:8000/x"));
        let built = req.build().unwrap();
        assert!(built.headers().get("Authorization").is_none());

        session.set(ACCESS_TOKEN_KEY, "tok-123").unwrap();
        let req = client.add_auth(client.client.get("http://localhost:8000/x"));
        let built = req.build().unwrap();
        assert_eq!(
            built.headers().get("Authorization").unwrap(),
            "Bearer tok-123"
        );
    }

    #[test]
    fn empty_token_is_not_attached() {
        let session = Arc::new(MemorySessionStore::new());
        session.set(ACCESS_TOKEN_KEY, "").unwrap();
        let client = ApiClient::new("http://localhost:8000", Arc::clone(&session) as _);

        let req = client.add_auth(client.client.get("http://localhost:8000/x"));
        let built = req.build().unwrap();
        assert!(built.headers().get("Authorization").is_none());
    }
}
