use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::{Category, Tag};
use crate::user::User;

/// Publication state of a blog post.
///
/// The client only ever writes `Draft` and `Published`; `Archived` exists
/// because the server may return it and list responses must deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
    Archived,
}

impl BlogStatus {
    /// Return the wire representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl Default for BlogStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl std::fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reader comment embedded in a blog detail response. Read-only for this
/// layer; comments are never created or mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Author username as rendered by the server.
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Server-generated summary embedded in a blog detail response, when one
/// has been produced. Read-only for this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub id: i64,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A blog post as returned by the server.
///
/// List responses omit `content` and `comments`; both default to empty so
/// the same type deserializes either representation. Cached copies are
/// replaced whole on every store mutation, never merged field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub slug: String,

    /// Short teaser, at most 300 characters.
    #[serde(default)]
    pub description: String,

    /// Markdown body. Empty in list responses.
    #[serde(default)]
    pub content: String,

    /// URL of the uploaded featured image, if any.
    #[serde(default)]
    pub featured_image: Option<String>,

    /// Author username as rendered by the server.
    pub author: String,

    /// Numeric author id; not every server representation includes it.
    #[serde(default)]
    pub author_id: Option<i64>,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub status: BlogStatus,

    #[serde(default)]
    pub views_count: i64,

    #[serde(default)]
    pub is_featured: bool,

    /// Present in detail responses only.
    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub ai_summary: Option<BlogSummary>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Blog {
    /// Whether `user` is the author of this post.
    ///
    /// The server renders `author` as a display string, so the check
    /// accepts a username match, an email match, or a numeric id match
    /// when `author_id` is present.
    #[must_use]
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author == user.username
            || (!user.email.is_empty() && self.author == user.email)
            || self.author_id.is_some_and(|id| id == user.id)
    }
}
