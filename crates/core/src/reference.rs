//! Reference data: low-churn lookup lists the client caches but never owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog category. Flat list, no hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A blog tag. Flat list, no hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}
