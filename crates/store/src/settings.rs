use tracing::warn;

use inkpost_client::ApiClient;
use inkpost_core::{Category, Tag};

/// Read-only snapshot of reference-data state.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub loading: bool,
}

/// Caches the category and tag lists.
///
/// Reference data is best-effort: a failed fetch is logged and the field
/// reset to empty rather than surfaced — the editor simply renders no
/// options until a later fetch succeeds. A fresh fetch replaces the list;
/// there is no other invalidation.
pub struct SettingsStore {
    api: ApiClient,
    state: SettingsState,
}

impl SettingsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: SettingsState::default(),
        }
    }

    /// Read-only state snapshot.
    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    /// Restore the initial state.
    pub fn reset(&mut self) {
        self.state = SettingsState::default();
    }

    /// Fetch and replace the category list.
    pub async fn fetch_categories(&mut self) {
        self.state.loading = true;
        match self.api.categories().await {
            Ok(categories) => self.state.categories = categories,
            Err(e) => {
                warn!(error = %e, "failed to fetch categories");
                self.state.categories = Vec::new();
            }
        }
        self.state.loading = false;
    }

    /// Fetch and replace the tag list.
    pub async fn fetch_tags(&mut self) {
        self.state.loading = true;
        match self.api.tags().await {
            Ok(tags) => self.state.tags = tags,
            Err(e) => {
                warn!(error = %e, "failed to fetch tags");
                self.state.tags = Vec::new();
            }
        }
        self.state.loading = false;
    }
}
