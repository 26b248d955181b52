use dashmap::DashMap;

use crate::error::SessionError;
use crate::store::SessionStore;

/// In-memory [`SessionStore`] backed by a [`DashMap`].
///
/// Nothing survives the process; intended for tests and for embedders that
/// manage durability themselves.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    data: DashMap<String, String>,
}

impl MemorySessionStore {
    /// Create a new, empty in-memory session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.data.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, SessionError> {
        Ok(self.data.remove(key).is_some())
    }
}
