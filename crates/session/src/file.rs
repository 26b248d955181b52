use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::SessionError;
use crate::store::SessionStore;

/// Durable [`SessionStore`] backed by a single JSON object file.
///
/// The whole map is held in memory and rewritten on every mutation via a
/// temporary file renamed into place, so a crash mid-write never leaves a
/// torn file behind. A missing file opens as an empty session; a file that
/// exists but is not a JSON string map is reported as
/// [`SessionError::Corrupt`].
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    data: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading any existing session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw)
                .map_err(|e| SessionError::Corrupt(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(SessionError::Io(e)),
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let serialized =
            serde_json::to_vec_pretty(data).map_err(|e| SessionError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&serialized)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        data.insert(key.to_owned(), value.to_owned());
        self.persist(&data)
    }

    fn remove(&self, key: &str) -> Result<bool, SessionError> {
        let mut data = self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let existed = data.remove(key).is_some();
        if existed {
            self.persist(&data)?;
        }
        Ok(existed)
    }
}
