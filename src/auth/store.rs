//! # Session Storage
//!
//! Durable client-side storage for the session token and the cached company
//! ID. Values live under fixed keys so a session survives a restart.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{AuthError, AuthResult};

/// Key the session token is stored under
pub const TOKEN_KEY: &str = "token";

/// Key the cached company ID is stored under
pub const COMPANY_ID_KEY: &str = "companyId";

/// Key/value storage for session state
pub trait SessionStore: Send + Sync {
    /// Read the value under `key`
    fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Write `value` under `key`
    fn set(&self, key: &str, value: &str) -> AuthResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> AuthResult<()>;

    fn load_token(&self) -> AuthResult<Option<String>> {
        self.get(TOKEN_KEY)
    }

    fn save_token(&self, token: &str) -> AuthResult<()> {
        self.set(TOKEN_KEY, token)
    }

    fn clear_token(&self) -> AuthResult<()> {
        self.remove(TOKEN_KEY)
    }

    fn load_company_id(&self) -> AuthResult<Option<String>> {
        self.get(COMPANY_ID_KEY)
    }

    fn save_company_id(&self, company_id: &str) -> AuthResult<()> {
        self.set(COMPANY_ID_KEY, company_id)
    }

    fn clear_company_id(&self) -> AuthResult<()> {
        self.remove(COMPANY_ID_KEY)
    }

    /// Drop everything, including contents that could not be parsed
    fn reset(&self) -> AuthResult<()> {
        self.clear_token()?;
        self.clear_company_id()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> AuthResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AuthResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> AuthResult<()> {
        (**self).remove(key)
    }

    fn reset(&self) -> AuthResult<()> {
        (**self).reset()
    }
}

/// Session storage backed by a single JSON file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AuthResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(AuthError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            AuthError::CorruptSession(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> AuthResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AuthError::Storage(format!("Failed to encode session: {}", e)))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                AuthError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
            })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let _guard = self
            .lock
            .read()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AuthResult<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> AuthResult<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    /// Rewrites the file without reading it first
    fn reset(&self) -> AuthResult<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        self.write_all(&BTreeMap::new())
    }
}

/// In-memory session storage for testing
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token, as if left over from a previous run
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AuthResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuthError::Storage("Lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
