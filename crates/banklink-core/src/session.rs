//! Session bootstrap: logged-in flag and cached user profile
//!
//! Both values live in a small local key-value store under fixed keys and
//! survive across runs. Nothing here expires; logging out removes them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::models::User;

/// Key of the logged-in flag
pub const LOGGED_IN_KEY: &str = "isLoggedIn";
/// Key of the cached user profile (JSON text)
pub const CURRENT_USER_KEY: &str = "currentUser";

/// String key-value persistence
pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove_item(&self, key: &str) -> CoreResult<()>;
}

/// Process-local store, used by tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.remove(key);
        Ok(())
    }
}

/// JSON object on disk; the whole file is rewritten on every change
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CoreResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| CoreError::Storage {
                message: format!("{}: {}", self.path.display(), e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items).map_err(|e| CoreError::Storage {
            message: e.to_string(),
        })?;

        // Write beside the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Typed view over the logged-in flag and the cached profile
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn LocalStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// In-memory session, starts logged out
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// True only when the flag is exactly "true"; read errors count as logged out
    pub fn is_logged_in(&self) -> bool {
        match self.store.get_item(LOGGED_IN_KEY) {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("Session flag unreadable, treating as logged out: {}", e);
                false
            }
        }
    }

    /// Cached profile; a corrupt entry is reported, not silently dropped
    pub fn current_user(&self) -> CoreResult<Option<User>> {
        match self.store.get_item(CURRENT_USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| CoreError::Storage {
                    message: format!("cached user profile is not valid JSON: {}", e),
                }),
            None => Ok(None),
        }
    }

    /// Record a successful login or registration
    pub fn begin(&self, user: &User) -> CoreResult<()> {
        let raw = serde_json::to_string(user).map_err(|e| CoreError::Storage {
            message: e.to_string(),
        })?;
        self.store.set_item(CURRENT_USER_KEY, &raw)?;
        self.store.set_item(LOGGED_IN_KEY, "true")?;
        log::info!("Session started for {}", user.email);
        Ok(())
    }

    /// Forget the logged-in user
    pub fn end(&self) -> CoreResult<()> {
        self.store.remove_item(LOGGED_IN_KEY)?;
        self.store.remove_item(CURRENT_USER_KEY)?;
        log::info!("Session ended");
        Ok(())
    }

    /// Gate for pages that need a logged-in user
    pub fn require_login(&self) -> CoreResult<Option<User>> {
        if !self.is_logged_in() {
            return Err(CoreError::Unauthorized);
        }
        self.current_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Thandi",
            "surname": "Nkosi",
            "fullName": "Thandi Nkosi",
            "email": "thandi@example.com",
            "idNumber": "9001015009087"
        }))
        .unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("banklink-session-{}-{}", std::process::id(), name))
            .join("session.json")
    }

    #[test]
    fn test_memory_session_lifecycle() {
        let session = SessionStore::in_memory();
        assert!(!session.is_logged_in());
        assert!(matches!(session.require_login(), Err(CoreError::Unauthorized)));

        session.begin(&user()).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.require_login().unwrap().unwrap().email, "thandi@example.com");

        session.end().unwrap();
        assert!(!session.is_logged_in());
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let path = temp_path("persist");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());

        SessionStore::new(Arc::new(FileStore::new(&path)))
            .begin(&user())
            .unwrap();

        let reopened = SessionStore::new(Arc::new(FileStore::new(&path)));
        assert!(reopened.is_logged_in());
        assert_eq!(reopened.current_user().unwrap().unwrap().display_name(), "Thandi Nkosi");

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[LOGGED_IN_KEY], "true");

        reopened.end().unwrap();
        assert!(!SessionStore::new(Arc::new(FileStore::new(&path))).is_logged_in());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.get_item(LOGGED_IN_KEY).unwrap(), None);
    }

    #[test]
    fn test_flag_must_be_exactly_true() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(LOGGED_IN_KEY, "yes").unwrap();
        assert!(!SessionStore::new(store).is_logged_in());
    }

    #[test]
    fn test_corrupt_profile_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(CURRENT_USER_KEY, "{not json").unwrap();
        let session = SessionStore::new(store);
        assert!(matches!(session.current_user(), Err(CoreError::Storage { .. })));
    }
}
