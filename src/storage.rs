//! Client-side persisted state: the session token and the current word.

use crate::error::Error;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "session_id";
pub const CURRENT_WORD_KEY: &str = "current_word";

/// String key/value store shared by every screen.
///
/// Writes never fail from the caller's point of view; implementations that
/// can fail log and carry on.
pub trait ClientStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Storage persisted as a flat JSON object on disk.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened client storage");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(error = %err, "failed to create storage directory");
                    return;
                }
            }
        }
        let bytes = match serde_json::to_vec_pretty(entries) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "failed to serialize client storage");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, bytes) {
            warn!(error = %err, path = %self.path.display(), "failed to write client storage");
        }
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut guard = self.entries.lock();
        guard.insert(key.to_string(), value.to_string());
        self.flush(&guard);
    }

    fn remove(&self, key: &str) {
        let mut guard = self.entries.lock();
        if guard.remove(key).is_some() {
            self.flush(&guard);
        }
    }
}

/// Opaque identifier issued at login. Only ever forwarded.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// The session state a screen is constructed with.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn ClientStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn ClientStorage> {
        &self.storage
    }

    /// The stored token; an empty value counts as absent.
    pub fn token(&self) -> Option<SessionToken> {
        self.storage
            .get(SESSION_KEY)
            .filter(|value| !value.is_empty())
            .map(SessionToken)
    }

    pub fn set_token(&self, token: &SessionToken) {
        self.storage.set(SESSION_KEY, token.as_str());
    }

    pub fn clear_token(&self) {
        self.storage.remove(SESSION_KEY);
    }

    pub fn current_word(&self) -> Option<String> {
        self.storage
            .get(CURRENT_WORD_KEY)
            .filter(|value| !value.is_empty())
    }

    pub fn set_current_word(&self, word: &str) {
        self.storage.set(CURRENT_WORD_KEY, word);
    }

    /// Forgets the token and the current word together.
    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
        self.storage.remove(CURRENT_WORD_KEY);
    }
}
