//! Locally persisted session (bearer token, display name, email)
//!
//! The session is re-read on every access so a token refreshed by another
//! process is picked up by the next request.

use paydesk_config::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Session store reference type
pub type SessionRef = Arc<dyn SessionStore>;

/// Stored session values, each optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    /// Bearer token, ignoring empty values
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Source of the current session
pub trait SessionStore: Send + Sync {
    /// Read the session as it is right now
    fn load(&self) -> Session;
}

/// Session stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Session {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("No session at {}: {}", self.path.display(), e);
                return Session::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
            Session::default()
        })
    }
}

/// Session held in memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self { session: RwLock::new(session) }
    }

    /// Replace the stored session
    pub fn set(&self, session: Session) {
        if let Ok(mut guard) = self.session.write() {
            *guard = session;
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Session {
        self.session.read().map(|s| s.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_session() {
        let store = FileSessionStore::new("/nonexistent/paydesk/session.json");
        assert_eq!(store.load(), Session::default());
    }

    #[test]
    fn test_file_is_reread_on_every_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        std::fs::write(&path, r#"{"token": "t1", "name": "Ana"}"#).unwrap();
        assert_eq!(store.load().bearer_token(), Some("t1"));

        std::fs::write(&path, r#"{"token": "t2"}"#).unwrap();
        let session = store.load();
        assert_eq!(session.bearer_token(), Some("t2"));
        assert_eq!(session.name, None);
    }

    #[test]
    fn test_corrupt_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(FileSessionStore::new(&path).load(), Session::default());
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let session = Session { token: Some(String::new()), ..Default::default() };
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn test_memory_store_set() {
        let store = MemorySessionStore::default();
        store.set(Session { token: Some("abc".to_string()), ..Default::default() });
        assert_eq!(store.load().bearer_token(), Some("abc"));
    }
}
