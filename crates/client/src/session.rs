use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::{ClientError, ClientResult};

/// Signed-in user as returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: SessionUser,
}

/// Where a session survives between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<SessionData>>;
    fn save(&self, data: &SessionData) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionData>>,
}

impl MemorySessionStore {
    pub fn with(data: SessionData) -> Self {
        Self { slot: Mutex::new(Some(data)) }
    }

    fn slot(&self) -> ClientResult<MutexGuard<'_, Option<SessionData>>> {
        self.slot.lock().map_err(|e| ClientError::Poisoned(e.to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<SessionData>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, data: &SessionData) -> ClientResult<()> {
        *self.slot()? = Some(data.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// JSON file holding the token and user.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<SessionData>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, data: &SessionData) -> ClientResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(data)?)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Authentication context shared by every call that needs a token.
pub struct Session {
    current: Option<SessionData>,
    store: Box<dyn SessionStore>,
}

impl Session {
    /// Load whatever the store remembers. An unreadable entry is discarded.
    pub fn restore(store: impl SessionStore + 'static) -> ClientResult<Self> {
        let current = match store.load() {
            Ok(found) => found,
            Err(ClientError::Serialization(e)) => {
                warn!(error = %e, "discarding unreadable session");
                store.clear()?;
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self { current, store: Box::new(store) })
    }

    pub async fn login(&mut self, api: &ApiClient, email: &str, password: &str) -> ClientResult<&SessionUser> {
        let resp = api.login(email, password).await?;
        let data = SessionData { token: resp.access_token, user: resp.user };
        self.store.save(&data)?;
        info!(user_id = %data.user.id, "session_started");
        Ok(&self.current.insert(data).user)
    }

    pub fn logout(&mut self) -> ClientResult<()> {
        self.current = None;
        self.store.clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.current.as_ref().map(|d| &d.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|d| d.token.as_str())
    }

    /// Guard for screens that need a signed-in user.
    pub fn require_auth(&self) -> ClientResult<&SessionData> {
        self.current.as_ref().ok_or(ClientError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionData {
        SessionData {
            token: "tok".into(),
            user: SessionUser { id: Uuid::new_v4(), email: "a@example.com".into(), name: "Alice".into() },
        }
    }

    #[test]
    fn empty_store_means_signed_out() {
        let session = Session::restore(MemorySessionStore::default()).unwrap();
        assert!(!session.is_authenticated());
        assert!(matches!(session.require_auth(), Err(ClientError::NotAuthenticated)));
    }

    #[test]
    fn restore_and_logout() {
        let data = sample();
        let mut session = Session::restore(MemorySessionStore::with(data.clone())).unwrap();
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.user(), Some(&data.user));
        session.logout().unwrap();
        assert!(session.token().is_none());
        assert!(session.store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("pet-registry-session-{}.json", Uuid::new_v4()));
        let store = FileSessionStore::new(&path);
        assert!(store.load().unwrap().is_none());
        let data = sample();
        store.save(&data).unwrap();
        assert_eq!(store.load().unwrap(), Some(data));
        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let path = std::env::temp_dir().join(format!("pet-registry-session-{}.json", Uuid::new_v4()));
        std::fs::write(&path, "{oops").unwrap();
        let session = Session::restore(FileSessionStore::new(&path)).unwrap();
        assert!(!session.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn poisoned_memory_store_reports_an_error() {
        let store = std::sync::Arc::new(MemorySessionStore::with(sample()));
        let held = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = held.slot.lock().unwrap();
            panic!("writer crashed");
        })
        .join();
        assert!(matches!(store.load(), Err(ClientError::Poisoned(_))));
        assert!(matches!(store.save(&sample()), Err(ClientError::Poisoned(_))));
        assert!(matches!(store.clear(), Err(ClientError::Poisoned(_))));
    }
}
