use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Role;

/// The client's record of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub auth_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub role: Option<Role>,
    pub profile_id: Option<i64>,
}

/// Outcome of a protected-route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    LoginRequired,
    WrongRole { required: Role, actual: Option<Role> },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.auth_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn authorize(&self, required: Option<Role>) -> Access {
        if !self.is_authenticated() {
            return Access::LoginRequired;
        }
        match required {
            Some(role) if self.role != Some(role) => Access::WrongRole {
                required: role,
                actual: self.role,
            },
            _ => Access::Granted,
        }
    }
}

/// Persisted authentication state. Implementations trust their callers.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Session;
    fn set(&self, session: Session);
    fn clear(&self);
}

/// Process-local store, used by tests and one-shot tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: Session) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn clear(&self) {
        self.set(Session::default());
    }
}

/// JSON file store so a new process picks up the previous login.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Session {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Session::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unable to read session file");
                return Session::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "ignoring corrupt session file");
            Session::default()
        })
    }

    fn write(&self, session: &Session) {
        let result = serde_json::to_vec_pretty(session)
            .map_err(std::io::Error::other)
            .and_then(|bytes| {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&self.path, bytes)
            });
        match result {
            Ok(()) => debug!(path = %self.path.display(), "session persisted"),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unable to persist session")
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Session {
        let _lock = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.read()
    }

    fn set(&self, session: Session) {
        let _lock = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.write(&session);
    }

    fn clear(&self) {
        let _lock = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "session cleared"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unable to remove session file");
                self.write(&Session::default());
            }
        }
    }
}
