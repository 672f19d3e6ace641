//! The session: the only shared mutable state in the console.
//!
//! A [`Session`] holds the bearer credential and the identity resolved for
//! it. It is created once, handed to everything that talks to the API, and
//! torn down on logout or when the server rejects the credential.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use mailpanel_auth::Identity;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Opaque bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the credential lives between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<Credential>, SessionError>;
    fn save(&self, credential: &Credential) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Credential>, SessionError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: Credential,
}

/// JSON file holding `{"token": "..."}`; owner-readable only on unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Credential>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let stored: StoredSession =
            serde_json::from_str(&raw).map_err(|source| SessionError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(stored.token))
    }

    fn save(&self, credential: &Credential) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_vec(&StoredSession {
            token: credential.clone(),
        })
        .map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|e| self.io_err(e))?;
        restrict_permissions(&self.path).map_err(|e| self.io_err(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator signed out.
    Logout,
    /// The server answered 401.
    Expired,
    /// `/me` failed or returned something unclassifiable.
    ResolutionFailed,
}

#[derive(Default)]
struct SessionState {
    credential: Option<Credential>,
    identity: Option<Identity>,
    generation: u64,
}

/// Shared handle to the session; clones observe the same state.
#[derive(Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Session")
            .field("authenticated", &state.credential.is_some())
            .field("identity", &state.identity.as_ref().map(Identity::role))
            .field("generation", &state.generation)
            .finish()
    }
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Pick up a credential persisted by an earlier run.
    ///
    /// A corrupt store is cleared and treated as signed out.
    pub fn restore(&self) -> Result<bool, SessionError> {
        let loaded = match self.store.load() {
            Ok(loaded) => loaded,
            Err(SessionError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "discarding corrupt session file");
                self.store.clear()?;
                None
            }
            Err(e) => return Err(e),
        };
        let found = loaded.is_some();
        let mut state = self.write();
        state.credential = loaded;
        state.identity = None;
        state.generation += 1;
        Ok(found)
    }

    /// Hold `credential` as the current one and persist it.
    ///
    /// Any identity resolved for a previous credential is dropped.
    pub fn store_credential(&self, credential: Credential) -> Result<(), SessionError> {
        let mut state = self.write();
        state.credential = Some(credential.clone());
        state.identity = None;
        state.generation += 1;
        // Persisted under the guard so a concurrent teardown cannot clear it.
        self.store.save(&credential)
    }

    pub fn credential(&self) -> Option<Credential> {
        self.read().credential.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().credential.is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read().identity.clone()
    }

    /// Bumped on every credential change; lets callers notice a session
    /// that ended while their request was in flight.
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Attach the identity resolved for `credential`.
    ///
    /// Returns `false` (and changes nothing) if the session moved on to a
    /// different credential meanwhile.
    pub fn establish(&self, credential: &Credential, identity: Identity) -> bool {
        let mut state = self.write();
        if state.credential.as_ref() != Some(credential) {
            debug!("identity resolved for a credential that is no longer current");
            return false;
        }
        state.identity = Some(identity);
        true
    }

    /// 401 path: drop `used` if it is still the current credential.
    ///
    /// A late 401 for a credential already replaced by a fresh login leaves
    /// the new session alone.
    pub fn expire(&self, used: &Credential) -> bool {
        self.end_if_current(used, SessionEnd::Expired)
    }

    /// Tear the session down only while `credential` is still the one held.
    ///
    /// The comparison and the teardown happen under one write guard.
    pub fn end_if_current(&self, credential: &Credential, reason: SessionEnd) -> bool {
        let mut state = self.write();
        if state.credential.as_ref() != Some(credential) {
            debug!(?reason, "credential already replaced; session left alone");
            return false;
        }
        self.teardown(&mut state, reason)
    }

    /// Tear the session down. Idempotent; returns whether anything was held.
    pub fn end(&self, reason: SessionEnd) -> bool {
        let mut state = self.write();
        self.teardown(&mut state, reason)
    }

    fn teardown(&self, state: &mut SessionState, reason: SessionEnd) -> bool {
        let had_credential = state.credential.take().is_some();
        state.identity = None;
        if had_credential {
            state.generation += 1;
            info!(?reason, "session ended");
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored credential");
        }
        had_credential
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
