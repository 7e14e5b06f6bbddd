//! Signed-in state of the client.
//!
//! A [`Session`] is an immutable snapshot handed to screens. It only changes
//! through [`SessionStore::dispatch`], which also persists the
//! `{token, kind}` record as one unit so the two can never disagree.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use jobboard_client::{AccessToken, ClientConfig, Gateway};
use jobboard_types::{EmployerProfile, JobseekerProfile, PrincipalKind};

/// Who is signed in. The profile is absent until it has been fetched, e.g.
/// right after a reload where only the stored record is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    Jobseeker(Option<JobseekerProfile>),
    Employer(Option<EmployerProfile>),
}

impl Principal {
    pub fn unloaded(kind: PrincipalKind) -> Self {
        match kind {
            PrincipalKind::Jobseeker => Self::Jobseeker(None),
            PrincipalKind::Employer => Self::Employer(None),
        }
    }

    pub fn kind(&self) -> PrincipalKind {
        match self {
            Self::Jobseeker(_) => PrincipalKind::Jobseeker,
            Self::Employer(_) => PrincipalKind::Employer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: AccessToken,
        principal: Principal,
    },
}

/// Outcome of checking a session against a screen's requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Not signed in.
    RedirectLogin,
    /// Signed in as the wrong kind of account.
    RedirectHome,
}

impl Session {
    pub fn token(&self) -> Option<&AccessToken> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn kind(&self) -> Option<PrincipalKind> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { principal, .. } => Some(principal.kind()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn jobseeker(&self) -> Option<&JobseekerProfile> {
        match self {
            Self::Authenticated { principal: Principal::Jobseeker(Some(p)), .. } => Some(p),
            _ => None,
        }
    }

    pub fn employer(&self) -> Option<&EmployerProfile> {
        match self {
            Self::Authenticated { principal: Principal::Employer(Some(p)), .. } => Some(p),
            _ => None,
        }
    }

    pub fn authorize(&self, required: Option<PrincipalKind>) -> Access {
        match (self.kind(), required) {
            (None, _) => Access::RedirectLogin,
            (Some(_), None) => Access::Granted,
            (Some(kind), Some(required)) if kind == required => Access::Granted,
            (Some(_), Some(_)) => Access::RedirectHome,
        }
    }

    /// A gateway that authenticates as this session.
    pub fn gateway<G: Gateway>(&self, base: &G) -> G {
        base.with_token(self.token().cloned())
    }

    pub fn reduce(self, action: SessionAction) -> Session {
        match (self, action) {
            (_, SessionAction::LoggedIn { token, principal }) => {
                Session::Authenticated { token, principal }
            }
            (_, SessionAction::LoggedOut) => Session::Anonymous,
            (Session::Authenticated { token, principal: Principal::Jobseeker(_) }, SessionAction::JobseekerLoaded(p)) => {
                Session::Authenticated { token, principal: Principal::Jobseeker(Some(p)) }
            }
            (Session::Authenticated { token, principal: Principal::Employer(_) }, SessionAction::EmployerLoaded(p)) => {
                Session::Authenticated { token, principal: Principal::Employer(Some(p)) }
            }
            (session, action) => {
                warn!(?action, "session action does not apply to the current principal, ignored");
                session
            }
        }
    }

    fn stored(&self) -> Option<StoredSession> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { token, principal } => Some(StoredSession {
                token: token.clone(),
                kind: principal.kind(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    LoggedIn { token: AccessToken, principal: Principal },
    LoggedOut,
    JobseekerLoaded(JobseekerProfile),
    EmployerLoaded(EmployerProfile),
}

// -- Persistence --

/// The durable part of a session. Written and removed as a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: AccessToken,
    pub kind: PrincipalKind,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;
    fn save(&self, session: &StoredSession) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// JSON file storage. Saves go through a temp file and a rename so a crash
/// never leaves half a record behind.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the configured `session_path`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.session_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&serde_json::to_vec(session)?)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<StoredSession>>,
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Owner of the current session and the only place it is mutated.
pub struct SessionStore<S> {
    storage: S,
    current: Arc<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restore the persisted session. Unreadable records are discarded and the
    /// client starts signed out.
    pub fn open(storage: S) -> Self {
        let current = match storage.load() {
            Ok(Some(stored)) if !stored.token.is_blank() => Session::Authenticated {
                token: stored.token,
                principal: Principal::unloaded(stored.kind),
            },
            Ok(_) => Session::Anonymous,
            Err(e) => {
                warn!(error = %e, "discarding unreadable session record");
                if let Err(e) = storage.clear() {
                    warn!(error = %e, "failed to remove session record");
                }
                Session::Anonymous
            }
        };
        Self { storage, current: Arc::new(current) }
    }

    pub fn current(&self) -> Arc<Session> {
        self.current.clone()
    }

    pub fn dispatch(&mut self, action: SessionAction) -> Arc<Session> {
        let before = self.current.stored();
        let next = (*self.current).clone().reduce(action);
        let after = next.stored();

        if before != after {
            let persisted = match &after {
                Some(record) => self.storage.save(record),
                None => self.storage.clear(),
            };
            if let Err(e) = persisted {
                warn!(error = %e, "failed to persist session");
            }
            match next.kind() {
                Some(kind) => info!(%kind, "signed in"),
                None => info!("signed out"),
            }
        }

        self.current = Arc::new(next);
        self.current.clone()
    }

    pub fn logout(&mut self) -> Arc<Session> {
        self.dispatch(SessionAction::LoggedOut)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
