//! Authentication — the explicit login session and where it is kept.
//!
//! ## Session model
//!
//! A [`Session`] is either an admin session (holding the opaque bearer token
//! issued by `POST /auth/login`) or a salon session (holding the salon record
//! returned by `POST /salons/login`). The client keeps the active session in
//! memory and injects the admin token into every request.
//!
//! Persistence is the caller's choice: pass any [`SessionStore`] to
//! `client.auth().persist(..)` / `client.auth().restore(..)`. Nothing is
//! written anywhere implicitly.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::salon::Salon;
use crate::error::SdkError;
use crate::shared::SalonId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ============================================================================
// Session
// ============================================================================

/// Who is logged in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
    Admin { token: String },
    Salon { salon: Salon },
}

impl Session {
    /// Bearer token for authenticated requests. Salon sessions carry none.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Admin { token } => Some(token),
            Session::Salon { .. } => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin { .. })
    }

    pub fn salon(&self) -> Option<&Salon> {
        match self {
            Session::Admin { .. } => None,
            Session::Salon { salon } => Some(salon),
        }
    }

    pub fn salon_id(&self) -> Option<&SalonId> {
        self.salon().map(|s| &s.id)
    }
}

// Token stays out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Admin { .. } => f.debug_struct("Admin").field("token", &"<redacted>").finish(),
            Session::Salon { salon } => f.debug_struct("Salon").field("salon", &salon.id).finish(),
        }
    }
}

// ============================================================================
// Session stores
// ============================================================================

/// Somewhere a session survives between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SdkError>;
    fn save(&self, session: &Session) -> Result<(), SdkError>;
    fn clear(&self) -> Result<(), SdkError>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, SdkError> {
        self.slot
            .lock()
            .map_err(|_| SdkError::Other("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SdkError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &Session) -> Result<(), SdkError> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        *self.slot()? = None;
        Ok(())
    }
}

/// JSON file store. A missing file means no session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SdkError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, session: &Session) -> Result<(), SdkError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        // Write-then-rename so a crash never leaves a half-written session.
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Body for `POST /auth/login` and `POST /salons/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordBody {
    pub password: String,
}
