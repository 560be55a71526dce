//! Identity provider: who is using flashgen right now.
//!
//! `LocalIdentity` keeps a `session.toml` in the data directory. Signing in
//! writes it; signing out removes it. There is no password; the local user
//! name is the owner recorded on sets.

use crate::error::FlashgenError;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> Option<UserId>;

    fn sign_out(&self) -> Result<(), FlashgenError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    user_id: String,
}

/// File-backed session
pub struct LocalIdentity {
    session_path: PathBuf,
}

impl LocalIdentity {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            session_path: data_dir.join("session.toml"),
        }
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    pub fn sign_in(&self, user_id: &str) -> Result<UserId, FlashgenError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(FlashgenError::Identity("User id must not be empty".to_string()));
        }
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FlashgenError::Identity(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let contents = toml::to_string(&SessionFile {
            user_id: user_id.to_string(),
        })
        .map_err(|e| FlashgenError::Identity(format!("Failed to encode session: {}", e)))?;
        std::fs::write(&self.session_path, contents).map_err(|e| {
            FlashgenError::Identity(format!(
                "Failed to write session file {}: {}",
                self.session_path.display(),
                e
            ))
        })?;
        debug!(user = user_id, "Signed in");
        Ok(UserId::new(user_id))
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        let contents = std::fs::read_to_string(&self.session_path).ok()?;
        match toml::from_str::<SessionFile>(&contents) {
            Ok(session) if !session.user_id.trim().is_empty() => Some(UserId::new(session.user_id)),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    path = %self.session_path.display(),
                    error = %e,
                    "Ignoring unreadable session file"
                );
                None
            }
        }
    }

    fn sign_out(&self) -> Result<(), FlashgenError> {
        match std::fs::remove_file(&self.session_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FlashgenError::Identity(format!(
                "Failed to remove session file {}: {}",
                self.session_path.display(),
                e
            ))),
        }
    }
}

/// In-memory identity, for embedding and tests.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    user: Mutex<Option<UserId>>,
}

impl StaticIdentity {
    pub fn signed_in(user_id: &str) -> Self {
        Self {
            user: Mutex::new(Some(UserId::new(user_id))),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.user
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn sign_out(&self) -> Result<(), FlashgenError> {
        *self.user.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
