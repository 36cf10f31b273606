//! Persisted session record.
//!
//! A single JSON file holds the signed-in user. It is read once at startup,
//! written on login and removed on logout.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

use crate::api::User;

/// Session file error.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// File-backed store for the signed-in user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by `path`. Nothing is touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored user. A missing file means nobody is signed in.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<User>, StoreError> {
        if !self.path.exists() {
            debug!("No stored session");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::new(format!("Failed to read saved session: {}", e)))?;
        let user: User = serde_json::from_str(&content)
            .map_err(|e| StoreError::new(format!("Saved session is corrupt: {}", e)))?;
        info!(username = %user.username(), "Restored stored session");
        Ok(Some(user))
    }

    /// Writes `user`, replacing any previous record.
    #[instrument(skip(self, user), fields(path = %self.path.display(), username = %user.username()))]
    pub fn save(&self, user: &User) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::new(format!("Failed to create session directory: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(user)
            .map_err(|e| StoreError::new(format!("Failed to encode session: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::new(format!("Failed to save session: {}", e)))?;
        debug!("Session saved");
        Ok(())
    }

    /// Removes the record. Removing an absent record is not an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(format!("Failed to clear session: {}", e))),
        }
    }
}
