//! Persisted login session for the CLI.
//!
//! The portal keeps its token in browser storage; the CLI keeps the same
//! token in a small JSON file so consecutive commands share one login.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    /// Which portal issued the token (`admin` or `client`).
    #[serde(default)]
    pub portal: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. A missing file is an empty session.
    pub fn load(&self) -> Result<Session, CliError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Session::default()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), CliError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw).map_err(|e| self.io_error(e))
    }

    /// Remove the stored session. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool, CliError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Token to send: an explicit one wins over the stored session.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Result<Option<String>, CliError> {
        if let Some(token) = explicit.filter(|t| !t.is_empty()) {
            return Ok(Some(token.to_owned()));
        }
        Ok(self.load()?.token.filter(|t| !t.is_empty()))
    }

    fn io_error(&self, source: std::io::Error) -> CliError {
        CliError::Session { path: self.path.display().to_string(), source }
    }
}
