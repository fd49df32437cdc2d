//! File-backed key/value storage.
//!
//! DESIGN
//! ======
//! Plays the role browser `localStorage` plays for a single-page app: a flat
//! string-to-string map persisted as one JSON object. Every read reloads the
//! file so a token written by another process is seen by the next check.
//! Writes land in a sibling temp file first and are renamed into place.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Bind to `path`. The file need not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON object of strings.
    pub async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let mut entries = self.load().await?;
        Ok(entries.remove(key))
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing file is malformed or the write fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut entries = self.load().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries).await
    }

    /// Remove `key`. Returns whether an entry was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing file is malformed or the write fails.
    pub async fn remove(&self, key: &str) -> Result<bool, AuthError> {
        let mut entries = self.load().await?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&entries).await?;
        Ok(true)
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, AuthError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| AuthError::Storage(format!("{} is not a string map: {e}", self.path.display())))
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
