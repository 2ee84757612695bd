//! Durable token storage backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists exactly one value, the raw bearer token, under
//! [`TOKEN_KEY`]. Backends differ only in where that value lives: a file for
//! the CLI, memory for tests and embedding, `localStorage` in the browser.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Errors produced by token storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("token storage io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("token storage unavailable: {0}")]
    Unavailable(String),
}

/// A single-key store for the bearer token.
pub trait TokenStorage: Send + Sync {
    /// Read the persisted token, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn store(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the persisted token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `token`, as if a previous run had persisted it.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let token = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(token.clone())
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        let mut slot = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Stores the token as the entire contents of one file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File named [`TOKEN_KEY`] inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(TOKEN_KEY))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() { Ok(None) } else { Ok(Some(token.to_owned())) }
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        std::fs::write(&self.path, token).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage` under [`TOKEN_KEY`]. The storage object is looked up
/// on every call so the handle itself stays `Send + Sync`.
#[cfg(feature = "web")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(feature = "web")]
impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

#[cfg(feature = "web")]
impl TokenStorage for BrowserStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Self::local_storage()?
            .get_item(TOKEN_KEY)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn clear(&self) -> Result<(), StorageError> {
        Self::local_storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
