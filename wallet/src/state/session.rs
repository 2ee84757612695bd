//! Session store: the single source of truth for "is this client
//! authenticated, and as whom".
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is built at startup by the composition root and handed
//! to the API client (which reads the token and invalidates on 401) and to the
//! route guard (which reads the status). Clones share the same state.
//!
//! LIFECYCLE
//! =========
//! The persisted token is validated exactly once, inside [`SessionStore::initialize`],
//! before anyone can ask for a guard decision. There is no background expiry
//! timer; a token that lapses mid-session is caught by the backend's 401.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use super::storage::{StorageError, TokenStorage};
use crate::net::token;
use crate::net::types::User;

/// Coarse session state consulted by the route guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Authenticated,
}

/// Point-in-time copy of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    /// Cached profile. Only trustworthy while `token` is present.
    pub user: Option<User>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        if self.token.is_some() { AuthStatus::Authenticated } else { AuthStatus::Unauthenticated }
    }
}

/// Shared handle to the session and its token storage.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionSnapshot>>,
    storage: Arc<dyn TokenStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restore the session from `storage`, validating the persisted token
    /// against the current wall clock.
    #[must_use]
    pub fn initialize(storage: Arc<dyn TokenStorage>) -> Self {
        Self::initialize_at(storage, now_ms())
    }

    /// Restore the session from `storage` as of `now_ms` (milliseconds since
    /// the Unix epoch).
    ///
    /// Expired or undecodable tokens are removed from storage and the session
    /// starts unauthenticated.
    #[must_use]
    pub fn initialize_at(storage: Arc<dyn TokenStorage>, now_ms: i64) -> Self {
        let token = restore_token(storage.as_ref(), now_ms);
        Self { state: Arc::new(RwLock::new(SessionSnapshot { token, user: None })), storage }
    }

    /// Persist `token` and mark the session authenticated. Expiry is not
    /// checked here; the token is fresh from the backend.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the token cannot be persisted, in which
    /// case the in-memory session is left unchanged.
    pub fn set_token(&self, token: impl Into<String>) -> Result<(), StorageError> {
        let token = token.into();
        self.storage.store(&token)?;
        self.write().token = Some(token);
        tracing::info!("session token stored");
        Ok(())
    }

    /// Replace the cached profile snapshot.
    ///
    /// Accepted regardless of token state; callers are expected to have just
    /// fetched the profile with a valid token.
    pub fn set_user(&self, user: User) {
        let mut state = self.write();
        if state.token.is_none() {
            tracing::debug!(user_id = %user.id, "profile cached without a session token");
        }
        state.user = Some(user);
    }

    /// Forget the token and profile, in memory and in storage. Idempotent.
    pub fn logout(&self) {
        *self.write() = SessionSnapshot::default();
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear persisted token");
        }
        tracing::info!("session cleared");
    }

    /// End the session because the backend rejected its credential.
    ///
    /// No-op when already unauthenticated.
    pub fn invalidate(&self, reason: &str) {
        if !self.is_authenticated() {
            return;
        }
        tracing::warn!(%reason, "session invalidated by backend");
        self.logout();
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.read().status()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Load the persisted token, discarding it if it is expired or malformed.
fn restore_token(storage: &dyn TokenStorage, now_ms: i64) -> Option<String> {
    let token = match storage.load() {
        Ok(Some(token)) => token,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted token");
            return None;
        }
    };

    let discard_reason = match token::decode_claims(&token) {
        Ok(claims) if claims.expired_at(now_ms) => "expired".to_owned(),
        Ok(_) => {
            tracing::debug!("session restored from persisted token");
            return Some(token);
        }
        Err(e) => e.to_string(),
    };

    tracing::debug!(reason = %discard_reason, "discarding persisted token");
    if let Err(e) = storage.clear() {
        tracing::warn!(error = %e, "failed to clear persisted token");
    }
    None
}

fn now_ms() -> i64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}
