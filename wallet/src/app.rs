//! Composition root.
//!
//! ARCHITECTURE
//! ============
//! `WalletApp` builds the token storage, restores the one `SessionStore`, and
//! injects that same handle into the API client and the route guard. Views
//! take a `&WalletApp` and never construct any of these themselves.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use crate::config::WalletConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::state::session::SessionStore;
use crate::state::storage::{FileStorage, TokenStorage};
use crate::util::guard::{self, GuardDecision, Route};

#[derive(Debug, Clone)]
pub struct WalletApp {
    config: WalletConfig,
    session: SessionStore,
    api: ApiClient,
}

impl WalletApp {
    /// Wire the app with file-backed token storage at `config.token_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: WalletConfig) -> Result<Self, ApiError> {
        let storage = Arc::new(FileStorage::new(config.token_path.clone()));
        Self::with_storage(config, storage)
    }

    /// Wire the app over an arbitrary storage backend. The persisted token is
    /// validated here, before any guard decision can be made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn with_storage(config: WalletConfig, storage: Arc<dyn TokenStorage>) -> Result<Self, ApiError> {
        let session = SessionStore::initialize(storage);
        let api = ApiClient::from_config(&config, session.clone())?;
        tracing::debug!(base_url = %config.base_url, status = ?session.status(), "wallet app ready");
        Ok(Self { config, session, api })
    }

    #[must_use]
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Guard decision for navigating to `route` right now.
    #[must_use]
    pub fn guard(&self, route: Route) -> GuardDecision {
        guard::guard(route, &self.session)
    }
}
