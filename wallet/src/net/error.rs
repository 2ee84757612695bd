//! The single failure type returned by every API client operation.
//!
//! ERROR HANDLING
//! ==============
//! Views match on [`ErrorKind`] (or print the `Display` text) instead of each
//! inventing its own alert/log handling. Nothing here is fatal.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::state::storage::StorageError;

/// Broad failure categories a view may want to react to differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response.
    Network,
    /// The backend rejected the credential (HTTP 401).
    Unauthorized,
    /// The backend refused the request (other 4xx).
    Rejected,
    /// The backend failed (5xx or other unexpected status).
    Server,
    /// The response body did not have the expected shape.
    Decode,
    /// The client itself could not be built or the request could not be formed.
    Client,
    /// The session token could not be persisted.
    Storage,
}

/// Errors produced by API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("not authorized (status {status}); sign in again")]
    Unauthorized { status: u16 },

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parse failed: {0}")]
    Decode(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("request could not be built: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Status { status: 400..=499, .. } => ErrorKind::Rejected,
            Self::Status { .. } => ErrorKind::Server,
            Self::Decode(_) => ErrorKind::Decode,
            Self::HttpClientBuild(_) | Self::InvalidRequest(_) => ErrorKind::Client,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "E_NETWORK",
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::InvalidRequest(_) => "E_INVALID_REQUEST",
            Self::Storage(_) => "E_STORAGE",
        }
    }

    /// Whether the same request might succeed if the user simply tries again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}
