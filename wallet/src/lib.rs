//! # wallet
//!
//! Client core for the digital wallet backend: session state, the
//! bearer-authenticated REST client, and the route guard consulted before
//! any protected view renders.
//!
//! This crate contains the session store and its token storage backends,
//! network types and the API client, and view-side helpers (guard, form
//! validation, display formatting). Views themselves live in the `cli` crate.

pub mod app;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use app::WalletApp;
pub use config::WalletConfig;
pub use net::api::ApiClient;
pub use net::error::{ApiError, ErrorKind};
pub use state::session::{AuthStatus, SessionSnapshot, SessionStore};
pub use util::guard::{GuardDecision, Route};
