//! Route guard consulted before any protected view renders.
//!
//! DESIGN
//! ======
//! The decision is a pure function of the route and the session status. The
//! caller performs the navigation; nothing here redirects by itself.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::fmt;

use crate::state::session::{AuthStatus, SessionStore};

/// Every navigable view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Transfer,
    Deposit,
    Transactions,
}

impl Route {
    pub const ALL: [Self; 6] =
        [Self::Login, Self::Register, Self::Dashboard, Self::Transfer, Self::Deposit, Self::Transactions];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/",
            Self::Transfer => "/transfer",
            Self::Deposit => "/deposit",
            Self::Transactions => "/transactions",
        }
    }

    /// Resolve a path to its route. Unknown paths resolve to `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 { trimmed.trim_end_matches('/') } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Whether the view needs an authenticated session.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

/// What the caller should do with a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Decide whether `route` may render given the session status.
#[must_use]
pub fn decide(route: Route, status: AuthStatus) -> GuardDecision {
    if route.is_protected() && status == AuthStatus::Unauthenticated {
        GuardDecision::Redirect(Route::Login)
    } else {
        GuardDecision::Allow
    }
}

/// [`decide`] against the session's current status.
#[must_use]
pub fn guard(route: Route, session: &SessionStore) -> GuardDecision {
    decide(route, session.status())
}
