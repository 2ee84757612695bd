use std::sync::Arc;

use super::*;
use crate::net::token::test_helpers::token_expiring_at_ms;
use crate::state::storage::MemoryStorage;

const NOW_MS: i64 = 1_700_000_000_000;

#[test]
fn public_routes_always_allow() {
    for status in [AuthStatus::Authenticated, AuthStatus::Unauthenticated] {
        assert_eq!(decide(Route::Login, status), GuardDecision::Allow);
        assert_eq!(decide(Route::Register, status), GuardDecision::Allow);
    }
}

#[test]
fn protected_routes_follow_session_status() {
    for route in Route::ALL.into_iter().filter(|r| r.is_protected()) {
        assert_eq!(decide(route, AuthStatus::Authenticated), GuardDecision::Allow);
        assert_eq!(decide(route, AuthStatus::Unauthenticated), GuardDecision::Redirect(Route::Login));
    }
}

#[test]
fn expired_token_redirects_dashboard_to_login() {
    let storage = Arc::new(MemoryStorage::with_token(token_expiring_at_ms(NOW_MS - 1000)));
    let session = SessionStore::initialize_at(storage, NOW_MS);
    assert_eq!(guard(Route::Dashboard, &session), GuardDecision::Redirect(Route::Login));
}

#[test]
fn live_token_allows_dashboard() {
    let storage = Arc::new(MemoryStorage::with_token(token_expiring_at_ms(NOW_MS + 3_600_000)));
    let session = SessionStore::initialize_at(storage, NOW_MS);
    assert!(guard(Route::Dashboard, &session).is_allowed());
}

#[test]
fn logout_flips_decision() {
    let session = SessionStore::initialize_at(Arc::new(MemoryStorage::new()), NOW_MS);
    session.set_token("abc.def.ghi").unwrap();
    assert!(guard(Route::Transfer, &session).is_allowed());
    session.logout();
    assert_eq!(guard(Route::Transfer, &session), GuardDecision::Redirect(Route::Login));
}

#[test]
fn from_path_resolves_known_routes() {
    assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
    assert_eq!(Route::from_path("/transfer/"), Some(Route::Transfer));
    assert_eq!(Route::from_path(" /login "), Some(Route::Login));
    assert_eq!(Route::from_path("/admin"), None);
    assert_eq!(Route::from_path(""), None);
}

#[test]
fn paths_round_trip() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), Some(route));
        assert_eq!(route.to_string(), route.path());
    }
}
