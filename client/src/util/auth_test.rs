use agriscan::guard::{DEFAULT_ROUTE, LOGIN_ROUTE, RequireAnonymous, RequireAuthenticated};
use agriscan::types::User;

use super::*;

fn ana() -> User {
    User { id: None, name: "Ana".to_owned(), email: None }
}

#[test]
fn no_redirect_while_restoring() {
    let state = SessionState::default();
    assert_eq!(redirect_target(&RequireAuthenticated, &state), None);
    assert_eq!(redirect_target(&RequireAnonymous, &state), None);
    assert!(!should_render(&RequireAuthenticated, &state));
    assert!(!should_render(&RequireAnonymous, &state));
}

#[test]
fn signed_out_user_is_sent_to_login() {
    let state = SessionState::anonymous();
    assert_eq!(redirect_target(&RequireAuthenticated, &state), Some(LOGIN_ROUTE));
    assert!(should_render(&RequireAnonymous, &state));
}

#[test]
fn signed_in_user_is_sent_home_from_public_pages() {
    let state = SessionState::signed_in(ana(), "tok1");
    assert_eq!(redirect_target(&RequireAnonymous, &state), Some(DEFAULT_ROUTE));
    assert!(should_render(&RequireAuthenticated, &state));
}
