//! Route gating derived from the session.
//!
//! Guards hold no state of their own. Each one maps a [`SessionState`]
//! snapshot to a [`GuardDecision`]; the frontend decides how to render it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::session::{SessionState, SessionStatus};

/// Where signed-out users are sent.
pub const LOGIN_ROUTE: &str = "/login";
/// Where signed-in users land.
pub const DEFAULT_ROUTE: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore has not finished. Render nothing at all.
    Pending,
    Render,
    Redirect(&'static str),
}

pub trait RouteGuard {
    fn decide(&self, session: &SessionState) -> GuardDecision;
}

/// Renders only for an authenticated session.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireAuthenticated;

impl RouteGuard for RequireAuthenticated {
    fn decide(&self, session: &SessionState) -> GuardDecision {
        if session.loading {
            GuardDecision::Pending
        } else if session.is_authenticated() {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(LOGIN_ROUTE)
        }
    }
}

/// Renders only for a signed-out session (login and register pages).
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireAnonymous;

impl RouteGuard for RequireAnonymous {
    fn decide(&self, session: &SessionState) -> GuardDecision {
        if session.loading {
            return GuardDecision::Pending;
        }
        // A login in flight keeps its form mounted.
        match session.status() {
            SessionStatus::Anonymous | SessionStatus::Authenticating => GuardDecision::Render,
            SessionStatus::Authenticated => GuardDecision::Redirect(DEFAULT_ROUTE),
        }
    }
}
