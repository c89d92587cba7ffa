//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes must apply identical redirect behavior, and nothing may
//! redirect while the session is still being restored.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use agriscan::guard::{GuardDecision, RouteGuard};
use agriscan::session::SessionState;
use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Path to navigate to for this session, if any.
pub fn redirect_target<G: RouteGuard + ?Sized>(guard: &G, state: &SessionState) -> Option<&'static str> {
    match guard.decide(state) {
        GuardDecision::Redirect(path) => Some(path),
        GuardDecision::Pending | GuardDecision::Render => None,
    }
}

/// Whether guarded children should be mounted.
pub fn should_render<G: RouteGuard + ?Sized>(guard: &G, state: &SessionState) -> bool {
    guard.decide(state) == GuardDecision::Render
}

/// Navigate away whenever `guard` rejects the current session.
pub fn install_guard_redirect<G, F>(guard: G, session: RwSignal<SessionState>, navigate: F)
where
    G: RouteGuard + 'static,
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if let Some(path) = session.with(|state| redirect_target(&guard, state)) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
