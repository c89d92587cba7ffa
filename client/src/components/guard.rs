//! Route wrappers gating pages on session state.
//!
//! Both wrappers render nothing until the session is restored, then either
//! mount their children or navigate away.

use agriscan::guard::{RequireAnonymous, RequireAuthenticated, RouteGuard};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::AppContext;
use crate::util::auth::{install_guard_redirect, should_render};

fn guarded<G>(guard: G, children: ChildrenFn) -> impl IntoView
where
    G: RouteGuard + Copy + Send + Sync + 'static,
{
    let session = expect_context::<AppContext>().session.state().signal();
    install_guard_redirect(guard, session, use_navigate());

    view! {
        <Show when=move || session.with(|state| should_render(&guard, state))>
            {children()}
        </Show>
    }
}

/// Mounts children only for a signed-in user; otherwise sends them to login.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(RequireAuthenticated, children)
}

/// Mounts children only when signed out; otherwise sends the user home.
#[component]
pub fn RequireAnon(children: ChildrenFn) -> impl IntoView {
    guarded(RequireAnonymous, children)
}
