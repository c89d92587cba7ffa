//! Top navigation bar.

use agriscan::session::SessionState;
use leptos::prelude::*;

use crate::state::AppContext;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session = ctx.session.state().signal();
    let user_name = move || session.with(|s| s.user().map(|u| u.name.clone()).unwrap_or_default());

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">"AgriScan"</a>
            <Show
                when=move || session.with(SessionState::is_authenticated)
                fallback=|| {
                    view! {
                        <div class="navbar__links">
                            <a href="/login" class="navbar__link">"Login"</a>
                            <a href="/register" class="navbar__cta">"Get Started"</a>
                        </div>
                    }
                }
            >
                <div class="navbar__links">
                    <a href="/" class="navbar__link">"Predict"</a>
                    <a href="/history" class="navbar__link">"History"</a>
                    <span class="navbar__user">{user_name}</span>
                    <button class="navbar__logout" on:click=move |_| ctx.logout()>
                        "Logout"
                    </button>
                </div>
            </Show>
        </nav>
    }
}
