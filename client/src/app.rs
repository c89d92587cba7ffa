//! Root application component with routing and context providers.

use agriscan::config::ApiConfig;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guard::{RequireAnon, RequireAuth};
use crate::components::navbar::Navbar;
use crate::pages::{history::HistoryPage, home::HomePage, login::LoginPage, register::RegisterPage};
use crate::state::AppContext;

/// Root application component.
///
/// Restores the persisted session before anything renders, provides the
/// shared [`AppContext`], and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = AppContext::new(ApiConfig::from_build_env());
    ctx.session.restore();
    provide_context(ctx);

    view! {
        <Title text="AgriScan"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <RequireAuth><HomePage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("history")
                        view=|| view! { <RequireAuth><HistoryPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <RequireAnon><LoginPage/></RequireAnon> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <RequireAnon><RegisterPage/></RequireAnon> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
