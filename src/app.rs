//! Notes Frontend App
//!
//! Router, route table and app-wide context.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::Toaster;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::pages::{DashboardPage, HomePage, LoginPage, SignUpPage};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();

    // Provide context to all children
    provide_context(AppContext::new(&config));

    view! {
        <Router>
            <main class="app-layout">
                <Routes fallback=|| view! { <p class="not-found">"404 - Page Not Found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/sign-up") view=SignUpPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                </Routes>
            </main>
        </Router>
        <Toaster />
    }
}
