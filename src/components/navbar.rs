//! Navbar Component
//!
//! Brand link plus, on the dashboard route only, the search bar and profile.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::components::{Profile, SearchBar};
use crate::models::User;
use crate::store::{store_apply_search, store_clear_search, DashboardStateStoreFields, DashboardStore};

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Brand target: the dashboard once a user is known, the landing page otherwise
pub fn brand_href(user: Option<&User>) -> &'static str {
    if user.is_some() { DASHBOARD_PATH } else { "/" }
}

#[component]
pub fn Navbar(
    #[prop(optional, into)] user: Option<Signal<Option<User>>>,
    #[prop(optional, into)] on_logout: Option<Callback<()>>,
) -> impl IntoView {
    let location = use_location();
    let store = use_context::<DashboardStore>();
    let on_dashboard = move || location.pathname.get() == DASHBOARD_PATH;
    let current_user = move || user.and_then(|user| user.get());

    let dashboard_tools = move || {
        let (store, on_logout) = (store?, on_logout?);
        if !on_dashboard() {
            return None;
        }
        let user = current_user()?;
        Some(view! {
            <SearchBar
                value=Signal::derive(move || store.search_input().get())
                on_change=Callback::new(move |value: String| store.search_input().set(value))
                on_search=Callback::new(move |_: ()| store_apply_search(&store))
                on_clear=Callback::new(move |_: ()| store_clear_search(&store))
            />
            <Profile user=user on_logout=on_logout />
        })
    };

    view! {
        <nav class="navbar">
            <A href=move || brand_href(current_user().as_ref()).to_string() attr:class="navbar-brand">
                <img src="/logo.svg" alt="logo" width="30" height="30" />
                <h2>"Notes"</h2>
            </A>
            {dashboard_tools}
        </nav>
    }
}
