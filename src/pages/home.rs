//! Landing page.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="home">
            <h1>"This is Home Page, and there is nothing."</h1>
            <p>"Please go to Login page"</p>
            <A href="/login" attr:class="start-btn">"Start for Free"</A>
        </main>
    }
}
