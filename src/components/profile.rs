//! Profile Component
//!
//! Initials badge, user name and logout trigger.

use leptos::prelude::*;

use crate::format::initials;
use crate::models::User;

#[component]
pub fn Profile(user: User, #[prop(into)] on_logout: Callback<()>) -> impl IntoView {
    view! {
        <div class="profile">
            <div class="profile-initials">{initials(&user.name)}</div>
            <p class="profile-name">{user.name.clone()}</p>
            <button class="logout-btn" on:click=move |_| on_logout.run(())>"Logout"</button>
        </div>
    }
}
