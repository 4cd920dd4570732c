//! Search Bar Component
//!
//! Controlled text input with clear and search affordances.

use leptos::prelude::*;

#[component]
pub fn SearchBar(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] on_search: Callback<()>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="search-bar">
            <input
                type="text"
                placeholder="Search Notes"
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        on_search.run(());
                    }
                }
            />
            <Show when=move || !value.get().is_empty()>
                <button class="search-clear-btn" title="Clear" on:click=move |_| on_clear.run(())>"×"</button>
            </Show>
            <button class="search-btn" title="Search" on:click=move |_| on_search.run(())>"Search"</button>
        </div>
    }
}
