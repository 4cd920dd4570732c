//! Password Input Component
//!
//! Password field with a show/hide toggle. The toggle only changes the
//! input type; the value is owned by the parent form.

use leptos::prelude::*;

use crate::forms::PasswordVisibility;

#[component]
pub fn PasswordInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let (visibility, set_visibility) = signal(PasswordVisibility::default());
    let placeholder = placeholder.unwrap_or_else(|| "Password".to_string());

    view! {
        <div class="password-input">
            <input
                type=move || visibility.get().input_type()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <button
                type="button"
                class="password-toggle"
                on:click=move |_| set_visibility.update(|v| v.toggle())
            >
                {move || if visibility.get().is_visible() { "Hide" } else { "Show" }}
            </button>
        </div>
    }
}
