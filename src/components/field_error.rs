//! Field-level validation message.

use leptos::prelude::*;

#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || message.get().map(|message| view! { <p class="field-error">{message}</p> })
}
