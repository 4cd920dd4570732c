//! Tag Input Component
//!
//! Draft input plus the current tag chips of a note form. Enter or the
//! add button appends the draft; each chip removes its value.

use leptos::prelude::*;

#[component]
pub fn TagInput(
    #[prop(into)] tags: Signal<Vec<String>>,
    #[prop(into)] draft: Signal<String>,
    #[prop(into)] on_draft: Callback<String>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>"Tags"</label>
            <div class="tag-input-row">
                <input
                    type="text"
                    placeholder="Tags"
                    prop:value=move || draft.get()
                    on:input=move |ev| on_draft.run(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        // Enter adds a tag instead of submitting the form
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            on_add.run(());
                        }
                    }
                />
                <button type="button" class="icon-btn" on:click=move |_| on_add.run(())>"+"</button>
            </div>
            <Show when=move || !tags.get().is_empty()>
                <div class="tag-chips">
                    // Index keys: the list may hold duplicates
                    <For
                        each=move || tags.get().into_iter().enumerate()
                        key=|(index, tag)| (*index, tag.clone())
                        children=move |(_, tag)| {
                            let value = tag.clone();
                            view! {
                                <span class="tag-chip">
                                    "# " {tag}
                                    <button
                                        type="button"
                                        class="tag-remove-btn"
                                        on:click=move |_| on_remove.run(value.clone())
                                    >
                                        "×"
                                    </button>
                                </span>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
