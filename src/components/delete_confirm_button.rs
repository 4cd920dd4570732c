//! Delete Confirm Button Component
//!
//! Inline delete confirmation with continue/cancel actions.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a delete button initially. When clicked, asks for confirmation
/// and only then runs `on_confirm`.
///
/// # Arguments
/// * `button_class` - CSS class for the initial delete button
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class=button_class.clone()
                title="Delete"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                "Delete"
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <div class="delete-confirm" role="alertdialog">
                <p class="delete-confirm-title">"Are you absolutely sure?"</p>
                <p class="delete-confirm-text">
                    "This action cannot be undone. This will permanently delete your note."
                </p>
                <div class="delete-confirm-actions">
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirm_delete.set(false);
                        }
                    >
                        "Cancel"
                    </button>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirm_delete.set(false);
                            on_confirm.run(());
                        }
                    >
                        "Continue"
                    </button>
                </div>
            </div>
        </Show>
    }
}
