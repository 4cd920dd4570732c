//! Note Form Dialog
//!
//! Create/update dialog for a note. Validation runs before any request;
//! a valid submit issues exactly one create or update mutation.

use futures::future::Either;
use leptos::prelude::*;

use crate::components::{FieldError, TagInput};
use crate::context::use_app_context;
use crate::forms::FormController;
use crate::hooks::run_mutation;
use crate::queries::{CREATE_NOTE, UPDATE_NOTE};
use crate::validation::{date_input_value, parse_date_input, NoteValues};

#[component]
pub fn NoteFormDialog(
    /// `Some(id)` edits that note, `None` creates a new one
    note_id: Option<u32>,
    initial: NoteValues,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(match note_id {
        Some(_) => FormController::edit(initial),
        None => FormController::create(initial),
    });
    let (heading, submit_label) = match note_id {
        Some(_) => ("Update Note", "Update"),
        None => ("Add Note", "Add"),
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(payload) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };
        let api = ctx.api();
        let (config, call) = match note_id {
            Some(id) => (UPDATE_NOTE, Either::Left(async move { api.update_note(id, &payload).await })),
            None => (CREATE_NOTE, Either::Right(async move { api.create_note(&payload).await })),
        };
        run_mutation(ctx, config, call, move |result| finish_note_submit(form, on_close, result.is_ok()));
    };

    let error = move |field: &'static str| Signal::derive(move || form.with(|f| f.error(field).map(str::to_string)));

    view! {
        <div class="dialog-overlay" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <div class="dialog-header">
                    <h3>{heading}</h3>
                    <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <form class="note-form" on:submit=on_submit>
                    <div class="form-field">
                        <label>"Title"</label>
                        <input
                            type="text"
                            placeholder="Title"
                            prop:value=move || form.with(|f| f.values().title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.update(|v| v.title = value));
                            }
                        />
                        <FieldError message=error("title") />
                    </div>
                    <div class="form-field">
                        <label>"Content"</label>
                        <textarea
                            rows="10"
                            placeholder="Content"
                            prop:value=move || form.with(|f| f.values().content.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.update(|v| v.content = value));
                            }
                        ></textarea>
                        <FieldError message=error("content") />
                    </div>
                    <div class="form-field">
                        <label>"Date"</label>
                        <input
                            type="date"
                            prop:value=move || form.with(|f| date_input_value(f.values().date))
                            on:input=move |ev| {
                                let date = parse_date_input(&event_target_value(&ev));
                                form.update(|f| f.update(|v| v.date = date));
                            }
                        />
                        <FieldError message=error("date") />
                    </div>
                    <TagInput
                        tags=Signal::derive(move || form.with(|f| f.values().tags.to_vec()))
                        draft=Signal::derive(move || form.with(|f| f.values().tags.draft().to_string()))
                        on_draft=Callback::new(move |draft: String| form.update(|f| f.update(|v| v.tags.set_draft(draft))))
                        on_add=Callback::new(move |_: ()| form.update(|f| f.update(|v| {
                            v.tags.commit_draft();
                        })))
                        on_remove=Callback::new(move |tag: String| form.update(|f| f.update(|v| v.tags.remove(&tag))))
                    />
                    <button type="submit" class="submit-btn" disabled=move || form.with(|f| f.is_pending())>
                        {move || if form.with(|f| f.is_pending()) { "Saving..." } else { submit_label }}
                    </button>
                </form>
            </div>
        </div>
    }
}

/// Runs after the request settles; the dialog may already be closed and its
/// owner disposed by then.
fn finish_note_submit(form: RwSignal<FormController<NoteValues>>, on_close: Callback<()>, succeeded: bool) {
    form.try_update(|f| f.finish_submit(succeeded));
    if succeeded {
        on_close.try_run(());
    }
}
