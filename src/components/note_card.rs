//! Note Card Component
//!
//! Title, date, content preview, tag chips, pin toggle and edit/delete
//! triggers. Owns no network state; actions go to the parent.

use chrono::Utc;
use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::config::PREVIEW_CHARS;
use crate::format::{note_date, preview};
use crate::models::Note;

#[component]
pub fn NoteCard(
    note: Note,
    #[prop(into)] on_pin: Callback<u32>,
    #[prop(into)] on_edit: Callback<Note>,
    #[prop(into)] on_delete: Callback<u32>,
) -> impl IntoView {
    let id = note.id;
    let date = note_date(&note, Utc::now());
    let content = preview(&note.content, PREVIEW_CHARS).to_string();
    let pin_class = if note.is_pinned { "pin-btn pinned" } else { "pin-btn" };
    let tags = note.tags.clone();
    let title = note.title.clone();

    view! {
        <div class="note-card">
            <div class="note-card-header">
                <div>
                    <h6 class="note-title">{title}</h6>
                    <span class="note-date">{date}</span>
                </div>
                <button class=pin_class title="Pin" on:click=move |_| on_pin.run(id)>"Pin"</button>
            </div>
            <p class="note-content">{content}</p>
            <div class="note-card-footer">
                <div class="note-tags">
                    {tags.into_iter().map(|tag| view! { <span class="tag-chip">"# " {tag}</span> }).collect_view()}
                </div>
                <div class="note-actions">
                    <button class="edit-btn" title="Edit" on:click=move |_| on_edit.run(note.clone())>"Edit"</button>
                    <DeleteConfirmButton
                        button_class="delete-btn"
                        on_confirm=Callback::new(move |_: ()| on_delete.run(id))
                    />
                </div>
            </div>
        </div>
    }
}
