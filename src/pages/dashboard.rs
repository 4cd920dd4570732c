//! Dashboard Page
//!
//! Session guard, navbar and the note board. Requires a stored token;
//! a failed `/me` check sends the user to `/login` once.

use chrono::Utc;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use reactive_stores::Store;

use crate::components::{Navbar, NoteCard, NoteFormDialog, Spinner};
use crate::context::use_app_context;
use crate::error::ApiError;
use crate::format::filter_notes;
use crate::hooks::{run_mutation, use_query};
use crate::models::Note;
use crate::queries::{
    fetch_notes, fetch_user_info, session_check, QueryKey, RedirectGuard, SessionCheck, DELETE_NOTE, PIN_NOTE,
};
use crate::store::{use_dashboard_store, DashboardState, DashboardStateStoreFields};
use crate::validation::NoteValues;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    // No token: skip the /me round-trip entirely
    if !ctx.session().is_authenticated() {
        log::info!("[session] no token, redirecting to /login");
        return view! { <Redirect path="/login" /> }.into_any();
    }
    view! { <DashboardLayout /> }.into_any()
}

#[component]
fn DashboardLayout() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    provide_context(Store::new(DashboardState::default()));

    let user = use_query(QueryKey::UserInfo, fetch_user_info);
    let check = Memo::new(move |_| user.with(|user| session_check(ctx.session().is_authenticated(), user)));
    let guard = StoredValue::new(RedirectGuard::default());

    let redirect = navigate.clone();
    Effect::new(move |_| {
        let check = check.get();
        if !guard.try_update_value(|guard| guard.observe(check)).unwrap_or(false) {
            return;
        }
        let rejected = user.with_untracked(|user| user.error.as_ref().is_some_and(ApiError::is_auth_failure));
        if rejected {
            ctx.sign_out();
        }
        log::warn!("[session] session check failed, redirecting to /login");
        redirect("/login", Default::default());
    });

    let logout = Callback::new(move |_: ()| {
        ctx.sign_out();
        navigate("/login", Default::default());
    });

    view! {
        <div class="dashboard">
            {move || match check.get() {
                SessionCheck::Authenticated => view! {
                    <Navbar user=Signal::derive(move || user.with(|user| user.data.clone())) on_logout=logout />
                    <NotesBoard />
                }
                .into_any(),
                SessionCheck::Checking | SessionCheck::Unauthenticated => view! { <Spinner /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn NotesBoard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let notes = use_query(QueryKey::Notes, fetch_notes);

    let visible = Signal::derive(move || {
        notes.with(|notes| {
            let all = notes.data.as_deref()?;
            Some(store.search_query().with(|query| filter_notes(all, query)))
        })
    });
    let load_error = Signal::derive(move || notes.with(|notes| notes.error.clone().filter(|_| notes.data.is_none())));

    let on_pin = Callback::new(move |id: u32| {
        let api = ctx.api();
        run_mutation(ctx, PIN_NOTE, async move { api.toggle_pin(id).await }, |_| {});
    });
    let on_delete = Callback::new(move |id: u32| {
        let api = ctx.api();
        run_mutation(ctx, DELETE_NOTE, async move { api.delete_note(id).await }, |_| {});
    });
    let on_edit = Callback::new(move |note: Note| store.editing().set(Some(note)));

    view! {
        <div class="container">
            {move || match (visible.get(), load_error.get()) {
                (Some(list), _) if list.is_empty() => view! { <div class="empty-notes">"Not found Notes"</div> }.into_any(),
                (Some(list), _) => view! {
                    <div class="notes-grid">
                        {list
                            .into_iter()
                            .map(|note| view! { <NoteCard note=note on_pin=on_pin on_edit=on_edit on_delete=on_delete /> })
                            .collect_view()}
                    </div>
                }
                .into_any(),
                (None, Some(err)) => view! { <div class="load-error">{err.to_string()}</div> }.into_any(),
                (None, None) => view! { <Spinner /> }.into_any(),
            }}

            <button class="add-note-btn" title="Add Note" on:click=move |_| store.adding().set(true)>"+"</button>

            <Show when=move || store.adding().get()>
                <NoteFormDialog
                    note_id=None
                    initial=NoteValues::default()
                    on_close=Callback::new(move |_: ()| store.adding().set(false))
                />
            </Show>
            {move || store.editing().get().map(|note| view! {
                <NoteFormDialog
                    note_id=Some(note.id)
                    initial=NoteValues::from_note(&note, Utc::now().date_naive())
                    on_close=Callback::new(move |_: ()| store.editing().set(None))
                />
            })}
        </div>
    }
}
