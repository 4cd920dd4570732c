//! Reactive Hooks
//!
//! Bridge between the query cache and Leptos signals.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use query_cache::{CacheEvent, Mutation};

use crate::api::ApiClient;
use crate::context::{use_app_context, AppContext};
use crate::error::ApiError;
use crate::queries::{MutationConfig, NotesCache, QueryKey, QueryView};
use crate::toast::Toast;

/// Subscribe the calling component to `key`.
///
/// Fetches on mount and again whenever the key is invalidated. Results that
/// arrive after the component is disposed, or after a newer fetch started,
/// are dropped.
pub fn use_query<T, F, Fut>(key: QueryKey, fetch: F) -> ReadSignal<QueryView<T>>
where
    T: Send + Sync + 'static,
    F: Fn(NotesCache, ApiClient) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let ctx = use_app_context();
    let (view, set_view) = signal(QueryView::<T>::default());
    let (version, set_version) = signal(0u32);

    let subscription = ctx.cache().subscribe(key, move |event| {
        if let CacheEvent::Invalidated(_) = event {
            set_version.try_update(|v| *v += 1);
        }
    });
    // Dropped (and unsubscribed) with the owning component
    StoredValue::new_local(subscription);

    Effect::new(move |_| {
        let run = version.get();
        let cache = ctx.cache();
        let api = ctx.api();
        spawn_local(async move {
            let result = fetch(cache, api).await;
            if version.try_get_untracked() != Some(run) {
                log::debug!("[query] {:?} result superseded", key);
                return;
            }
            set_view.try_update(|view| view.settle(result));
        });
    });

    view
}

/// Run `call` as a mutation: on success the configured queries are
/// invalidated, on failure an error toast is shown. `on_settled` always runs.
pub fn run_mutation<T, Fut>(
    ctx: AppContext,
    config: MutationConfig,
    call: Fut,
    on_settled: impl FnOnce(Result<T, ApiError>) + 'static,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let cache = ctx.cache();
    spawn_local(async move {
        log::debug!("[mutation] {}", config.title);
        let mutation = Mutation::new(config.invalidates.iter().copied());
        let result = mutation.execute(&cache, call).await;
        if let Err(err) = &result {
            ctx.notify(Toast::error(config.title, err, config.error_toast_ms));
        }
        on_settled(result);
    });
}


#[cfg(test)]
mod tests {
    use super::testing::{flush, init_executor, test_context};
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use tokio::task::LocalSet;

    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::config::MUTATION_ERROR_TOAST_MS;
    use crate::models::Note;
    use crate::queries::{fetch_notes, DELETE_NOTE};
    use crate::toast::ToastVariant;

    const NOTES_7_AND_8: &str = r#"{"notes":[
        {"id":7,"title":"a","content":"abc","tags":[],"isPinned":false},
        {"id":8,"title":"b","content":"def","tags":[],"isPinned":true}
    ]}"#;
    const NOTE_8: &str = r#"{"notes":[{"id":8,"title":"b","content":"def","tags":[],"isPinned":true}]}"#;

    fn ids(view: ReadSignal<QueryView<Vec<Note>>>) -> Vec<u32> {
        view.with_untracked(|v| {
            v.data
                .as_ref()
                .map(|notes| notes.iter().map(|n| n.id).collect())
                .unwrap_or_default()
        })
    }

    #[tokio::test]
    async fn test_delete_invalidates_and_view_refetches() {
        init_executor();
        let owner = Owner::new();
        owner.set();
        LocalSet::new()
            .run_until(async {
                let mock = Rc::new(MockTransport::new());
                let ctx = test_context(&mock);
                provide_context(ctx);
                mock.respond(200, NOTES_7_AND_8);

                let view = use_query(QueryKey::Notes, fetch_notes);
                flush().await;
                assert_eq!(ids(view), vec![7, 8]);

                mock.respond(200, r#"{"message":"deleted"}"#);
                mock.respond(200, NOTE_8);
                let succeeded = Rc::new(Cell::new(false));
                let api = ctx.api();
                run_mutation(ctx, DELETE_NOTE, async move { api.delete_note(7).await }, {
                    let succeeded = succeeded.clone();
                    move |result| succeeded.set(result.is_ok())
                });
                flush().await;

                assert!(succeeded.get());
                assert_eq!(ids(view), vec![8]);
                let sent: Vec<_> = mock.requests().into_iter().map(|r| (r.method, r.url)).collect();
                assert_eq!(
                    sent,
                    vec![
                        (Method::Get, "http://api.test/notes".to_string()),
                        (Method::Delete, "http://api.test/notes/7".to_string()),
                        (Method::Get, "http://api.test/notes".to_string()),
                    ]
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_result_after_owner_disposed_is_dropped() {
        init_executor();
        let owner = Owner::new();
        owner.set();
        LocalSet::new()
            .run_until(async {
                let mock = Rc::new(MockTransport::new());
                provide_context(test_context(&mock));
                let release = mock.respond_later(200, NOTES_7_AND_8);

                let board = owner.child();
                let view = board.with(|| use_query(QueryKey::Notes, fetch_notes));
                flush().await;
                assert_eq!(mock.requests().len(), 1);

                board.cleanup();
                let _ = release.send(());
                flush().await;

                assert!(view.try_get_untracked().is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn test_superseded_fetch_does_not_overwrite_newer_result() {
        init_executor();
        let owner = Owner::new();
        owner.set();
        LocalSet::new()
            .run_until(async {
                let mock = Rc::new(MockTransport::new());
                let ctx = test_context(&mock);
                provide_context(ctx);
                let release_stale = mock.respond_later(200, NOTES_7_AND_8);

                let view = use_query(QueryKey::Notes, fetch_notes);
                flush().await;
                assert!(view.with_untracked(|v| v.is_pending));

                mock.respond(200, NOTE_8);
                ctx.cache().invalidate(&QueryKey::Notes);
                flush().await;
                assert_eq!(ids(view), vec![8]);

                let _ = release_stale.send(());
                flush().await;
                assert_eq!(ids(view), vec![8]);
                assert_eq!(mock.requests().len(), 2);
            })
            .await;
    }

    #[tokio::test]
    async fn test_failed_mutation_shows_error_toast() {
        init_executor();
        let owner = Owner::new();
        owner.set();
        LocalSet::new()
            .run_until(async {
                let mock = Rc::new(MockTransport::new());
                let ctx = test_context(&mock);
                provide_context(ctx);
                mock.respond(404, r#"{"message":"Note not found"}"#);

                let settled = Rc::new(Cell::new(None));
                let api = ctx.api();
                run_mutation(ctx, DELETE_NOTE, async move { api.delete_note(9).await }, {
                    let settled = settled.clone();
                    move |result| settled.set(Some(result.is_ok()))
                });
                flush().await;

                assert_eq!(settled.get(), Some(false));
                ctx.toasts.with_untracked(|queue| {
                    let toasts = queue.visible();
                    assert_eq!(toasts.len(), 1);
                    assert_eq!(toasts[0].title, "Delete Note");
                    assert_eq!(toasts[0].description, "Note not found");
                    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
                    assert_eq!(toasts[0].duration_ms, MUTATION_ERROR_TOAST_MS);
                });
                // Nothing refetched after a failure
                assert_eq!(mock.requests().len(), 1);
            })
            .await;
    }
}
