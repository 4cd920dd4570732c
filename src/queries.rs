//! Queries
//!
//! Cache keys for server data, the typed value stored under each key, and
//! the session guard derived from the current-user query.

use query_cache::QueryCache;

use crate::api::ApiClient;
use crate::config::{
    notes_query_options, user_query_options, LOGIN_ERROR_TOAST_MS, MUTATION_ERROR_TOAST_MS,
};
use crate::error::ApiError;
use crate::models::{Note, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    UserInfo,
    Notes,
}

/// Value cached under a `QueryKey`
#[derive(Clone, Debug, PartialEq)]
pub enum QueryData {
    User(User),
    Notes(Vec<Note>),
}

pub type NotesCache = QueryCache<QueryKey, QueryData, ApiError>;

/// `GET /me` through the cache
pub async fn fetch_user_info(cache: NotesCache, api: ApiClient) -> Result<User, ApiError> {
    let data = cache
        .fetch(QueryKey::UserInfo, user_query_options(), move || {
            let api = api.clone();
            async move { api.me().await.map(QueryData::User) }
        })
        .await?;
    match data.as_ref() {
        QueryData::User(user) => Ok(user.clone()),
        other => Err(mismatch(QueryKey::UserInfo, other)),
    }
}

/// `GET /notes` through the cache
pub async fn fetch_notes(cache: NotesCache, api: ApiClient) -> Result<Vec<Note>, ApiError> {
    let data = cache
        .fetch(QueryKey::Notes, notes_query_options(), move || {
            let api = api.clone();
            async move { api.list_notes().await.map(QueryData::Notes) }
        })
        .await?;
    match data.as_ref() {
        QueryData::Notes(notes) => Ok(notes.clone()),
        other => Err(mismatch(QueryKey::Notes, other)),
    }
}

fn mismatch(key: QueryKey, data: &QueryData) -> ApiError {
    ApiError::Decode(format!("{:?} holds {:?}", key, data))
}

/// What a component renders for one query
#[derive(Clone, Debug, PartialEq)]
pub struct QueryView<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub is_pending: bool,
}

impl<T> Default for QueryView<T> {
    fn default() -> Self {
        Self { data: None, error: None, is_pending: true }
    }
}

impl<T> QueryView<T> {
    /// Apply a finished fetch. Previous data is kept when a refetch fails.
    pub fn settle(&mut self, result: Result<T, ApiError>) {
        self.is_pending = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_pending && self.error.is_none() && self.data.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCheck {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// No token means unauthenticated without asking the server
pub fn session_check(has_token: bool, user: &QueryView<User>) -> SessionCheck {
    if !has_token || user.error.is_some() {
        SessionCheck::Unauthenticated
    } else if user.data.is_some() {
        SessionCheck::Authenticated
    } else {
        SessionCheck::Checking
    }
}

/// Fires once when the session turns unauthenticated, then stays quiet until
/// the session recovers.
#[derive(Clone, Debug, Default)]
pub struct RedirectGuard {
    fired: bool,
}

impl RedirectGuard {
    pub fn observe(&mut self, check: SessionCheck) -> bool {
        match check {
            SessionCheck::Unauthenticated if !self.fired => {
                self.fired = true;
                true
            }
            SessionCheck::Unauthenticated => false,
            SessionCheck::Authenticated => {
                self.fired = false;
                false
            }
            SessionCheck::Checking => false,
        }
    }
}

// ========================
// Mutations
// ========================

/// Toast title on failure plus the queries a success makes stale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationConfig {
    pub title: &'static str,
    pub invalidates: &'static [QueryKey],
    pub error_toast_ms: u32,
}

impl MutationConfig {
    pub const fn new(title: &'static str, invalidates: &'static [QueryKey]) -> Self {
        Self { title, invalidates, error_toast_ms: MUTATION_ERROR_TOAST_MS }
    }

    pub const fn error_toast_ms(mut self, ms: u32) -> Self {
        self.error_toast_ms = ms;
        self
    }
}

pub const SIGN_IN: MutationConfig = MutationConfig::new("Sign In", &[]).error_toast_ms(LOGIN_ERROR_TOAST_MS);
pub const SIGN_UP: MutationConfig = MutationConfig::new("Sign up", &[]);
pub const CREATE_NOTE: MutationConfig = MutationConfig::new("Create Note", &[QueryKey::Notes]);
pub const UPDATE_NOTE: MutationConfig = MutationConfig::new("Update Note", &[QueryKey::Notes]);
pub const DELETE_NOTE: MutationConfig = MutationConfig::new("Delete Note", &[QueryKey::Notes]);
pub const PIN_NOTE: MutationConfig = MutationConfig::new("Pin Note", &[QueryKey::Notes]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::session::{MemoryStore, Session};
    use query_cache::{Mutation, QueryStatus};
    use std::rc::Rc;

    fn setup() -> (Rc<MockTransport>, ApiClient, NotesCache) {
        let mock = Rc::new(MockTransport::new());
        let session = Session::new(MemoryStore::default());
        session.begin("jwt");
        let api = ApiClient::new("/api", session, mock.clone());
        (mock, api, NotesCache::new())
    }

    const TWO_NOTES: &str = r#"{"notes":[
        {"id":7,"title":"a","content":"abc","tags":[],"isPinned":false},
        {"id":8,"title":"b","content":"def","tags":["work"],"isPinned":true}
    ]}"#;

    #[tokio::test]
    async fn test_notes_cached_within_stale_time() {
        let (mock, api, cache) = setup();
        mock.respond(200, TWO_NOTES);

        let first = fetch_notes(cache.clone(), api.clone()).await.unwrap();
        let second = fetch_notes(cache.clone(), api.clone()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_notes_consumers_share_request() {
        let (mock, api, cache) = setup();
        mock.respond(200, TWO_NOTES);

        let (a, b) = futures::join!(
            fetch_notes(cache.clone(), api.clone()),
            fetch_notes(cache.clone(), api.clone())
        );

        assert_eq!(a.unwrap().len(), 2);
        assert_eq!(b.unwrap().len(), 2);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_refetch_drops_note() {
        let (mock, api, cache) = setup();
        mock.respond(200, TWO_NOTES);
        mock.respond(200, r#"{"message":"deleted"}"#);
        mock.respond(200, r#"{"notes":[{"id":8,"title":"b","content":"def","tags":[],"isPinned":true}]}"#);

        fetch_notes(cache.clone(), api.clone()).await.unwrap();
        let delete = Mutation::new([QueryKey::Notes]);
        delete.execute(&cache, api.delete_note(7)).await.unwrap();
        assert!(cache.snapshot(&QueryKey::Notes).is_invalidated);

        let notes = fetch_notes(cache.clone(), api.clone()).await.unwrap();

        assert!(notes.iter().all(|n| n.id != 7));
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache_fresh() {
        let (mock, api, cache) = setup();
        mock.respond(200, TWO_NOTES);
        mock.respond(500, r#"{"message":"boom"}"#);

        fetch_notes(cache.clone(), api.clone()).await.unwrap();
        let pin = Mutation::new([QueryKey::Notes]);
        let err = pin.execute(&cache, api.toggle_pin(7)).await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert!(!cache.snapshot(&QueryKey::Notes).is_invalidated);
        fetch_notes(cache.clone(), api.clone()).await.unwrap();
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_user_query_retries_once() {
        let (mock, api, cache) = setup();
        mock.respond(500, "");
        mock.respond(200, r#"{"user":{"name":"Ada Lovelace","email":"ada@x.io"}}"#);

        let user = fetch_user_info(cache.clone(), api).await.unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_user_query_fails_after_retry() {
        let (mock, api, cache) = setup();
        mock.respond(401, r#"{"message":"Unauthorized"}"#);
        mock.respond(401, r#"{"message":"Unauthorized"}"#);

        let err = fetch_user_info(cache.clone(), api).await.unwrap_err();

        assert!(err.is_auth_failure());
        assert_eq!(cache.snapshot(&QueryKey::UserInfo).status, QueryStatus::Error);
    }

    #[test]
    fn test_mismatched_cache_value_is_decode_error() {
        let cache = NotesCache::new();
        cache.set_data(QueryKey::Notes, QueryData::User(User {
            name: "x".to_string(),
            email: "y".to_string(),
        }));
        let err = futures::executor::block_on(fetch_notes(cache, setup().1)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_session_check() {
        let mut user = QueryView::<User>::default();
        assert_eq!(session_check(false, &user), SessionCheck::Unauthenticated);
        assert_eq!(session_check(true, &user), SessionCheck::Checking);

        user.settle(Ok(User { name: "A".to_string(), email: "a@b.com".to_string() }));
        assert_eq!(session_check(true, &user), SessionCheck::Authenticated);

        user.settle(Err(ApiError::from_response(401, "")));
        assert_eq!(session_check(true, &user), SessionCheck::Unauthenticated);
    }

    #[test]
    fn test_failed_me_redirects_exactly_once() {
        let mut guard = RedirectGuard::default();
        let mut user = QueryView::<User>::default();
        user.settle(Err(ApiError::from_response(401, "")));

        let redirects = (0..5)
            .filter(|_| guard.observe(session_check(true, &user)))
            .count();

        assert_eq!(redirects, 1);
    }

    #[test]
    fn test_redirect_rearms_after_recovery() {
        let mut guard = RedirectGuard::default();
        assert!(guard.observe(SessionCheck::Unauthenticated));
        assert!(!guard.observe(SessionCheck::Checking));
        assert!(!guard.observe(SessionCheck::Unauthenticated));
        guard.observe(SessionCheck::Authenticated);
        assert!(guard.observe(SessionCheck::Unauthenticated));
    }

    #[test]
    fn test_refetch_failure_keeps_previous_data() {
        let mut view = QueryView::default();
        view.settle(Ok(vec![1, 2]));
        view.settle(Err(ApiError::Network("offline".to_string())));
        assert_eq!(view.data, Some(vec![1, 2]));
        assert!(!view.is_success());
    }

    #[test]
    fn test_note_mutations_invalidate_notes() {
        for config in [CREATE_NOTE, UPDATE_NOTE, DELETE_NOTE, PIN_NOTE] {
            assert_eq!(config.invalidates, &[QueryKey::Notes]);
            assert_eq!(config.error_toast_ms, 3000);
        }
        assert!(SIGN_UP.invalidates.is_empty());
        assert_eq!(SIGN_IN.error_toast_ms, 5000);
    }
}
