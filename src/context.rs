//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, BrowserTransport};
use crate::config::AppConfig;
use crate::queries::NotesCache;
use crate::session::Session;
use crate::toast::{Toast, ToastQueue};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// API client (holds the session) - browser-thread only
    api: StoredValue<ApiClient, LocalStorage>,
    /// Query cache shared by every page
    cache: StoredValue<NotesCache, LocalStorage>,
    /// Toasts currently on screen
    pub toasts: RwSignal<ToastQueue>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let session = Session::browser(&config.token_storage_key);
        let api = ApiClient::new(&config.api_base_url, session, Rc::new(BrowserTransport));
        log::info!("[app] API base URL {}", config.api_base_url);
        Self::with_client(api)
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self {
            api: StoredValue::new_local(api),
            cache: StoredValue::new_local(NotesCache::new()),
            toasts: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn cache(&self) -> NotesCache {
        self.cache.get_value()
    }

    pub fn session(&self) -> Session {
        self.api.with_value(|api| api.session().clone())
    }

    /// Show a toast and dismiss it after its duration
    pub fn notify(&self, toast: Toast) {
        let duration = toast.duration_ms;
        let Some(id) = self.toasts.try_update(|queue| queue.push(toast)) else {
            return;
        };
        let toasts = self.toasts;
        spawn_local(async move {
            wait_ms(duration).await;
            toasts.try_update(|queue| queue.dismiss(id));
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.try_update(|queue| queue.dismiss(id));
    }

    /// Login: store the token; nothing cached from a previous session survives
    pub fn sign_in(&self, token: &str) {
        self.session().begin(token);
        self.cache().clear();
    }

    /// Logout: forget the token and every cached query
    pub fn sign_out(&self) {
        self.session().end();
        self.cache().clear();
    }
}

#[cfg(target_arch = "wasm32")]
async fn wait_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

/// No browser timer off wasm: toasts stay until dismissed
#[cfg(not(target_arch = "wasm32"))]
async fn wait_ms(_ms: u32) {
    futures::future::pending::<()>().await;
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
