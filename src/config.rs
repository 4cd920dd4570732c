//! Application Configuration
//!
//! Values fixed at build time (the app runs in a browser, so there is no
//! runtime environment to read).

use chrono::Duration;
use query_cache::QueryOptions;

/// Local-storage key holding the session token
pub const TOKEN_STORAGE_KEY: &str = "token";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// How long notification toasts stay on screen
pub const LOGIN_ERROR_TOAST_MS: u32 = 5000;
pub const MUTATION_ERROR_TOAST_MS: u32 = 3000;
pub const SIGN_UP_SUCCESS_TOAST_MS: u32 = 2000;

/// Characters of note content shown on a card
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}

impl AppConfig {
    /// Read `NOTES_API_URL` captured at compile time, falling back to the local dev server
    pub fn load() -> Self {
        match option_env!("NOTES_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(url),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim().trim_end_matches('/').to_string(),
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
        }
    }
}

/// Notes list: served from cache for ten minutes unless a mutation invalidates it
pub fn notes_query_options() -> QueryOptions {
    QueryOptions::default().stale_time(Duration::minutes(10))
}

/// Current user: one retry before the session counts as failed
pub fn user_query_options() -> QueryOptions {
    QueryOptions::default().retry(1)
}
