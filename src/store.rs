//! Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Note;

/// Dashboard UI state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// Text currently typed in the search bar
    pub search_input: String,
    /// Filter applied to the note list (set when the search button is pressed)
    pub search_query: String,
    /// Add-note dialog open
    pub adding: bool,
    /// Note whose edit dialog is open
    pub editing: Option<Note>,
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Apply the typed search text to the note list
pub fn store_apply_search(store: &DashboardStore) {
    let input = store.search_input().get_untracked();
    store.search_query().set(input);
}

/// Clear both the search bar and the active filter
pub fn store_clear_search(store: &DashboardStore) {
    store.search_input().set(String::new());
    store.search_query().set(String::new());
}
