//! Book List Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Mirrors the synchronizer's view state plus the transient notice banner.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use book_sync::{Book, SyncError, ViewState};

const NOTICE_TIMEOUT_MS: u32 = 5_000;

/// Rendered state of the books screen
#[derive(Clone, Debug, Default, Store)]
pub struct BookListState {
    /// Books in display order
    pub books: Vec<Book>,
    pub has_more: bool,
    pub loading: bool,
    /// Collection size reported by the server
    pub total_elements: Option<u64>,
    /// User-visible failure message
    pub notice: Option<String>,
}

/// Type alias for the store
pub type BookStore = Store<BookListState>;

/// Get the book store from context
pub fn use_book_store() -> BookStore {
    expect_context::<BookStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy a synchronizer snapshot into the store.
///
/// No-op once the books screen is gone: a fetch may still resolve after logout.
pub fn store_apply_view(store: &BookStore, view: &ViewState) {
    store.try_update(|state| {
        state.books = view.books.clone();
        state.has_more = view.has_more;
        state.loading = view.loading;
        state.total_elements = view.total_elements;
    });
}

/// Show a failure notice that dismisses itself after a few seconds
pub fn store_show_notice(store: &BookStore, message: String) {
    if store.try_update(|state| state.notice = Some(message.clone())).is_none() {
        return;
    }
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
        store.try_update(|state| {
            if state.notice.as_deref() == Some(message.as_str()) {
                state.notice = None;
            }
        });
    });
}

pub fn store_dismiss_notice(store: &BookStore) {
    store.try_update(|state| state.notice = None);
}

/// Notice text for a failed list operation
pub fn notice_for(err: &SyncError) -> String {
    match err {
        SyncError::Fetch(_) => "Could not load books. Try again.".to_string(),
        SyncError::Delete { .. } => "Delete failed! Try again.".to_string(),
        other => other.to_string(),
    }
}
