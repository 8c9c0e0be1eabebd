//! Books Page Component
//!
//! Owns the list synchronizer for one signed-in session and wires UI events
//! to it: mount -> sync, "Load More" -> load_next, delete -> remove.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use book_sync::{BookId, Session, SyncError};

use crate::components::{BookList, BooksHeader};
use crate::context::AppContext;
use crate::store::{
    notice_for, store_apply_view, store_dismiss_notice, store_show_notice, BookListState,
    BookListStateStoreFields, BookStore,
};

/// Whether a failure should send the user back to the login screen.
/// A newer sign-in may already have replaced the rejected credential.
fn needs_login(err: &SyncError, session: &Session) -> bool {
    matches!(err, SyncError::Unauthenticated) && !session.is_active()
}

/// Route a failed operation: rejected sessions go back to login,
/// everything else becomes a notice.
fn report(ctx: AppContext, store: BookStore, err: SyncError) {
    if needs_login(&err, &ctx.session()) {
        ctx.sign_out();
        return;
    }
    match err {
        SyncError::Unauthenticated => tracing::debug!("ignoring rejection of a replaced session"),
        other => store_show_notice(&store, notice_for(&other)),
    }
}

#[component]
pub fn BooksPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store: BookStore = Store::new(BookListState::default());
    provide_context(store);

    let synchronizer = ctx.new_synchronizer();
    store_apply_view(&store, &synchronizer.snapshot());
    synchronizer.subscribe(move |view| store_apply_view(&store, view));
    let synchronizer = StoredValue::new_local(synchronizer);

    // Load the first page on mount
    Effect::new(move |_| {
        let sync = synchronizer.get_value();
        spawn_local(async move {
            if let Err(err) = sync.sync().await {
                report(ctx, store, err);
            }
        });
    });

    let load_more = move |_| {
        let sync = synchronizer.get_value();
        spawn_local(async move {
            if let Err(err) = sync.load_next().await {
                report(ctx, store, err);
            }
        });
    };

    let delete_book = move |id: BookId| {
        let sync = synchronizer.get_value();
        spawn_local(async move {
            if let Err(err) = sync.remove(&id).await {
                report(ctx, store, err);
            }
        });
    };

    // Picks up edits made in the editor screen
    let reload = move |_| {
        let sync = synchronizer.get_value();
        sync.restart();
        spawn_local(async move {
            if let Err(err) = sync.load_next().await {
                report(ctx, store, err);
            }
        });
    };

    view! {
        <div class="book-container">
            <BooksHeader on_reload=reload />

            {move || store.notice().get().map(|msg| view! {
                <div class="notice" role="alert">
                    <span>{msg}</span>
                    <button type="button" class="icon-btn" on:click=move |_| store_dismiss_notice(&store)>"✕"</button>
                </div>
            })}

            <h1>"Registered Books"</h1>
            <BookList on_load_more=load_more on_delete=delete_book />
        </div>
    }
}
