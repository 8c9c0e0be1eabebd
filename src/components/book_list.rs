//! Book List Component
//!
//! Renders the synchronized books with a "Load More" footer.

use leptos::prelude::*;

use book_sync::BookId;

use crate::components::BookCard;
use crate::store::{use_book_store, BookListStateStoreFields};

#[component]
pub fn BookList(
    #[prop(into)] on_load_more: Callback<()>,
    #[prop(into)] on_delete: Callback<BookId>,
) -> impl IntoView {
    let store = use_book_store();

    let count_label = move || {
        let shown = store.books().read().len();
        match store.total_elements().get() {
            Some(total) => format!("Showing {shown} of {total} books"),
            None => format!("Showing {shown} books"),
        }
    };

    view! {
        <ul class="book-list">
            <For
                each=move || store.books().get()
                key=|book| book.id.clone()
                children=move |book| view! { <BookCard book=book on_delete=on_delete /> }
            />
        </ul>

        <Show when=move || store.books().read().is_empty() && !store.has_more().get()>
            <p class="empty-list">"No books registered yet."</p>
        </Show>

        <footer class="list-footer">
            <p class="book-count">{count_label}</p>
            <Show when=move || store.loading().get()>
                <div class="loading">"Loading..."</div>
            </Show>
            <Show when=move || store.has_more().get()>
                <button
                    type="button"
                    class="button load-more"
                    disabled=move || store.loading().get()
                    on:click=move |_| on_load_more.run(())
                >
                    "Load More"
                </button>
            </Show>
        </footer>
    }
}
