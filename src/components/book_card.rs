//! Book Card Component
//!
//! One entry of the books list with edit and delete actions.

use leptos::prelude::*;

use book_sync::format::{format_date, format_price};
use book_sync::{Book, BookId};

use crate::components::DeleteConfirmButton;

#[component]
pub fn BookCard(
    book: Book,
    #[prop(into)] on_delete: Callback<BookId>,
) -> impl IntoView {
    let Book { id, title, author, price, launch_date } = book;
    // Editing lives in a separate screen; navigation is fire-and-forget
    let edit_href = format!("#/book/{id}");
    let delete_title = format!("Delete \"{title}\"");

    view! {
        <li class="book-card">
            <strong>"Title:"</strong>
            <p>{title}</p>
            <strong>"Author:"</strong>
            <p>{author}</p>
            <strong>"Price:"</strong>
            <p>{format_price(price)}</p>
            <strong>"Release Date:"</strong>
            <p>{format_date(launch_date)}</p>

            <div class="book-actions">
                <a class="icon-btn edit-btn" href=edit_href title="Edit">"✎"</a>
                <DeleteConfirmButton
                    title=delete_title
                    on_confirm=move |_| on_delete.run(id.clone())
                />
            </div>
        </li>
    }
}
