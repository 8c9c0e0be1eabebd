//! Books Header Component
//!
//! Greeting, add/reload actions and logout.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn BooksHeader(#[prop(into)] on_reload: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let greeting = move || ctx.username.get().unwrap_or_default().to_uppercase();

    view! {
        <header class="books-header">
            <span class="logo">"📚"</span>
            <span>"Welcome, " <strong>{greeting}</strong> "!"</span>
            <a class="button" href="#/book/new">"Add New Book"</a>
            <button type="button" class="icon-btn" title="Reload" on:click=move |_| on_reload.run(())>
                "⟳"
            </button>
            <button type="button" class="icon-btn" title="Logout" on:click=move |_| ctx.sign_out()>
                "⏻"
            </button>
        </header>
    }
}
