//! Bookshelf Frontend App
//!
//! Switches between the login screen and the books screen on session state.

use leptos::prelude::*;

use book_sync::ClientConfig;

use crate::components::{BooksPage, LoginForm};
use crate::context::AppContext;

/// API location, overridable at build time
fn client_config() -> ClientConfig {
    let config = ClientConfig::default();
    match option_env!("BOOKSHELF_API_URL") {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = match AppContext::new(&client_config()) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::error!(error = %err, "invalid client configuration");
            return view! { <div class="fatal-error">{err.to_string()}</div> }.into_any();
        }
    };
    provide_context(ctx);

    let signed_in = Memo::new(move |_| ctx.username.get().is_some());

    view! {
        <div class="app-layout">
            {move || if signed_in.get() {
                view! { <BooksPage /> }.into_any()
            } else {
                view! { <LoginForm /> }.into_any()
            }}
        </div>
    }
    .into_any()
}
