//! Login Form Component
//!
//! Exchanges username/password for a session.

use leptos::prelude::*;
use leptos::task::spawn_local;

use book_sync::{sign_in, SyncError};

use crate::context::AppContext;

fn login_message(err: &SyncError) -> &'static str {
    match err {
        SyncError::InvalidInput(_) => "Enter your username and password.",
        _ => "Login failed! Try again!",
    }
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<&'static str>>(None);
    let (pending, set_pending) = signal(false);

    let handle_login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let user = username.get_untracked();
        let pass = password.get_untracked();
        set_pending.set(true);
        set_error.set(None);

        spawn_local(async move {
            match sign_in(&ctx.api(), &ctx.session(), &user, &pass).await {
                Ok(credential) => {
                    set_password.set(String::new());
                    // Unmounts this form
                    ctx.signed_in(&credential);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "login failed");
                    set_error.set(Some(login_message(&err)));
                    set_pending.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <section class="form">
                <span class="logo">"📚 Bookshelf"</span>
                <form on:submit=handle_login>
                    <h1>"Access your Account"</h1>
                    <input
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                    <button class="button" type="submit" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
            </section>
        </div>
    }
}
