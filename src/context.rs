//! Application Context
//!
//! Session, API client and paging parameters shared via Leptos Context API.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use book_sync::{
    sign_out, ClientConfig, Credential, HttpBookApi, ListSynchronizer, PageCursor, Session, SyncResult,
};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    session: StoredValue<Session, LocalStorage>,
    api: StoredValue<HttpBookApi, LocalStorage>,
    /// Fixed page size and direction for every book list
    cursor: PageCursor,
    /// Signed-in username (None = show login) - read
    pub username: ReadSignal<Option<String>>,
    /// Signed-in username - write
    set_username: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let api = HttpBookApi::new(config)?;
        let cursor = config.cursor()?;
        let session = Session::new();
        let (username, set_username) = signal(None::<String>);

        // Rejected tokens clear the session from inside the synchronizer
        session.on_clear(move || set_username.set(None));

        Ok(Self {
            session: StoredValue::new_local(session),
            api: StoredValue::new_local(api),
            cursor,
            username,
            set_username,
        })
    }

    pub fn session(&self) -> Session {
        self.session.get_value()
    }

    pub fn api(&self) -> HttpBookApi {
        self.api.get_value()
    }

    /// Switch to the books screen after a successful sign-in
    pub fn signed_in(&self, credential: &Credential) {
        self.set_username.set(Some(credential.username().to_owned()));
    }

    /// Clear the session and return to the login screen
    pub fn sign_out(&self) {
        if !sign_out(&self.session()) {
            self.set_username.set(None);
        }
    }

    /// Fresh synchronizer bound to the current session
    pub fn new_synchronizer(&self) -> ListSynchronizer<HttpBookApi> {
        ListSynchronizer::new(self.session(), self.api(), self.cursor)
    }
}
