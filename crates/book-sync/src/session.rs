//! Session Context
//!
//! Holds the bearer credential of the signed-in user. Shared by handle between
//! the UI and every synchronizer; cleared on logout or when the API rejects it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::info;

use crate::error::{SyncError, SyncResult};

/// Username plus the bearer token the API issued for it
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    access_token: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_token: access_token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("access_token", &format_args!("<{} bytes>", self.access_token.len()))
            .finish()
    }
}

type ClearListener = Rc<dyn Fn()>;

#[derive(Default)]
struct SessionInner {
    credential: RefCell<Option<Credential>>,
    listeners: RefCell<Vec<ClearListener>>,
}

/// Handle to the active session; clones share the same credential
#[derive(Clone, Default)]
pub struct Session {
    inner: Rc<SessionInner>,
}

impl Session {
    /// Create an empty (signed-out) session
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the credential returned by a successful sign-in
    pub fn establish(&self, credential: Credential) {
        info!(
            username = credential.username(),
            token_len = credential.access_token().len(),
            "session established"
        );
        *self.inner.credential.borrow_mut() = Some(credential);
    }

    /// Current credential, or `Unauthenticated` when signed out
    pub fn credential(&self) -> SyncResult<Credential> {
        self.inner
            .credential
            .borrow()
            .clone()
            .ok_or(SyncError::Unauthenticated)
    }

    pub fn username(&self) -> Option<String> {
        self.inner
            .credential
            .borrow()
            .as_ref()
            .map(|c| c.username().to_owned())
    }

    pub fn is_active(&self) -> bool {
        self.inner.credential.borrow().is_some()
    }

    /// Register a callback run whenever an active session is cleared
    pub fn on_clear(&self, listener: impl Fn() + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Wipe the credential. Returns `false` if there was nothing to clear,
    /// in which case no listener runs.
    pub fn clear(&self) -> bool {
        let removed = self.inner.credential.borrow_mut().take();
        let Some(credential) = removed else {
            return false;
        };
        info!(username = credential.username(), "session cleared");

        // Listeners may re-enter the session
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
        true
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credential", &*self.inner.credential.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}
