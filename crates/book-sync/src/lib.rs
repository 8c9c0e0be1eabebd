//! Bookshelf Synchronization Core
//!
//! Framework-agnostic pieces of the Bookshelf client:
//! - session: the bearer credential of the signed-in user
//! - synchronizer: the paginated, locally materialized view of the book collection
//! - api / http: the REST boundary and its reqwest implementation
//! - auth: sign-in against the REST API

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod model;
pub mod session;
pub mod synchronizer;

#[cfg(test)]
mod testing;

pub use api::{classify_status, AccountCredentials, ApiError, AuthApi, BookApi, PageRequest, TokenResponse};
pub use auth::{sign_in, sign_out};
pub use config::ClientConfig;
pub use error::{SyncError, SyncResult};
pub use http::HttpBookApi;
pub use model::{Book, BookId, Direction, Page, PageEnvelope};
pub use session::{Credential, Session};
pub use synchronizer::{ListSynchronizer, LoadOutcome, PageCursor, ViewState};
