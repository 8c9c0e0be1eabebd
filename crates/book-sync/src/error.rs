//! Client-level errors

use crate::api::ApiError;
use crate::model::BookId;

/// Common result type for synchronizer and session operations
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// No credential, or the API rejected it. The session has been cleared.
    #[error("not signed in")]
    Unauthenticated,
    /// Page fetch failed; the view is unchanged and may be retried
    #[error("failed to load books: {0}")]
    Fetch(#[source] ApiError),
    /// Remote delete failed; the book is still listed
    #[error("failed to delete book {id}: {source}")]
    Delete {
        id: BookId,
        #[source]
        source: ApiError,
    },
    #[error("sign-in failed: {0}")]
    SignIn(#[source] ApiError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
