//! REST API Boundary
//!
//! Abstract interfaces for the remote book collection and the sign-in endpoint.
//! `HttpBookApi` implements them over HTTP; tests use an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{BookId, Direction, Page};
use crate::session::Credential;

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 401/403: the bearer token is missing, expired or invalid
    #[error("credential rejected by the server")]
    Unauthorized,
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Map an HTTP status code onto the error taxonomy
pub fn classify_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(ApiError::Unauthorized),
        other => Err(ApiError::Status(other)),
    }
}

/// Query of one page of the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub direction: Direction,
}

impl PageRequest {
    /// Query parameters in wire form
    pub fn query(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("direction", self.direction.as_str().to_owned()),
        ]
    }
}

/// Body of `POST auth/signin`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Sign-in response; fields other than the token are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// Paged book collection.
///
/// Futures are `?Send`: the client runs on a single-threaded executor.
#[async_trait(?Send)]
pub trait BookApi {
    /// Fetch one page. A page without embedded books is `Ok` and empty.
    async fn fetch_page(&self, credential: &Credential, request: PageRequest) -> Result<Page, ApiError>;

    /// Delete a book by identifier
    async fn delete_book(&self, credential: &Credential, id: &BookId) -> Result<(), ApiError>;
}

/// Credential acquisition
#[async_trait(?Send)]
pub trait AuthApi {
    async fn sign_in(&self, account: &AccountCredentials) -> Result<TokenResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), Ok(()));
        assert_eq!(classify_status(204), Ok(()));
        assert_eq!(classify_status(401), Err(ApiError::Unauthorized));
        assert_eq!(classify_status(403), Err(ApiError::Unauthorized));
        assert_eq!(classify_status(404), Err(ApiError::Status(404)));
        assert_eq!(classify_status(500), Err(ApiError::Status(500)));
    }

    #[test]
    fn test_page_request_query() {
        let request = PageRequest { page: 3, size: 4, direction: Direction::Desc };
        let query = request.query();
        assert_eq!(query[0], ("page", "3".to_string()));
        assert_eq!(query[1], ("size", "4".to_string()));
        assert_eq!(query[2], ("direction", "desc".to_string()));
    }

    #[test]
    fn test_token_response_ignores_extra_fields() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"username": "leandro", "authenticated": true, "accessToken": "abc", "refreshToken": "def"}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "abc");
    }
}
