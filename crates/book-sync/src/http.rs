//! HTTP implementation of the API boundary
//!
//! Uses reqwest, which goes through the browser fetch API on wasm32.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{classify_status, AccountCredentials, ApiError, AuthApi, BookApi, PageRequest, TokenResponse};
use crate::config::ClientConfig;
use crate::error::SyncResult;
use crate::model::{BookId, Page, PageEnvelope};
use crate::session::Credential;

const BOOKS_PATH: &str = "api/book/v1";
const SIGN_IN_PATH: &str = "auth/signin";

/// Everything but RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// REST client for the book API
#[derive(Debug, Clone)]
pub struct HttpBookApi {
    client: Client,
    root: Url,
}

impl HttpBookApi {
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        Ok(Self {
            client: Client::new(),
            root: config.api_root()?,
        })
    }

    pub fn books_url(&self) -> Result<Url, ApiError> {
        self.endpoint(BOOKS_PATH)
    }

    pub fn book_url(&self, id: &BookId) -> Result<Url, ApiError> {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT);
        self.endpoint(&format!("{BOOKS_PATH}/{segment}"))
    }

    pub fn sign_in_url(&self) -> Result<Url, ApiError> {
        self.endpoint(SIGN_IN_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.root
            .join(path)
            .map_err(|e| ApiError::Network(format!("invalid endpoint {path:?}: {e}")))
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn check(response: &Response) -> Result<(), ApiError> {
    classify_status(response.status().as_u16())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check(&response)?;
    let body = response.text().await.map_err(network)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl BookApi for HttpBookApi {
    async fn fetch_page(&self, credential: &Credential, request: PageRequest) -> Result<Page, ApiError> {
        let url = self.books_url()?;
        debug!(%url, page = request.page, size = request.size, direction = %request.direction, "GET books");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, credential.bearer())
            .query(&request.query())
            .send()
            .await
            .map_err(network)?;

        let envelope: PageEnvelope = decode(response).await?;
        Ok(envelope.into_page())
    }

    async fn delete_book(&self, credential: &Credential, id: &BookId) -> Result<(), ApiError> {
        let url = self.book_url(id)?;
        debug!(%url, "DELETE book");

        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, credential.bearer())
            .send()
            .await
            .map_err(network)?;
        check(&response)
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpBookApi {
    async fn sign_in(&self, account: &AccountCredentials) -> Result<TokenResponse, ApiError> {
        let url = self.sign_in_url()?;
        debug!(%url, username = %account.username, "POST sign-in");

        let response = self
            .client
            .post(url)
            .json(account)
            .send()
            .await
            .map_err(network)?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpBookApi {
        HttpBookApi::new(&ClientConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_endpoints_join_under_base() {
        let api = api("http://localhost:8080");
        assert_eq!(api.books_url().unwrap().as_str(), "http://localhost:8080/api/book/v1");
        assert_eq!(api.sign_in_url().unwrap().as_str(), "http://localhost:8080/auth/signin");
        assert_eq!(
            api.book_url(&BookId::from(42)).unwrap().as_str(),
            "http://localhost:8080/api/book/v1/42"
        );
    }

    #[test]
    fn test_book_id_is_one_path_segment() {
        let api = api("http://localhost:8080/");
        let url = api.book_url(&BookId::new("b-7/x y")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/book/v1/b-7%2Fx%20y");
    }
}
