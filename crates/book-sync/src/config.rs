//! Client Configuration
//!
//! API location and the fixed paging parameters of a session.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};
use crate::model::Direction;
use crate::synchronizer::PageCursor;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_PAGE_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
    pub direction: Direction,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            direction: Direction::Asc,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> SyncResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SyncError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> SyncResult<()> {
        self.api_root()?;
        self.cursor()?;
        Ok(())
    }

    /// Base URL normalized to end with `/` so relative endpoints join under it
    pub fn api_root(&self) -> SyncResult<Url> {
        let mut url = Url::parse(self.base_url.trim())
            .map_err(|e| SyncError::Config(format!("base url {:?}: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(SyncError::Config(format!("base url {:?} cannot be a base", self.base_url)));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Initial page cursor for this configuration
    pub fn cursor(&self) -> SyncResult<PageCursor> {
        PageCursor::new(self.page_size, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_api() {
        let config = ClientConfig::default();
        assert_eq!(config.page_size, 4);
        assert_eq!(config.direction, Direction::Asc);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ClientConfig::from_json(r#"{"pageSize": 12, "direction": "desc"}"#).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.direction, Direction::Desc);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = ClientConfig::from_json(r#"{"pageSize": 0}"#);
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(config.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_api_root_gets_trailing_slash() {
        let config = ClientConfig::default().with_base_url("https://books.example.com/backend");
        let root = config.api_root().unwrap();
        assert_eq!(root.as_str(), "https://books.example.com/backend/");
        assert_eq!(
            root.join("api/book/v1").unwrap().as_str(),
            "https://books.example.com/backend/api/book/v1"
        );
    }
}
