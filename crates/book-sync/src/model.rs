//! Book Models
//!
//! Data structures matching the REST API's book resources.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned book identifier.
///
/// Opaque to the client: the API may send it as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// A book as listed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(deserialize_with = "non_negative_price")]
    pub price: Decimal,
    #[serde(deserialize_with = "calendar_date")]
    pub launch_date: NaiveDate,
}

fn non_negative_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let price = <Decimal as Deserialize>::deserialize(deserializer)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(serde::de::Error::custom(format!("negative price {price}")));
    }
    Ok(price)
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, a naive ISO timestamp,
/// or epoch milliseconds, keeping only the calendar date.
///
/// Timestamps keep the day in the offset the server wrote, not the viewer's
/// local zone, so a release date never shifts by one across time zones.
/// Epoch milliseconds carry no offset and are read as UTC.
fn calendar_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    match RawDate::deserialize(deserializer)? {
        RawDate::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {ms} out of range"))),
        RawDate::Text(text) => parse_calendar_date(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date {text:?}"))),
    }
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Sort direction of the paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================
// Wire Envelope
// ========================

/// HAL envelope returned by the paged collection endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PageEnvelope {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
    #[serde(default)]
    page: Option<PageMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct Embedded {
    #[serde(rename = "bookVOList", default)]
    books: Vec<Book>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PageMetadata {
    total_elements: u64,
}

impl PageEnvelope {
    pub fn into_page(self) -> Page {
        Page {
            books: self.embedded.map(|e| e.books).unwrap_or_default(),
            total_elements: self.page.map(|p| p.total_elements),
        }
    }
}

/// One decoded page of the collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub books: Vec<Book>,
    /// Collection size reported by the server, if any
    pub total_elements: Option<u64>,
}

impl Page {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books, total_elements: None }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
