//
//  atlassian-rest
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Jira and Bitbucket API Responses
//!
//! Atlassian products page their listings in several incompatible ways. This
//! module holds one envelope type per style and a pure decoding step that turns
//! a JSON page into its items plus a [`Continuation`]. The loop that drives the
//! requests lives in [`pager`](crate::api::pager).
//!
//! # Overview
//!
//! | Style | Used by | Items | Continuation signal |
//! |-------|---------|-------|---------------------|
//! | [`PaginationStyle::Link`] | Bitbucket Cloud | `values` | `next` URL |
//! | [`PaginationStyle::Offset`] | Jira | `values` | `isLast` flag, then `nextPage` URL |
//! | [`PaginationStyle::Token`] | Jira Cloud enhanced search | `issues` | `nextPageToken` |
//! | [`PaginationStyle::StartAt`] | Jira search, Bamboo | see [`StartAtFields`] | offset + total |
//!
//! # Empty pages
//!
//! A page without items is terminal in every style, even when it still
//! carries a next indicator (BCLOUD-13806).
//!
//! # Example
//!
//! ```rust
//! use atlassian_rest::api::common::{Continuation, PaginationStyle};
//! use atlassian_rest::api::RequestDescriptor;
//! use serde_json::json;
//!
//! let request = RequestDescriptor::get("repositories/ws");
//! let body = json!({
//!     "values": [1, 2],
//!     "next": "https://api.bitbucket.org/2.0/repositories/ws?page=2",
//! });
//!
//! let page = PaginationStyle::Link.decode_page::<u32>(body, &request).unwrap();
//! assert_eq!(page.items, vec![1, 2]);
//! assert!(matches!(page.continuation, Continuation::Url(_)));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, Platform};
use crate::api::request::RequestDescriptor;

/// Query parameter carrying the Jira Cloud search cursor.
pub const TOKEN_PARAM: &str = "nextPageToken";

/// Query parameter incremented by the Bitbucket paging workaround.
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the Jira `startAt` offset.
pub const START_AT_PARAM: &str = "startAt";

/// Field names of an offset-paged listing.
///
/// Jira and Bamboo both page by offset but spell it differently:
///
/// | | Jira | Bamboo |
/// |---|---|---|
/// | offset parameter and field | `startAt` | `start-index` |
/// | items | `values`, `issues` | `searchResults`, `results` |
/// | total | `total` | `size` |
///
/// The offset is sent as a query parameter and read back from the envelope
/// under the same name. Item keys are tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartAtFields {
    /// Query parameter and envelope field holding the offset.
    pub offset: &'static str,
    /// Envelope keys that may hold the items, tried in order.
    pub items: &'static [&'static str],
    /// Envelope field holding the total number of items.
    pub total: &'static str,
}

impl StartAtFields {
    /// Jira `startAt`/`maxResults`/`total` listings.
    pub const JIRA: Self = Self {
        offset: START_AT_PARAM,
        items: &["values", "issues"],
        total: "total",
    };

    /// Bamboo `start-index`/`max-result`/`size` listings.
    pub const BAMBOO: Self = Self {
        offset: "start-index",
        items: &["searchResults", "results"],
        total: "size",
    };
}

impl Default for StartAtFields {
    fn default() -> Self {
        Self::JIRA
    }
}

/// The paging protocol of a listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationStyle {
    /// `{values, next}`: follow the server's `next` URL.
    Link,
    /// `{values, isLast, nextPage}`: stop on `isLast`, otherwise follow `nextPage`.
    Offset,
    /// `{issues, nextPageToken}`: echo the token back as a query parameter.
    Token,
    /// `{values|issues, startAt, maxResults, total}`: advance the offset by the
    /// page size until `total` is reached.
    StartAt(StartAtFields),
}

impl PaginationStyle {
    /// Whether this style exists on `platform`.
    ///
    /// Only token paging is restricted: the enhanced JQL search is a Cloud API.
    pub fn supported_on(self, platform: Platform) -> bool {
        match self {
            Self::Token => platform.is_cloud(),
            Self::Link | Self::Offset | Self::StartAt(_) => true,
        }
    }

    /// Decodes one page body into its items and continuation.
    ///
    /// `request` is the descriptor that produced `body`; start-at paging reads
    /// the current offset from it when the envelope omits `startAt`. A `null`
    /// body is an empty, terminal page.
    pub fn decode_page<T: DeserializeOwned>(
        self,
        body: Value,
        request: &RequestDescriptor,
    ) -> Result<Page<T>, ApiError> {
        if body.is_null() {
            return Ok(Page::done(Vec::new()));
        }

        let page = match self {
            Self::Link => decode::<LinkPage<T>>(body)?.into_page(),
            Self::Offset => decode::<OffsetPage<T>>(body)?.into_page(),
            Self::Token => decode::<TokenPage<T>>(body)?.into_page(),
            Self::StartAt(fields) => {
                let current = request
                    .params
                    .get(fields.offset)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                StartAtPage::from_body(body, &fields)?.into_page(current, &fields)?
            }
        };

        if page.items.is_empty() {
            return Ok(Page::done(page.items));
        }
        Ok(page)
    }
}

impl std::fmt::Display for PaginationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Link => write!(f, "link"),
            Self::Offset => write!(f, "offset"),
            Self::Token => write!(f, "token"),
            Self::StartAt(fields) => write!(f, "start-at ({})", fields.offset),
        }
    }
}

fn decode<E: DeserializeOwned>(body: Value) -> Result<E, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::decode(format!("unexpected page envelope: {e}")))
}

/// What the server said about the page after this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// No further page.
    Done,
    /// Fetch this fully-qualified URL next.
    Url(String),
    /// Repeat the request with this cursor.
    Token(String),
    /// Repeat the request with the query parameter `param` set to `offset`.
    StartAt {
        /// Name of the offset parameter.
        param: &'static str,
        /// Offset of the first item of the next page.
        offset: u64,
    },
}

/// One decoded page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// How to reach the next page.
    pub continuation: Continuation,
}

impl<T> Page<T> {
    fn done(items: Vec<T>) -> Self {
        Self {
            items,
            continuation: Continuation::Done,
        }
    }

    /// Returns `true` when no further page exists.
    pub fn is_last(&self) -> bool {
        self.continuation == Continuation::Done
    }
}

/// Paginated response from the Bitbucket Cloud API.
///
/// Cloud uses URL-based pagination where each response includes links to the
/// next and previous pages.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Array of items in the current page |
/// | `page` | `Option<u32>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u32>` | Number of items per page |
/// | `size` | `Option<u32>` | Total number of items across all pages |
/// | `next` | `Option<String>` | URL to fetch the next page |
/// | `previous` | `Option<String>` | URL to fetch the previous page |
///
/// # Example
///
/// ```rust
/// use atlassian_rest::api::common::LinkPage;
///
/// let json = r#"{
///     "values": [{"slug": "repo1"}],
///     "page": 1,
///     "pagelen": 10,
///     "next": "https://api.bitbucket.org/2.0/repositories/ws?page=2"
/// }"#;
///
/// let response: LinkPage<serde_json::Value> = serde_json::from_str(json).unwrap();
/// assert!(response.has_next());
/// ```
///
/// # Notes
///
/// - Only `values` and `next` drive paging; the rest is informational
/// - `size` is often omitted by Bitbucket for performance reasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPage<T> {
    /// Array of items in the current page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when the server reports it.
    #[serde(default)]
    pub size: Option<u32>,

    /// URL to fetch the next page of results.
    #[serde(default)]
    pub next: Option<String>,

    /// URL to fetch the previous page of results.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> LinkPage<T> {
    /// Checks if the server announced another page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL for the next page of results.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    fn into_page(self) -> Page<T> {
        let continuation = match self.next {
            Some(url) => Continuation::Url(url),
            None => Continuation::Done,
        };
        Page {
            items: self.values,
            continuation,
        }
    }
}

/// Paginated response from the Jira `isLast`/`nextPage` listings
/// (for example `project/search`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetPage<T> {
    /// Array of items in the current page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Indicates whether this is the last page of results.
    #[serde(default, rename = "isLast")]
    pub is_last: bool,

    /// URL of the next page.
    #[serde(default, rename = "nextPage")]
    pub next_page: Option<String>,

    /// Offset of the first item in this page.
    #[serde(default, rename = "startAt")]
    pub start_at: Option<u64>,

    /// Requested page size.
    #[serde(default, rename = "maxResults")]
    pub max_results: Option<u64>,

    /// Total number of items, when reported.
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> OffsetPage<T> {
    fn into_page(self) -> Page<T> {
        // `isLast` wins over a stray `nextPage`
        let continuation = match self.next_page {
            Some(url) if !self.is_last => Continuation::Url(url),
            _ => Continuation::Done,
        };
        Page {
            items: self.values,
            continuation,
        }
    }
}

/// Page from the Jira Cloud enhanced JQL search (`search/jql`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPage<T> {
    /// Issues in the current page.
    #[serde(default = "Vec::new")]
    pub issues: Vec<T>,

    /// Opaque cursor for the next page.
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,

    /// Whether the server considers this the last page.
    #[serde(default, rename = "isLast")]
    pub is_last: Option<bool>,
}

impl<T> TokenPage<T> {
    fn into_page(self) -> Page<T> {
        let continuation = match self.next_page_token {
            Some(token) if !token.is_empty() => Continuation::Token(token),
            _ => Continuation::Done,
        };
        Page {
            items: self.issues,
            continuation,
        }
    }
}

/// Page from an offset-paged listing, read through [`StartAtFields`].
#[derive(Debug, Clone, PartialEq)]
pub struct StartAtPage<T> {
    /// Items in the current page.
    pub values: Vec<T>,

    /// Offset of the first item in this page, when reported.
    pub start_at: Option<u64>,

    /// Total number of matching items, when reported.
    pub total: Option<u64>,

    /// Explicit `isLast` flag, when reported.
    pub is_last: Option<bool>,
}

impl<T: DeserializeOwned> StartAtPage<T> {
    /// Reads a page body using the field names in `fields`.
    ///
    /// A body without any of the item keys is an empty page.
    pub fn from_body(body: Value, fields: &StartAtFields) -> Result<Self, ApiError> {
        let Value::Object(mut envelope) = body else {
            return Err(ApiError::decode("unexpected page envelope: not a JSON object"));
        };

        let values = match fields
            .items
            .iter()
            .find_map(|key| envelope.remove(*key).filter(|v| !v.is_null()))
        {
            Some(items) => decode::<Vec<T>>(items)?,
            None => Vec::new(),
        };

        Ok(Self {
            values,
            start_at: envelope.get(fields.offset).and_then(Value::as_u64),
            total: envelope.get(fields.total).and_then(Value::as_u64),
            is_last: envelope.get("isLast").and_then(Value::as_bool),
        })
    }
}

impl<T> StartAtPage<T> {
    fn into_page(self, requested_start: u64, fields: &StartAtFields) -> Result<Page<T>, ApiError> {
        let start = self.start_at.unwrap_or(requested_start);
        let next = u64::try_from(self.values.len())
            .ok()
            .and_then(|len| start.checked_add(len))
            .ok_or_else(|| {
                ApiError::decode(format!("{} offset {start} overflows", fields.offset))
            })?;
        let reached_total = self.total.is_some_and(|total| next >= total);

        let continuation = if self.is_last == Some(true) || reached_total {
            Continuation::Done
        } else {
            Continuation::StartAt {
                param: fields.offset,
                offset: next,
            }
        };
        Ok(Page {
            items: self.values,
            continuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> RequestDescriptor {
        RequestDescriptor::get("listing")
    }

    #[test]
    fn test_link_page_follows_next() {
        let body = json!({"values": ["a", "b"], "next": "https://x.test/p2"});
        let page: Page<String> = PaginationStyle::Link.decode_page(body, &request()).unwrap();
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.continuation, Continuation::Url("https://x.test/p2".into()));
    }

    #[test]
    fn test_empty_page_is_terminal_despite_next() {
        let body = json!({"values": [], "next": "https://x.test/p2"});
        let page: Page<String> = PaginationStyle::Link.decode_page(body, &request()).unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn test_offset_is_last_wins() {
        let body = json!({"values": ["x"], "isLast": true, "nextPage": "https://x.test/p2"});
        let page: Page<String> = PaginationStyle::Offset.decode_page(body, &request()).unwrap();
        assert!(page.is_last());

        let body = json!({"values": ["x"], "isLast": false});
        let page: Page<String> = PaginationStyle::Offset.decode_page(body, &request()).unwrap();
        assert!(page.is_last(), "missing nextPage ends paging");
    }

    #[test]
    fn test_token_page() {
        let body = json!({"issues": [{"key": "A-1"}], "nextPageToken": "T1"});
        let page: Page<Value> = PaginationStyle::Token.decode_page(body, &request()).unwrap();
        assert_eq!(page.continuation, Continuation::Token("T1".into()));

        let body = json!({"issues": [{"key": "A-2"}], "nextPageToken": ""});
        let page: Page<Value> = PaginationStyle::Token.decode_page(body, &request()).unwrap();
        assert!(page.is_last());
    }

    const JIRA: PaginationStyle = PaginationStyle::StartAt(StartAtFields::JIRA);
    const BAMBOO: PaginationStyle = PaginationStyle::StartAt(StartAtFields::BAMBOO);

    #[test]
    fn test_start_at_page() {
        let body = json!({"issues": [1, 2], "startAt": 0, "maxResults": 2, "total": 5});
        let page: Page<u32> = JIRA.decode_page(body, &request()).unwrap();
        assert_eq!(
            page.continuation,
            Continuation::StartAt {
                param: START_AT_PARAM,
                offset: 2
            }
        );

        let body = json!({"values": [5], "startAt": 4, "maxResults": 2, "total": 5});
        let page: Page<u32> = JIRA.decode_page(body, &request()).unwrap();
        assert!(page.is_last());
    }

    #[test]
    fn test_start_at_uses_request_offset_when_missing() {
        let request = request().with_param(START_AT_PARAM, 10);
        let body = json!({"values": [1, 2, 3]});
        let page: Page<u32> = JIRA.decode_page(body, &request).unwrap();
        assert_eq!(
            page.continuation,
            Continuation::StartAt {
                param: START_AT_PARAM,
                offset: 13
            }
        );
    }

    #[test]
    fn test_start_at_offset_overflow_is_decode_error() {
        let body = json!({"values": [1], "startAt": u64::MAX});
        let err = JIRA.decode_page::<u32>(body, &request()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let body = json!({"values": [1, 2], "startAt": u64::MAX - 2});
        let page: Page<u32> = JIRA.decode_page(body, &request()).unwrap();
        assert_eq!(
            page.continuation,
            Continuation::StartAt {
                param: START_AT_PARAM,
                offset: u64::MAX
            }
        );
    }

    #[test]
    fn test_bamboo_fields() {
        let request = request().with_param("start-index", 0).with_param("max-result", 2);
        let body = json!({
            "searchResults": ["a", "b"],
            "start-index": 0,
            "max-result": 2,
            "size": 3,
        });
        let page: Page<String> = BAMBOO.decode_page(body, &request).unwrap();
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(
            page.continuation,
            Continuation::StartAt {
                param: "start-index",
                offset: 2
            }
        );

        let body = json!({"results": ["c"], "start-index": 2, "max-result": 2, "size": 3});
        let page: Page<String> = BAMBOO.decode_page(body, &request).unwrap();
        assert_eq!(page.items, vec!["c"]);
        assert!(page.is_last(), "start-index reached size");
    }

    #[test]
    fn test_start_at_ignores_foreign_item_keys() {
        let body = json!({"values": ["a"], "size": 10});
        let page: Page<String> = BAMBOO.decode_page(body, &request()).unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn test_null_body_is_empty_page() {
        let page: Page<u32> = PaginationStyle::Token.decode_page(Value::Null, &request()).unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn test_wrong_item_type_is_decode_error() {
        let body = json!({"values": "not a list"});
        let err = PaginationStyle::Link
            .decode_page::<u32>(body, &request())
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_token_only_on_cloud() {
        assert!(PaginationStyle::Token.supported_on(Platform::Cloud));
        assert!(!PaginationStyle::Token.supported_on(Platform::Server));
        assert!(PaginationStyle::Offset.supported_on(Platform::Server));
    }
}
