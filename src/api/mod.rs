//
//  atlassian-rest
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the plumbing every Jira and Bitbucket endpoint goes
//! through.
//!
//! ## Architecture
//!
//! - [`request`]: [`RequestDescriptor`], the description of one HTTP call
//! - [`transport`]: the [`Transport`] seam and the captured [`HttpResponse`]
//! - [`client`]: [`AtlassianClient`], the blocking `reqwest` transport
//! - [`errors`]: vendor error envelopes and [`raise_for_status`]
//! - [`pager`]: [`fetch_pages`], the lazy iterator over paginated listings
//! - [`common`]: the [`ApiError`] taxonomy, [`Platform`](common::Platform)
//!   and the page envelopes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_rest::api::{AtlassianClient, PageOptions, RequestDescriptor};
//! use atlassian_rest::api::common::{PaginationStyle, Platform};
//! use serde_json::Value;
//!
//! let jira = AtlassianClient::new("https://example.atlassian.net", Platform::Cloud)?
//!     .with_api_root("rest/api")
//!     .with_api_version("3");
//!
//! let search = RequestDescriptor::get(jira.resource_url("search/jql"))
//!     .with_param("jql", "project = OPS ORDER BY created DESC")
//!     .with_param("fields", "summary,status");
//!
//! let issues: Vec<Value> = jira
//!     .paged::<Value>(search, PaginationStyle::Token, PageOptions::default().limit(200))?
//!     .collect::<Result<_, _>>()?;
//! println!("{} issues", issues.len());
//! # Ok::<(), atlassian_rest::api::ApiError>(())
//! ```
//!
//! ## Error Handling
//!
//! HTTP failures come back in two tiers:
//!
//! - `ApiError::Http`: the body carried a vendor error envelope; the message is
//!   the vendor's own text
//! - `ApiError::HttpStatus`: anything else; only status and URL are known

/// Blocking HTTP client for Atlassian APIs.
pub mod client;

/// Shared types: errors, platform flag, page envelopes.
pub mod common;

/// Error body normalization.
pub mod errors;

/// Lazy paginated fetching.
pub mod pager;

/// Request descriptors.
pub mod request;

/// The transport seam.
pub mod transport;

pub use client::AtlassianClient;
pub use common::ApiError;
pub use errors::{parse_error_body, raise_for_status, ErrorBody, ErrorEnvelope};
pub use pager::{fetch_pages, PageOptions, Pages};
pub use request::{QueryParams, RequestDescriptor};
pub use transport::{HttpResponse, Transport};
