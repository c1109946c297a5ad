//
//  atlassian-rest
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Atlassian REST Library
//!
//! The base client underneath Jira and Bitbucket endpoint wrappers.
//!
//! ## Overview
//!
//! Endpoint methods are thin: they build a [`RequestDescriptor`](api::RequestDescriptor)
//! and hand it to the shared client. This crate provides what they all share:
//!
//! - **Paged fetching**: one lazy iterator over Bitbucket `next` links, Jira
//!   `isLast`/`nextPage` listings, Jira Cloud `nextPageToken` search and classic
//!   `startAt` search
//! - **Error normalization**: vendor error envelopes become readable errors,
//!   everything else degrades to a plain status error
//! - **Host profiles**: a TOML file of named deployments
//!
//! ## Module Structure
//!
//! - [`api`]: Request descriptors, transport, client, pagination and errors
//! - [`config`]: Configuration file management and platform detection
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlassian_rest::api::{AtlassianClient, PageOptions, RequestDescriptor};
//! use atlassian_rest::api::common::{PaginationStyle, Platform};
//! use serde_json::Value;
//!
//! let bitbucket = AtlassianClient::new("https://api.bitbucket.org/2.0", Platform::Cloud)?;
//! let repos = RequestDescriptor::get("repositories/my-workspace");
//!
//! for repo in bitbucket.paged::<Value>(repos, PaginationStyle::Link, PageOptions::default())? {
//!     let repo = repo?;
//!     println!("{}", repo["full_name"]);
//! }
//! # Ok::<(), atlassian_rest::api::ApiError>(())
//! ```
//!
//! ## Platform Differences
//!
//! | Pagination style | Cloud | Server/DC |
//! |------------------|-------|-----------|
//! | Link (`next`) | Yes | Yes |
//! | Offset (`isLast`/`nextPage`) | Yes | Yes |
//! | Token (`nextPageToken`) | Yes | No |
//! | Start-at (`startAt`/`total`) | Yes | Yes |

/// API plumbing for Atlassian platforms.
///
/// Request descriptors, the transport seam, the blocking client, the paged
/// fetcher and the error normalizer.
pub mod api;

/// Configuration file management.
///
/// Named host profiles stored in platform-specific locations:
/// - Linux: `~/.config/atlassian-rest/config.toml`
/// - macOS: `~/Library/Application Support/atlassian-rest/config.toml`
/// - Windows: `%APPDATA%\atlassian-rest\config.toml`
pub mod config;

pub use api::{ApiError, AtlassianClient};
pub use config::Config;

/// Library version constant.
///
/// Sent in the `User-Agent` header, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
