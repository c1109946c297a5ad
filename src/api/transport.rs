//
//  atlassian-rest
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Seam
//!
//! The pager and the endpoint code never talk to `reqwest` directly. They go
//! through the [`Transport`] trait, which [`AtlassianClient`](super::AtlassianClient)
//! implements over HTTP. Tests substitute a stub that replays canned pages and
//! records every request it receives.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;

use super::common::ApiError;
use super::request::RequestDescriptor;

/// Something that can execute a [`RequestDescriptor`] and return decoded JSON.
///
/// Implementations must route every completed call with a status of 400 or
/// above through [`raise_for_status`](super::raise_for_status) so callers see
/// the same two-tier errors regardless of transport.
pub trait Transport {
    /// Executes `request` and returns the decoded JSON body.
    ///
    /// An empty success body decodes as [`Value::Null`].
    fn send(&self, request: &RequestDescriptor) -> Result<Value, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &RequestDescriptor) -> Result<Value, ApiError> {
        (**self).send(request)
    }
}

/// A completed HTTP response, kept around so errors can carry it.
///
/// The body is read eagerly as text; Atlassian error bodies are small.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,
    /// Final request URL.
    pub url: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Builds a response with no headers. Mostly useful in tests.
    pub fn new(status: StatusCode, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Decodes the body as JSON. An empty body decodes as `null`.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body)
    }
}
