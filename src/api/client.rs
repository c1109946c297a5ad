//
//  atlassian-rest
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Atlassian APIs
//!
//! This module provides the blocking base client shared by every endpoint.
//! It builds URLs, attaches query parameters, bodies and headers, sends the
//! request and routes failures through the error normalizer.
//!
//! ## Features
//!
//! - One client for Jira and Bitbucket, Cloud and Server/DC
//! - `api_root`/`api_version` resource paths (`rest/api/2/...`)
//! - Absolute continuation URLs used verbatim
//! - Two-tier error normalization via [`raise_for_status`]
//! - Lazy pagination via [`AtlassianClient::paged`]
//! - Custom User-Agent header

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::common::{ApiError, PaginationStyle, Platform};
use super::errors::raise_for_status;
use super::pager::{fetch_pages, PageOptions, Pages};
use super::request::RequestDescriptor;
use super::transport::{HttpResponse, Transport};
use crate::config::HostConfig;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 75;

/// The main HTTP client for interacting with Atlassian APIs.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use atlassian_rest::api::AtlassianClient;
/// use atlassian_rest::api::common::Platform;
///
/// // Bitbucket Cloud
/// let bitbucket = AtlassianClient::new("https://api.bitbucket.org/2.0", Platform::Cloud)?;
///
/// // Jira Data Center with API v2 resources
/// let jira = AtlassianClient::new("https://jira.example.com", Platform::Server)?
///     .with_api_root("rest/api")
///     .with_api_version("2");
/// assert_eq!(jira.resource_url("project"), "rest/api/2/project");
/// # Ok::<(), atlassian_rest::api::ApiError>(())
/// ```
///
/// # Authentication
///
/// Session setup is left to the caller; pass whatever header the deployment
/// needs:
///
/// ```rust,no_run
/// use atlassian_rest::api::AtlassianClient;
/// use atlassian_rest::api::common::Platform;
///
/// let client = AtlassianClient::new("https://example.atlassian.net", Platform::Cloud)?
///     .with_header("Authorization", "Bearer <token>")?;
/// # Ok::<(), atlassian_rest::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AtlassianClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL every relative path is joined to
    base_url: Url,
    /// Cloud or Server/DC
    platform: Platform,
    /// First segment of resource paths, e.g. `rest/api`
    api_root: Option<String>,
    /// Second segment of resource paths, e.g. `2`
    api_version: Option<String>,
    /// Headers sent with every request
    default_headers: HeaderMap,
    timeout: Duration,
}

impl AtlassianClient {
    /// Creates a client for `base_url` on `platform`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or the HTTP client could
    /// not be created.
    pub fn new(base_url: &str, platform: Platform) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            http: build_http(timeout)?,
            base_url: Url::parse(base_url)?,
            platform,
            api_root: None,
            api_version: None,
            default_headers: HeaderMap::new(),
            timeout,
        })
    }

    /// Creates a client from a host configuration.
    ///
    /// The platform is taken from the configuration when set, otherwise it is
    /// detected from the host name.
    pub fn from_config(config: &HostConfig) -> Result<Self, ApiError> {
        let mut client = Self::new(&config.url, config.platform())?;
        client.api_root = config.api_root.clone();
        client.api_version = config.api_version.clone();
        if let Some(secs) = config.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs))?;
        }
        for (name, value) in &config.headers {
            client = client.with_header(name, value)?;
        }
        Ok(client)
    }

    /// Sets the first segment of resource paths (for example `rest/api`).
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    /// Sets the API version segment of resource paths (for example `2`).
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Adds a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when the name or value is not a
    /// valid HTTP header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::configuration(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| {
                ApiError::configuration(format!("invalid value for header '{name}': {e}"))
            })?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Replaces the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.http = build_http(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// The platform this client talks to.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Checks if this client is configured for Atlassian Cloud.
    pub fn is_cloud(&self) -> bool {
        self.platform.is_cloud()
    }

    /// Returns the base URL for API requests.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds `"{api_root}/{api_version}/{resource}"`, skipping unset segments.
    ///
    /// ```rust,no_run
    /// use atlassian_rest::api::AtlassianClient;
    /// use atlassian_rest::api::common::Platform;
    ///
    /// let client = AtlassianClient::new("https://example.atlassian.net", Platform::Cloud)?
    ///     .with_api_root("rest/api")
    ///     .with_api_version("3");
    /// assert_eq!(client.resource_url("search/jql"), "rest/api/3/search/jql");
    /// # Ok::<(), atlassian_rest::api::ApiError>(())
    /// ```
    pub fn resource_url(&self, resource: &str) -> String {
        [self.api_root.as_deref(), self.api_version.as_deref(), Some(resource)]
            .into_iter()
            .flatten()
            .map(|segment| segment.trim_matches('/'))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Resolves the URL a descriptor points at.
    ///
    /// Absolute descriptors are used verbatim. Relative paths are joined to
    /// the base URL with exactly one slash, plus a trailing slash when
    /// `trailing` is `Some(true)`.
    pub fn url_for(&self, request: &RequestDescriptor) -> Result<Url, ApiError> {
        if request.absolute {
            return Ok(Url::parse(&request.path)?);
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let path = request.path.trim_start_matches('/');
        let mut joined = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };
        if request.trailing == Some(true) && !joined.ends_with('/') {
            joined.push('/');
        }
        Ok(Url::parse(&joined)?)
    }

    /// Sends `request` and returns the checked response.
    ///
    /// Failed statuses come back as [`ApiError::Http`] or
    /// [`ApiError::HttpStatus`].
    pub fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse, ApiError> {
        let url = self.url_for(request)?;
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(self.default_headers.clone());
        if !request.params.is_empty() {
            builder = builder.query(request.params.as_pairs());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text()?;
        tracing::debug!(status = status.as_u16(), url = %final_url, "received response");

        raise_for_status(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }

    /// Makes an HTTP GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The response status is not successful
    /// - The response body cannot be deserialized to type `T`
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(&RequestDescriptor::get(path))
    }

    /// Makes an HTTP POST request to the specified path with a JSON body.
    pub fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = RequestDescriptor::post(path).with_body(to_json(body)?);
        self.request_json(&request)
    }

    /// Makes an HTTP PUT request to the specified path with a JSON body.
    pub fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = RequestDescriptor::put(path).with_body(to_json(body)?);
        self.request_json(&request)
    }

    /// Makes an HTTP DELETE request to the specified path.
    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(&RequestDescriptor::delete(path))?;
        Ok(())
    }

    /// Sends `request` and deserializes the JSON reply into `T`.
    pub fn request_json<T>(&self, request: &RequestDescriptor) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let value = self.send(request)?;
        serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
    }

    /// Lazily iterates a paginated listing.
    ///
    /// See [`fetch_pages`] for the paging rules; the client supplies its own
    /// platform.
    pub fn paged<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
        style: PaginationStyle,
        options: PageOptions,
    ) -> Result<Pages<&Self, T>, ApiError> {
        fetch_pages(self, self.platform, request, style, options)
    }
}

impl Transport for AtlassianClient {
    fn send(&self, request: &RequestDescriptor) -> Result<Value, ApiError> {
        let response = self.execute(request)?;
        response
            .json()
            .map_err(|e| ApiError::decode(format!("{} returned invalid JSON: {e}", response.url)))
    }
}

fn build_http(timeout: Duration) -> Result<Client, ApiError> {
    Ok(Client::builder()
        .user_agent(format!("atlassian-rest/{}", crate::VERSION))
        .timeout(timeout)
        .build()?)
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::decode(format!("request body: {e}")))
}
