//
//  atlassian-rest
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Jira and Bitbucket
//!
//! This module provides the types shared by the transport, the error
//! normalizer and the pager: the [`ApiError`] taxonomy, the [`Platform`]
//! flag and the page envelopes (re-exported from the [`pagination`] submodule).
//!
//! # Example
//!
//! ```rust
//! use atlassian_rest::api::common::ApiError;
//!
//! fn describe<T>(result: Result<T, ApiError>) -> String {
//!     match result {
//!         Ok(_) => "ok".to_string(),
//!         Err(ApiError::Http { message, .. }) => format!("vendor said: {message}"),
//!         Err(ApiError::HttpStatus { status, .. }) => format!("HTTP {status}"),
//!         Err(e) => e.to_string(),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transport::HttpResponse;

mod pagination;

pub use pagination::*;

/// Unified error type for all API operations.
///
/// Errors come in two fidelity tiers for HTTP failures, plus the usual
/// non-HTTP failures:
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `Configuration` | The caller asked for something the platform cannot do; no request was sent |
/// | `Http` | Status >= 400 with a readable vendor error envelope |
/// | `HttpStatus` | Status >= 400 without one (generic fallback) |
/// | `Network` | Connection, DNS or timeout failures |
/// | `InvalidUrl` | A base or continuation URL does not parse |
/// | `Decode` | A success body is not the expected JSON |
///
/// Nothing is retried: every variant propagates to the caller as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A caller-contract violation detected before any request was issued.
    ///
    /// # Parameters
    ///
    /// - `0` - What was wrong with the call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A normalized vendor error.
    ///
    /// `message` is the envelope's `error.message`, followed by
    /// `error.detail` on its own line when present.
    #[error("{message}")]
    Http {
        /// Human-readable message composed from the error envelope
        message: String,
        /// The response that produced the error
        response: Box<HttpResponse>,
    },

    /// A non-success status whose body carried no usable error envelope.
    #[error("HTTP {status} for url: {url}")]
    HttpStatus {
        /// Response status
        status: StatusCode,
        /// Request URL
        url: String,
        /// The response that produced the error
        response: Box<HttpResponse>,
    },

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A success body did not decode into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// The HTTP status, for the two HTTP variants.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// The attached response, for the two HTTP variants.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Http { response, .. } | Self::HttpStatus { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// Returns `true` when the error came from a decoded vendor envelope.
    pub fn is_normalized(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

/// Which deployment flavour the client talks to.
///
/// Several pagination styles only exist on one flavour; the pager checks the
/// platform before it sends anything.
///
/// # Variants
///
/// * `Cloud` - Jira Cloud (`*.atlassian.net`) or Bitbucket Cloud
/// * `Server` - Jira or Bitbucket Server/Data Center on a custom host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Atlassian Cloud
    #[default]
    Cloud,

    /// Server or Data Center
    #[serde(alias = "datacenter", alias = "dc")]
    Server,
}

impl Platform {
    /// Returns `true` for [`Platform::Cloud`].
    pub fn is_cloud(self) -> bool {
        matches!(self, Self::Cloud)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloud => write!(f, "cloud"),
            Self::Server => write!(f, "server"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::configuration("token paging needs cloud");
        assert_eq!(err.to_string(), "Configuration error: token paging needs cloud");

        let response = HttpResponse::new(StatusCode::NOT_FOUND, "https://x.test/a", "");
        let err = ApiError::HttpStatus {
            status: StatusCode::NOT_FOUND,
            url: "https://x.test/a".to_string(),
            response: Box::new(response),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found for url: https://x.test/a");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(!err.is_normalized());
    }

    #[test]
    fn test_platform_serde() {
        #[derive(Deserialize)]
        struct Holder {
            platform: Platform,
        }

        let holder: Holder = toml::from_str("platform = \"dc\"").unwrap();
        assert_eq!(holder.platform, Platform::Server);
        let holder: Holder = toml::from_str("platform = \"cloud\"").unwrap();
        assert!(holder.platform.is_cloud());
    }
}
