//
//  atlassian-rest
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Detection Module
//!
//! Decides whether a host belongs to Atlassian Cloud or to a self-hosted
//! Server/Data Center instance, and normalizes host strings for comparison.
//!
//! ## Cloud vs Server/Data Center
//!
//! | Product | Cloud hostname | Server/DC hostname |
//! |---------|----------------|--------------------|
//! | Jira | `<site>.atlassian.net`, `<site>.jira.com` | Custom |
//! | Bitbucket | `bitbucket.org`, `api.bitbucket.org` | Custom |
//!
//! ## Usage
//!
//! ```rust
//! use atlassian_rest::api::common::Platform;
//! use atlassian_rest::config::{detect_platform, is_cloud_host, normalize_host};
//!
//! assert!(is_cloud_host("acme.atlassian.net"));
//! assert!(!is_cloud_host("jira.acme.com"));
//! assert_eq!(normalize_host("https://BITBUCKET.ORG/"), "bitbucket.org");
//! assert_eq!(detect_platform("https://api.bitbucket.org/2.0"), Platform::Cloud);
//! ```

use url::Url;

use crate::api::common::Platform;

/// The primary hostname for Bitbucket Cloud.
pub const BITBUCKET_CLOUD: &str = "bitbucket.org";

/// The API hostname for Bitbucket Cloud.
///
/// REST API 2.0 endpoints are served from this hostname.
pub const BITBUCKET_API: &str = "api.bitbucket.org";

/// Domain suffixes of Atlassian Cloud sites.
pub const CLOUD_SITE_SUFFIXES: &[&str] = &[".atlassian.net", ".jira.com"];

/// Checks if a hostname corresponds to Atlassian Cloud.
///
/// # Parameters
///
/// * `host` - The hostname to check, with or without scheme
///
/// # Returns
///
/// - `true` - Bitbucket Cloud or a Jira Cloud site
/// - `false` - Anything else (assumed Server/DC)
pub fn is_cloud_host(host: &str) -> bool {
    let host = normalize_host(host);
    host == BITBUCKET_CLOUD
        || host == BITBUCKET_API
        || CLOUD_SITE_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
}

/// Detects the platform of a base URL from its host.
///
/// Unparseable URLs are treated as bare host names.
pub fn detect_platform(url: &str) -> Platform {
    let host = host_of(url).unwrap_or_else(|| normalize_host(url));
    if is_cloud_host(&host) {
        Platform::Cloud
    } else {
        Platform::Server
    }
}

/// Extracts the lower-cased host of `url`.
///
/// Bare host names (no scheme) are accepted as well.
pub fn host_of(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_lowercase),
        Err(_) => {
            let host = normalize_host(url);
            let host = host.split('/').next().unwrap_or_default();
            (!host.is_empty()).then(|| host.to_string())
        }
    }
}

/// Normalizes a host URL to a consistent format.
///
/// Strips the scheme and trailing slash, and lower-cases the result.
///
/// # Examples
///
/// ```rust
/// use atlassian_rest::config::normalize_host;
///
/// assert_eq!(normalize_host("https://Acme.Atlassian.net/"), "acme.atlassian.net");
/// assert_eq!(normalize_host("  jira.example.com "), "jira.example.com");
/// ```
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.strip_suffix('/').unwrap_or(host);
    host.to_lowercase()
}
