//
//  atlassian-rest
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Named host profiles stored in a TOML file. Each profile describes one
//! Atlassian deployment: its base URL, platform, resource path segments,
//! timeout and any headers to send with every request.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/atlassian-rest/config.toml`
//! - **macOS**: `~/Library/Application Support/atlassian-rest/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\atlassian-rest\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [hosts.jira]
//! url = "https://example.atlassian.net"
//! api_root = "rest/api"
//! api_version = "3"
//! timeout_secs = 30
//!
//! [hosts.bitbucket]
//! url = "https://api.bitbucket.org/2.0"
//! platform = "cloud"
//!
//! [hosts.bitbucket.headers]
//! Accept = "application/json"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_rest::api::AtlassianClient;
//! use atlassian_rest::config::Config;
//!
//! let config = Config::load()?;
//! if let Some(host) = config.host_config("jira") {
//!     let client = AtlassianClient::from_config(host)?;
//!     println!("Talking to {}", client.base_url());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: Host detection and normalization

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::common::Platform;

/// Top-level configuration: a map of profile name to host settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Host profiles by name
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

/// Settings for one Atlassian deployment.
///
/// # Fields
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `url` | required | Base URL relative paths are joined to |
/// | `platform` | detected from `url` | `cloud` or `server` |
/// | `api_root` | none | First resource path segment, e.g. `rest/api` |
/// | `api_version` | none | Second resource path segment, e.g. `2` |
/// | `timeout_secs` | 75 | Request timeout |
/// | `headers` | empty | Headers sent with every request |
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HostConfig {
    /// Base URL of the deployment.
    pub url: String,

    /// Cloud or Server/DC. Detected from `url` when absent.
    #[serde(default)]
    pub platform: Option<Platform>,

    /// First segment of resource paths.
    #[serde(default)]
    pub api_root: Option<String>,

    /// Version segment of resource paths.
    #[serde(default)]
    pub api_version: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Extra headers for every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl HostConfig {
    /// The effective platform: explicit setting, or detection from the URL.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(|| detect_platform(&self.url))
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "atlassian-rest")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Looks up a host profile by name.
    pub fn host_config(&self, name: &str) -> Option<&HostConfig> {
        self.hosts.get(name)
    }

    /// Looks up the first profile whose URL points at `host`.
    ///
    /// `host` may be a bare host name or a full URL; only the host part is
    /// compared.
    pub fn host_for(&self, host: &str) -> Option<&HostConfig> {
        let wanted = host_of(host).unwrap_or_else(|| normalize_host(host));
        self.hosts
            .values()
            .find(|config| host_of(&config.url).is_some_and(|h| h == wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[hosts.jira]
url = "https://example.atlassian.net"
api_root = "rest/api"
api_version = "3"
timeout_secs = 30

[hosts.dc]
url = "https://jira.internal.example.com"

[hosts.bitbucket]
url = "https://api.bitbucket.org/2.0"
platform = "cloud"

[hosts.bitbucket.headers]
Accept = "application/json"
"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.hosts.len(), 3);

        let jira = config.host_config("jira").unwrap();
        assert_eq!(jira.api_version.as_deref(), Some("3"));
        assert_eq!(jira.platform(), Platform::Cloud);

        let dc = config.host_config("dc").unwrap();
        assert_eq!(dc.platform(), Platform::Server);

        let bitbucket = config.host_config("bitbucket").unwrap();
        assert_eq!(bitbucket.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[hosts.jira]\nurl = 42\n").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_host_for() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let found = config.host_for("https://API.bitbucket.org/").unwrap();
        assert_eq!(found.url, "https://api.bitbucket.org/2.0");
        assert!(config.host_for("gitlab.com").is_none());
    }

    #[test]
    fn test_host_for_full_url() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let found = config.host_for("https://api.bitbucket.org/2.0").unwrap();
        assert_eq!(found.url, "https://api.bitbucket.org/2.0");
        assert!(config.host_for("api.bitbucket.org").is_some());

        let jira = config.host_for("https://example.atlassian.net/rest/api/3/myself");
        assert_eq!(jira.and_then(|h| h.api_version.as_deref()), Some("3"));
    }
}
