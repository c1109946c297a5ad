//
//  atlassian-rest
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level file operations used by [`Config`](super::Config).
//!
//! ## Error Handling
//!
//! All I/O operations use `anyhow::Result`, with the offending path attached
//! as context.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist
/// - The file cannot be opened (permissions, in use, etc.)
/// - The file contains invalid UTF-8 data
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use atlassian_rest::config::read_config_file;
///
/// let content = read_config_file(Path::new("/etc/atlassian-rest/config.toml"))?;
/// println!("Configuration:\n{}", content);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Checks if a configuration file exists.
///
/// Only regular files count; a directory at `path` returns `false`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
        assert!(!config_exists(&path));
        assert!(!config_exists(dir.path()));
    }
}
