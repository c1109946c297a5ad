//
//  atlassian-rest
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Descriptors
//!
//! A [`RequestDescriptor`] describes one HTTP call: method, path, query
//! parameters, optional JSON body and extra headers. The transport turns it
//! into a real request; the pager derives a fresh descriptor for every page.
//!
//! ## Relative vs Absolute
//!
//! | `absolute` | `path` is joined with | Query params | Trailing slash |
//! |------------|-----------------------|--------------|----------------|
//! | `false` | the client's base URL | merged | honoured |
//! | `true` | nothing (used verbatim) | none added by the pager | never touched |
//!
//! ```rust
//! use atlassian_rest::api::RequestDescriptor;
//!
//! let request = RequestDescriptor::get("rest/api/2/project/search")
//!     .with_param("expand", "lead")
//!     .with_param("expand", "description");
//!
//! // Keys are unique: the second call replaced the first value.
//! assert_eq!(request.params.get("expand"), Some("description"));
//! assert_eq!(request.params.len(), 1);
//! ```

use reqwest::Method;
use serde_json::Value;

/// Ordered query parameters with unique keys.
///
/// Insertion order is preserved so the wire order is predictable. Setting a
/// key that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing an existing entry for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the pairs as a slice, the shape `reqwest` expects for `.query()`.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// Description of a single HTTP call against an Atlassian REST API.
///
/// Built by endpoint code with the `with_*` builder methods, then handed to a
/// [`Transport`](super::Transport) or to [`fetch_pages`](super::fetch_pages).
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `method` | HTTP method |
/// | `path` | Path relative to the API base, or a full URL when `absolute` |
/// | `params` | Query parameters (unique keys, ordered) |
/// | `body` | Optional JSON body |
/// | `headers` | Extra headers for this call only |
/// | `trailing` | `Some(true)` forces a trailing slash on relative paths |
/// | `absolute` | `path` is already a fully-qualified URL |
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// The HTTP method.
    pub method: Method,
    /// Relative path or, when `absolute` is set, a full URL.
    pub path: String,
    /// Query parameters.
    pub params: QueryParams,
    /// JSON request body.
    pub body: Option<Value>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
    /// Trailing slash handling for relative paths.
    pub trailing: Option<bool>,
    /// Whether `path` is a fully-qualified URL.
    pub absolute: bool,
}

impl RequestDescriptor {
    /// Creates a descriptor for `method` on `path` with nothing else set.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            body: None,
            headers: Vec::new(),
            trailing: None,
            absolute: false,
        }
    }

    /// Shorthand for a `GET` descriptor.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` descriptor.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a `PUT` descriptor.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a `DELETE` descriptor.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets one query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.set(key, value);
        self
    }

    /// Replaces all query parameters.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds an extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets trailing slash handling.
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = Some(trailing);
        self
    }

    /// Marks `path` as a fully-qualified URL.
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }

    /// Derives the descriptor for a server-supplied continuation URL.
    ///
    /// The URL already carries every parameter the server wants, so the
    /// result has no query parameters, no trailing-slash handling and is
    /// absolute. Method, body and extra headers are kept.
    pub fn follow(&self, url: impl Into<String>) -> Self {
        Self {
            method: self.method.clone(),
            path: url.into(),
            params: QueryParams::new(),
            body: self.body.clone(),
            headers: self.headers.clone(),
            trailing: Some(false),
            absolute: true,
        }
    }
}
