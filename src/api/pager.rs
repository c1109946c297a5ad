//
//  atlassian-rest
//  api/pager.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Paged Fetcher
//!
//! [`fetch_pages`] turns a listing request into a lazy [`Iterator`] over its
//! items, whatever paging protocol the endpoint speaks. Each call to
//! [`Iterator::next`] either hands out a buffered item or performs exactly one
//! blocking request for the next page.
//!
//! ## Lifecycle
//!
//! ```text
//! fetch_pages() ──► Pages (no request yet)
//!                     │ next()
//!                     ▼
//!              buffer empty? ──yes──► send(request) ──► decode_page()
//!                     │ no                                  │
//!                     ▼                                     ▼
//!               yield item                 empty page ──► finished
//!                                          otherwise  ──► buffer items,
//!                                                         derive next request
//! ```
//!
//! Once the server hands out its first continuation URL, every later request
//! is absolute and carries no extra query parameters: the URL is used exactly
//! as the server wrote it.
//!
//! ## Errors
//!
//! A failed page ends the sequence: that `next()` returns `Some(Err(_))` and
//! every later call returns `None`. Items already yielded stay yielded.
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_rest::api::{AtlassianClient, PageOptions, RequestDescriptor};
//! use atlassian_rest::api::common::{PaginationStyle, Platform};
//! use serde_json::Value;
//!
//! let client = AtlassianClient::new("https://api.bitbucket.org/2.0", Platform::Cloud)?;
//! let request = RequestDescriptor::get("repositories/my-workspace").with_param("pagelen", 100);
//!
//! for repo in client.paged::<Value>(request, PaginationStyle::Link, PageOptions::default())? {
//!     println!("{}", repo?["full_name"]);
//! }
//! # Ok::<(), atlassian_rest::api::ApiError>(())
//! ```

use std::collections::VecDeque;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::common::{ApiError, Continuation, PaginationStyle, Platform, PAGE_PARAM, TOKEN_PARAM};
use super::request::RequestDescriptor;
use super::transport::Transport;

/// Per-call paging knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Ignore Bitbucket's `next` links and count `page=1, 2, 3, ...` locally
    /// until an empty page comes back (BCLOUD-13806). Link style only.
    pub page_workaround: bool,

    /// Stop after this many items, even if the server has more.
    pub limit: Option<usize>,
}

impl PageOptions {
    /// Options with the Bitbucket paging workaround enabled.
    pub fn with_page_workaround() -> Self {
        Self {
            page_workaround: true,
            ..Self::default()
        }
    }

    /// Sets the client-side item limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Starts a lazy paged fetch.
///
/// Validates the call against `platform` and returns the iterator. Nothing is
/// sent until the first item is requested.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] without touching the network when:
/// - `style` is not available on `platform` (token paging outside Cloud)
/// - `options.page_workaround` is set for a style other than
///   [`PaginationStyle::Link`]
pub fn fetch_pages<C, T>(
    transport: C,
    platform: Platform,
    request: RequestDescriptor,
    style: PaginationStyle,
    options: PageOptions,
) -> Result<Pages<C, T>, ApiError>
where
    C: Transport,
    T: DeserializeOwned,
{
    if !style.supported_on(platform) {
        return Err(ApiError::configuration(format!(
            "{style} pagination is not available on the {platform} platform"
        )));
    }
    if options.page_workaround && style != PaginationStyle::Link {
        return Err(ApiError::configuration(format!(
            "the paging workaround only applies to link pagination, not {style}"
        )));
    }

    let mut request = request;
    let mut page_number = 0;
    if options.page_workaround {
        page_number = 1;
        request.params.set(PAGE_PARAM, page_number);
    }

    Ok(Pages {
        transport,
        style,
        options,
        pending: Some(request),
        buffer: VecDeque::new(),
        page_number,
        yielded: 0,
        requests_issued: 0,
        _item: PhantomData,
    })
}

/// Lazy sequence of items across pages. Created by [`fetch_pages`].
pub struct Pages<C, T> {
    transport: C,
    style: PaginationStyle,
    options: PageOptions,
    /// Request for the next page; `None` once paging is finished.
    pending: Option<RequestDescriptor>,
    buffer: VecDeque<T>,
    page_number: u32,
    yielded: usize,
    requests_issued: usize,
    _item: PhantomData<fn() -> T>,
}

impl<C, T> Pages<C, T>
where
    C: Transport,
    T: DeserializeOwned,
{
    /// Number of HTTP requests issued so far.
    pub fn requests_issued(&self) -> usize {
        self.requests_issued
    }

    /// The pagination style driving this sequence.
    pub fn style(&self) -> PaginationStyle {
        self.style
    }

    fn limit_reached(&self) -> bool {
        self.options.limit.is_some_and(|limit| self.yielded >= limit)
    }

    /// Fetches one page into the buffer and prepares the request after it.
    fn fetch_next_page(&mut self) -> Result<(), ApiError> {
        let Some(request) = self.pending.take() else {
            return Ok(());
        };

        tracing::debug!(
            path = %request.path,
            absolute = request.absolute,
            page = self.requests_issued + 1,
            style = %self.style,
            "fetching page"
        );
        self.requests_issued += 1;
        let body = self.transport.send(&request)?;
        let page = self.style.decode_page::<T>(body, &request)?;

        if page.items.is_empty() {
            tracing::trace!("empty page, paging finished");
            return Ok(());
        }
        self.buffer.extend(page.items);
        self.pending = self.next_request(request, page.continuation);
        Ok(())
    }

    fn next_request(
        &mut self,
        current: RequestDescriptor,
        continuation: Continuation,
    ) -> Option<RequestDescriptor> {
        if self.options.page_workaround {
            self.page_number += 1;
            let mut next = current;
            next.params.set(PAGE_PARAM, self.page_number);
            return Some(next);
        }

        match continuation {
            Continuation::Done => {
                tracing::trace!("server announced the last page");
                None
            }
            Continuation::Url(url) => Some(current.follow(url)),
            Continuation::Token(token) => {
                let mut next = current;
                next.params.set(TOKEN_PARAM, token);
                Some(next)
            }
            Continuation::StartAt { param, offset } => {
                let mut next = current;
                next.params.set(param, offset);
                Some(next)
            }
        }
    }
}

impl<C, T> Iterator for Pages<C, T>
where
    C: Transport,
    T: DeserializeOwned,
{
    type Item = Result<T, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.limit_reached() {
                self.pending = None;
                self.buffer.clear();
                return None;
            }
            if let Some(item) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(item));
            }
            self.pending.as_ref()?;
            if let Err(e) = self.fetch_next_page() {
                self.pending = None;
                return Some(Err(e));
            }
        }
    }
}

impl<C, T> std::fmt::Debug for Pages<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages")
            .field("style", &self.style)
            .field("options", &self.options)
            .field("pending", &self.pending)
            .field("buffered", &self.buffer.len())
            .field("yielded", &self.yielded)
            .field("requests_issued", &self.requests_issued)
            .finish()
    }
}
