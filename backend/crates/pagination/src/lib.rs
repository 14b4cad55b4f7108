//! Page-number pagination primitives shared by backend endpoints.
//!
//! The feed accepts an arbitrary `page` query token. The boundary policy
//! is deliberately forgiving and must stay stable:
//!
//! - a token that does not parse as a positive integer selects page 1;
//! - a page number beyond the last page clamps to the last page;
//! - an empty collection still yields a single empty page.
//!
//! Requests therefore never fail because of a bad page token.

use std::num::{IntErrorKind, NonZeroUsize};

use serde::Serialize;

/// Page size used by the home feed.
pub const FEED_PAGE_SIZE: usize = 5;

/// Error returned when constructing a paginator with an invalid size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The page size was zero.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Splits an ordered collection into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroUsize,
}

impl Paginator {
    /// Build a paginator with the given page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        NonZeroUsize::new(page_size)
            .map(|page_size| Self { page_size })
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Page size this paginator slices with.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of pages needed for `total_items`, never less than one.
    #[must_use]
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size.get()).max(1)
    }

    /// Resolve a raw page token against the collection size.
    ///
    /// Non-numeric, missing, and non-positive tokens resolve to page 1;
    /// numbers past the end clamp to the last page, including integers
    /// too large for `usize`.
    #[must_use]
    pub fn resolve_page(&self, token: Option<&str>, total_items: usize) -> usize {
        let requested = token
            .and_then(|raw| match raw.trim().parse::<usize>() {
                Ok(page) => Some(page),
                // A positive integer past usize range is still past the
                // end, so it clamps rather than falling back to page 1.
                Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
                Err(_) => None,
            })
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        requested.min(self.total_pages(total_items))
    }

    /// Slice `items` into the page selected by `token`.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>, token: Option<&str>) -> Page<T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);
        let number = self.resolve_page(token, total_items);
        let offset = (number - 1).saturating_mul(self.page_size.get());
        let items = items
            .into_iter()
            .skip(offset)
            .take(self.page_size.get())
            .collect();
        Page {
            items,
            number,
            total_pages,
            total_items,
        }
    }
}

/// One page of an ordered collection plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    total_pages: usize,
    total_items: usize,
}

impl<T> Page<T> {
    /// Items on this page, in the collection's order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based page number after boundary resolution.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Total number of pages (at least one).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Navigation metadata for serialization in view envelopes.
    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        PageMeta {
            number: self.number,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        }
    }

    /// Map the page's items while preserving its metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Self {
            items,
            number,
            total_pages,
            total_items,
        } = self;
        Page {
            items: items.into_iter().map(f).collect(),
            number,
            total_pages,
            total_items,
        }
    }
}

/// Serializable page navigation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// One-based page number.
    pub number: usize,
    /// Total number of pages (at least one).
    pub total_pages: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}
