// SPDX-License-Identifier: MPL-2.0
//! Pagination engine deriving a bounded page window over a prepared sequence.
//!
//! The engine holds only the window arithmetic (current page, page size,
//! total item count); the caller keeps the data and hands a slice to
//! [`Paginator::current_items`] when rendering. The engine never observes
//! the input, so callers call [`Paginator::set_total_items`] or
//! [`Paginator::reset`] whenever the underlying sequence changes.

use crate::config::{DEFAULT_PAGE_SIZE, MIN_PAGE_SIZE};
use std::ops::Range;

/// Number of items per page.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always at least 1 so page arithmetic can never divide by zero.
///
/// # Example
///
/// ```
/// use statekit::pagination::PageSize;
///
/// let size = PageSize::new(25);
/// assert_eq!(size.value(), 25);
///
/// // Zero is clamped to the minimum
/// let zero = PageSize::new(0);
/// assert_eq!(zero.value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a new page size, clamping zero to the minimum of 1.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(MIN_PAGE_SIZE))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl From<usize> for PageSize {
    /// Converts with the same clamping as [`PageSize::new`].
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

/// Read-only snapshot of the window arithmetic for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based index of the page currently shown.
    pub current_page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Length of the underlying sequence as last reported by the caller.
    pub total_items: usize,
    /// Total page count; at least 1 even for an empty sequence.
    pub total_pages: usize,
}

/// Derives a bounded page window over an externally filtered/sorted sequence.
///
/// `current_page` is 1-based and always within `[1, total_pages]`; every
/// operation that would leave that range clamps instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: PageSize,
    current_page: usize,
    total_items: usize,
}

impl Paginator {
    /// Creates a paginator on page 1 with no items reported yet.
    ///
    /// Takes either an explicit [`PageSize`] or a plain count, which is
    /// clamped the same way.
    #[must_use]
    pub fn new(page_size: impl Into<PageSize>) -> Self {
        Self {
            page_size: page_size.into(),
            current_page: 1,
            total_items: 0,
        }
    }

    /// Builder-style variant of [`set_total_items`](Self::set_total_items).
    #[must_use]
    pub fn with_total_items(mut self, total: usize) -> Self {
        self.set_total_items(total);
        self
    }

    /// Returns the configured page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.value()
    }

    /// Returns the current 1-based page index.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the item count last reported by the caller.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the total page count, at least 1 even when empty.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size.value()).max(1)
    }

    /// Reports a new item count and re-clamps the current page into range.
    ///
    /// Call this whenever the underlying filtered/sorted sequence changes
    /// in size; [`reset`](Self::reset) instead jumps back to page 1.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }

    /// Moves to the given 1-based page, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    /// Moves one page forward; no-op on the last page.
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.current_page += 1;
        }
    }

    /// Moves one page back; no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.current_page -= 1;
        }
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Whether a page exists after the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Whether a page exists before the current one.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Index range of the current window, clamped to the reported count.
    #[must_use]
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size.value();
        let end = (start + self.page_size.value()).min(self.total_items);
        start.min(self.total_items)..end
    }

    /// Returns the current page window of `source`.
    ///
    /// The bounds are clamped to `source`, so a source shorter than the
    /// reported total yields a shorter (possibly empty) window instead of
    /// panicking.
    #[must_use]
    pub fn current_items<'a, T>(&self, source: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1) * self.page_size.value();
        if start >= source.len() {
            return &[];
        }
        let end = (start + self.page_size.value()).min(source.len());
        &source[start..end]
    }

    /// Snapshot of the window arithmetic.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow {
            current_page: self.current_page,
            page_size: self.page_size.value(),
            total_items: self.total_items,
            total_pages: self.total_pages(),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
