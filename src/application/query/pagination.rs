// SPDX-License-Identifier: MPL-2.0
//! Date filtering and fixed-size pagination over a [`GalleryIndex`].
//!
//! [`page`] is a pure function of `(gallery, filter, page_number)`. The
//! caller's accumulated display list lives in [`DisplayWindow`], which only
//! accepts the page that directly follows the ones it already holds, so a page
//! delivered twice is never rendered twice. [`PageCursor`] carries the
//! `loading` / `has_more` guards that keep scroll-triggered loads from
//! overlapping.

use crate::application::index::GalleryIndex;
use crate::domain::gallery::{DateFilter, ImageRecord};

// =============================================================================
// Page Query
// =============================================================================

/// One page of the filtered gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    /// 1-based page number this view was computed for.
    pub page_number: usize,
    /// Records on this page, newest first.
    pub items: Vec<&'a ImageRecord>,
    /// `true` iff `page_number * page_size < filtered_len`.
    pub has_more: bool,
    /// Size of the whole filtered subset.
    pub filtered_len: usize,
}

/// Computes page `page_number` (1-based) of the images passing `filter`.
///
/// Page 0 is the "nothing loaded yet" position: it has no items, and
/// `has_more` tells whether page 1 would have any.
#[must_use]
pub fn page(
    gallery: &GalleryIndex,
    filter: DateFilter,
    page_number: usize,
    page_size: usize,
) -> PageView<'_> {
    let page_size = page_size.max(1);
    let filtered_len = gallery.filtered_len(filter);
    let items = match page_number.checked_sub(1) {
        Some(previous_pages) => gallery
            .filtered(filter)
            .skip(previous_pages.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    PageView {
        page_number,
        items,
        has_more: page_number.saturating_mul(page_size) < filtered_len,
        filtered_len,
    }
}

// =============================================================================
// Page Cursor
// =============================================================================

/// Paging position and load guards for one filter/gallery generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCursor {
    page: usize,
    has_more: bool,
    loading: bool,
}

impl PageCursor {
    /// A cursor before page 1 of a subset holding `filtered_len` images.
    #[must_use]
    pub fn start(filtered_len: usize) -> Self {
        Self {
            page: 0,
            has_more: filtered_len > 0,
            loading: false,
        }
    }

    /// Last page delivered (0 if none).
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Claims the next page for loading.
    ///
    /// Returns `None` (and changes nothing) while a load is in flight or when
    /// every page has been delivered.
    pub fn begin(&mut self) -> Option<usize> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(self.page + 1)
    }

    /// Records the outcome of the load started by [`begin`](Self::begin).
    pub fn finish(&mut self, page_number: usize, has_more: bool) {
        self.page = page_number;
        self.has_more = has_more;
        self.loading = false;
    }
}

// =============================================================================
// Display Window
// =============================================================================

/// The records currently handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayWindow {
    items: Vec<ImageRecord>,
    pages: usize,
}

impl DisplayWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `view` if it is the page right after the ones already shown.
    ///
    /// Returns `false` for a stale or repeated page, which is ignored.
    pub fn append(&mut self, view: &PageView<'_>) -> bool {
        if view.page_number != self.pages + 1 {
            return false;
        }
        self.items.extend(view.items.iter().map(|record| (*record).clone()));
        self.pages = view.page_number;
        true
    }

    /// Removes one entry (e.g. an image that failed to render).
    ///
    /// Returns `true` if the key was displayed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|record| record.key != key);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pages = 0;
    }

    #[must_use]
    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    /// Number of pages appended so far.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
