// SPDX-License-Identifier: MPL-2.0
//! Date filter for the gallery.
//!
//! This module contains the pure filter type without I/O. The filter either
//! selects a single calendar day or, when inactive, every day.

use chrono::NaiveDate;

/// Selects the records shown in the gallery by calendar day.
///
/// `None` means "all dates".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFilter {
    /// Selected local day, if any.
    pub selected: Option<NaiveDate>,
}

impl DateFilter {
    /// Creates a filter with no active criteria (matches every day).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter restricted to `day`.
    #[must_use]
    pub fn on(day: NaiveDate) -> Self {
        Self {
            selected: Some(day),
        }
    }

    /// Returns `true` if a record whose normalized day is `day` passes.
    ///
    /// This is a pure domain check; the caller normalizes the record's timestamp.
    #[must_use]
    pub fn matches_day(&self, day: NaiveDate) -> bool {
        self.selected.is_none_or(|selected| selected == day)
    }

    /// Returns `true` if a day is selected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    /// Resets the filter to "all dates".
    pub fn clear(&mut self) {
        self.selected = None;
    }
}
