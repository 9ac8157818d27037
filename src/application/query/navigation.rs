// SPDX-License-Identifier: MPL-2.0
//! Viewer navigation: stepping between images and between calendar days.
//!
//! Image navigation works on the filtered subset the viewer was opened from,
//! newest first. There is no wrap-around: at either end the step yields `None`
//! and the caller keeps its current selection.
//!
//! Day navigation moves the selected day by one calendar day. Going back is
//! always allowed; going forward stops at today.

use crate::domain::gallery::ImageRecord;
use chrono::{Days, NaiveDate};

// =============================================================================
// Image Navigation
// =============================================================================

/// Position of `key` within `subset`.
#[must_use]
pub fn position_of(subset: &[&ImageRecord], key: &str) -> Option<usize> {
    subset.iter().position(|record| record.key == key)
}

/// The record just before `key` (newer), if any.
#[must_use]
pub fn previous<'a>(subset: &[&'a ImageRecord], key: &str) -> Option<&'a ImageRecord> {
    let idx = position_of(subset, key)?;
    idx.checked_sub(1).and_then(|prev| subset.get(prev)).copied()
}

/// The record just after `key` (older), if any.
#[must_use]
pub fn next<'a>(subset: &[&'a ImageRecord], key: &str) -> Option<&'a ImageRecord> {
    let idx = position_of(subset, key)?;
    subset.get(idx + 1).copied()
}

/// Returns `true` if `key` is in `subset` and is not its first record.
#[must_use]
pub fn has_previous(subset: &[&ImageRecord], key: &str) -> bool {
    position_of(subset, key).is_some_and(|idx| idx > 0)
}

/// Returns `true` if `key` is in `subset` and is not its last record.
#[must_use]
pub fn has_next(subset: &[&ImageRecord], key: &str) -> bool {
    position_of(subset, key).is_some_and(|idx| idx + 1 < subset.len())
}

// =============================================================================
// Day Navigation
// =============================================================================

/// The day before the selection.
///
/// With no selection, stepping back starts from `today`.
#[must_use]
pub fn previous_day(selected: Option<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
    selected.unwrap_or(today).checked_sub_days(Days::new(1))
}

/// The day after the selection, or `None` once the selection reached `today`.
///
/// With no selection there is nothing to step forward from.
#[must_use]
pub fn next_day(selected: Option<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
    if !has_next_date(selected, today) {
        return None;
    }
    selected.and_then(|day| day.checked_add_days(Days::new(1)))
}

/// Returns `true` if a later day can be selected.
///
/// A day after `today` counts as already past the stop, so the selection can
/// never walk further into the future.
#[must_use]
pub fn has_next_date(selected: Option<NaiveDate>, today: NaiveDate) -> bool {
    selected.is_some_and(|day| day < today)
}
