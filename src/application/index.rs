// SPDX-License-Identifier: MPL-2.0
//! Gallery index: the sorted, de-duplicated set of enriched images.
//!
//! The index is built once per refresh and never mutated afterwards; a newer
//! bucket snapshot produces a new index that replaces the old one wholesale.
//!
//! Invariants:
//! - keys are unique (the first occurrence in listing order wins)
//! - images are ordered by `last_modified`, newest first; ties keep listing order
//! - every image's calendar day is computed once, in the index's time zone,
//!   and the [`DateSet`] holds exactly those days

use crate::domain::gallery::{day_in, DateFilter, DateSet, ImageRecord};
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::HashSet;

/// Sorted gallery plus the calendar days that have content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryIndex {
    images: Vec<ImageRecord>,
    /// Calendar day of `images[i]`.
    days: Vec<NaiveDate>,
    date_set: DateSet,
}

impl GalleryIndex {
    /// Builds an index grouping days in the local time zone.
    #[must_use]
    pub fn build(records: Vec<ImageRecord>) -> Self {
        Self::build_in(records, &Local)
    }

    /// Builds an index grouping days in `tz`.
    #[must_use]
    pub fn build_in<Tz: TimeZone>(records: Vec<ImageRecord>, tz: &Tz) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut images: Vec<ImageRecord> = records
            .into_iter()
            .filter(|record| seen.insert(record.key.clone()))
            .collect();

        // `sort_by` is stable, so equal timestamps keep listing order.
        images.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        let days: Vec<NaiveDate> = images
            .iter()
            .map(|image| day_in(&image.last_modified, tz))
            .collect();
        let date_set = DateSet::from_days(days.iter().copied());

        Self {
            images,
            days,
            date_set,
        }
    }

    /// All images, newest first.
    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Distinct days with content, newest first.
    #[must_use]
    pub fn dates(&self) -> &DateSet {
        &self.date_set
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Calendar day of the image at `index`.
    #[must_use]
    pub fn day_at(&self, index: usize) -> Option<NaiveDate> {
        self.days.get(index).copied()
    }

    /// Looks up an image by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ImageRecord> {
        self.position(key).map(|idx| &self.images[idx])
    }

    /// Position of `key` in the full, unfiltered ordering.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.images.iter().position(|image| image.key == key)
    }

    /// Images passing `filter`, newest first.
    pub fn filtered(&self, filter: DateFilter) -> impl Iterator<Item = &ImageRecord> + '_ {
        self.images
            .iter()
            .zip(self.days.iter())
            .filter(move |(_, day)| filter.matches_day(**day))
            .map(|(image, _)| image)
    }

    /// Number of images passing `filter`.
    #[must_use]
    pub fn filtered_len(&self, filter: DateFilter) -> usize {
        match filter.selected {
            None => self.images.len(),
            Some(day) => self.count_on(day),
        }
    }

    /// Number of images taken on `day`.
    #[must_use]
    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.days.iter().filter(|d| **d == day).count()
    }

    /// Returns `true` if at least one image was taken on `day`.
    #[must_use]
    pub fn has_content(&self, day: NaiveDate) -> bool {
        self.date_set.contains(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::ObjectRecord;
    use chrono::{DateTime, FixedOffset, Utc};

    fn image(key: &str, rfc3339: &str) -> ImageRecord {
        let ts = DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc);
        ImageRecord::from_object(ObjectRecord::new(key, ts), 20_000, "image/jpeg")
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sorts_newest_first() {
        let index = GalleryIndex::build_in(
            vec![
                image("old.jpg", "2023-01-01T00:00:00Z"),
                image("new.jpg", "2024-06-01T00:00:00Z"),
                image("mid.jpg", "2023-08-15T12:00:00Z"),
            ],
            &utc(),
        );

        let keys: Vec<&str> = index.images().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["new.jpg", "mid.jpg", "old.jpg"]);
        assert!(index
            .images()
            .windows(2)
            .all(|w| w[0].last_modified >= w[1].last_modified));
    }

    #[test]
    fn ties_keep_listing_order() {
        let index = GalleryIndex::build_in(
            vec![
                image("b.jpg", "2024-01-01T10:00:00Z"),
                image("a.jpg", "2024-01-01T10:00:00Z"),
                image("c.jpg", "2024-01-01T10:00:00Z"),
            ],
            &utc(),
        );

        let keys: Vec<&str> = index.images().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["b.jpg", "a.jpg", "c.jpg"]);
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        let index = GalleryIndex::build_in(
            vec![
                image("a.jpg", "2024-01-01T10:00:00Z"),
                image("a.jpg", "2024-02-01T10:00:00Z"),
                image("b.jpg", "2024-01-05T10:00:00Z"),
            ],
            &utc(),
        );

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("a.jpg").map(|i| i.last_modified.to_rfc3339()),
            Some("2024-01-01T10:00:00+00:00".to_string())
        );
    }

    #[test]
    fn date_set_groups_by_local_day() {
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let index = GalleryIndex::build_in(
            vec![
                // 22:00 UTC on the 1st is already the 2nd at UTC+3.
                image("late.jpg", "2024-03-01T22:00:00Z"),
                image("morning.jpg", "2024-03-02T06:00:00Z"),
                image("earlier.jpg", "2024-02-27T12:00:00Z"),
            ],
            &plus_three,
        );

        assert_eq!(index.dates().as_slice(), &[ymd(2024, 3, 2), ymd(2024, 2, 27)]);
        assert_eq!(index.count_on(ymd(2024, 3, 2)), 2);
        assert!(index.has_content(ymd(2024, 2, 27)));
        assert!(!index.has_content(ymd(2024, 3, 1)));
    }

    #[test]
    fn filtered_respects_selected_day() {
        let index = GalleryIndex::build_in(
            vec![
                image("a.jpg", "2024-03-02T10:00:00Z"),
                image("b.jpg", "2024-03-01T10:00:00Z"),
                image("c.jpg", "2024-03-02T08:00:00Z"),
            ],
            &utc(),
        );

        let on_second = DateFilter::on(ymd(2024, 3, 2));
        let keys: Vec<&str> = index.filtered(on_second).map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["a.jpg", "c.jpg"]);
        assert_eq!(index.filtered_len(on_second), 2);

        let all = DateFilter::default();
        assert_eq!(index.filtered(all).count(), 3);
        assert_eq!(index.filtered_len(all), 3);
    }

    #[test]
    fn empty_index() {
        let index = GalleryIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.dates().is_empty());
        assert_eq!(index.day_at(0), None);
    }
}
