// SPDX-License-Identifier: MPL-2.0
//! Calendar-day normalization.
//!
//! Timestamps are grouped by the calendar day they fall on in a given time
//! zone (the local one in the application). A [`NaiveDate`] stands for that
//! day's local midnight: two records taken at 00:05 and 23:55 on the same local
//! day share one day, regardless of their UTC dates.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Calendar day of `timestamp` in the local time zone.
#[must_use]
pub fn local_day(timestamp: &DateTime<Utc>) -> NaiveDate {
    day_in(timestamp, &Local)
}

/// Calendar day of `timestamp` in `tz`.
#[must_use]
pub fn day_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Distinct calendar days that have content, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSet {
    days: Vec<NaiveDate>,
}

impl DateSet {
    /// Builds a set from arbitrary days; duplicates collapse.
    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut days: Vec<NaiveDate> = days.into_iter().collect();
        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();
        Self { days }
    }

    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        // Sorted descending, so compare reversed.
        self.days.binary_search_by(|probe| day.cmp(probe)).is_ok()
    }

    /// Most recent day with content.
    #[must_use]
    pub fn latest(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Oldest day with content.
    #[must_use]
    pub fn earliest(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.days
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_local_day_regardless_of_time_of_day() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // 22:30 UTC on the 4th is 00:30 on the 5th at UTC+2.
        let late = Utc.with_ymd_and_hms(2024, 5, 4, 22, 30, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 5, 5, 21, 0, 0).unwrap();

        assert_eq!(day_in(&late, &tz), ymd(2024, 5, 5));
        assert_eq!(day_in(&late, &tz), day_in(&evening, &tz));
    }

    #[test]
    fn negative_offset_moves_to_previous_day() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
        assert_eq!(day_in(&early, &tz), ymd(2023, 12, 31));
    }

    #[test]
    fn date_set_is_unique_and_descending() {
        let set = DateSet::from_days([
            ymd(2024, 1, 2),
            ymd(2024, 3, 1),
            ymd(2024, 1, 2),
            ymd(2023, 12, 25),
            ymd(2024, 3, 1),
        ]);

        assert_eq!(
            set.as_slice(),
            &[ymd(2024, 3, 1), ymd(2024, 1, 2), ymd(2023, 12, 25)]
        );
        assert!(set.as_slice().windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn date_set_lookup_and_bounds() {
        let set = DateSet::from_days([ymd(2024, 1, 2), ymd(2024, 3, 1), ymd(2023, 12, 25)]);

        assert!(set.contains(ymd(2024, 1, 2)));
        assert!(!set.contains(ymd(2024, 1, 3)));
        assert_eq!(set.latest(), Some(ymd(2024, 3, 1)));
        assert_eq!(set.earliest(), Some(ymd(2023, 12, 25)));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn empty_date_set() {
        let set = DateSet::default();
        assert!(set.is_empty());
        assert_eq!(set.latest(), None);
        assert!(!set.contains(ymd(2024, 1, 1)));
    }
}
