// SPDX-License-Identifier: MPL-2.0
//! Snapshot of the full-size viewer for rendering.

use crate::domain::gallery::ImageRecord;
use crate::media::format_file_size;
use chrono::{FixedOffset, Local};

/// Display format of the capture timestamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the viewer modal shows for the open image.
///
/// This is a read-only snapshot; it is rebuilt on every call so the boundary
/// flags always reflect the current subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerInfo {
    pub key: String,
    pub file_name: String,
    /// Human-readable size, e.g. `"2.40 MB"` or `"48.8 KB"`.
    pub size_label: String,
    pub content_type: String,
    /// Last-modified time in the gallery's time zone.
    pub taken_at: String,
    /// Full-size image URL.
    pub url: String,
    /// 1-based position in the filtered subset.
    pub position: usize,
    /// Size of the filtered subset.
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl ViewerInfo {
    pub(super) fn new(
        record: &ImageRecord,
        url: String,
        index: usize,
        total: usize,
        zone: Option<FixedOffset>,
    ) -> Self {
        let taken_at = match zone {
            Some(tz) => record
                .last_modified
                .with_timezone(&tz)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => record
                .last_modified
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        };

        Self {
            key: record.key.clone(),
            file_name: record.file_name().to_string(),
            size_label: format_file_size(record.size),
            content_type: record.content_type.clone(),
            taken_at,
            url,
            position: index + 1,
            total,
            has_previous: index > 0,
            has_next: index + 1 < total,
        }
    }

    /// `"n / N"` position label.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }
}
