// SPDX-License-Identifier: MPL-2.0
//! Core gallery records for the domain layer.
//!
//! These types represent pure data without any transport dependencies.

use chrono::{DateTime, Utc};

/// One entry of a bucket listing.
///
/// Produced by the listing client and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Store-relative object key, unique within a bucket.
    pub key: String,
    /// Last modification time reported by the store.
    pub last_modified: DateTime<Utc>,
}

impl ObjectRecord {
    #[must_use]
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            last_modified,
        }
    }
}

/// A listed object enriched with the headers of its metadata probe.
///
/// # Example
///
/// ```
/// use bucket_lens::domain::gallery::{ImageRecord, ObjectRecord};
/// use chrono::{TimeZone, Utc};
///
/// let listed = ObjectRecord::new("2024/beach.jpg", Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap());
/// let image = ImageRecord::from_object(listed, 48_000, "image/jpeg");
///
/// assert_eq!(image.file_name(), "beach.jpg");
/// assert_eq!(image.size, 48_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    /// Object size in bytes (`Content-Length`).
    pub size: u64,
    /// MIME type (`Content-Type`), `"unknown"` when the store omits it.
    pub content_type: String,
}

impl ImageRecord {
    /// Combines a listing entry with probed metadata.
    #[must_use]
    pub fn from_object(object: ObjectRecord, size: u64, content_type: impl Into<String>) -> Self {
        Self {
            key: object.key,
            last_modified: object.last_modified,
            size,
            content_type: content_type.into(),
        }
    }

    /// Last path segment of the key, used as a display title.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}
