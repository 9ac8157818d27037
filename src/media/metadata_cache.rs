// SPDX-License-Identifier: MPL-2.0
//! Per-key memoization of probed image metadata.
//!
//! A refresh re-lists the whole bucket; objects probed earlier in the session
//! are served from here instead of issuing another metadata request.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used records are evicted first
//! - **Count-bounded**: At most `capacity` records are kept
//! - **Key-indexed**: Records indexed by their object key
//! - **Explicit lifetime**: The controller clears it when the date filter changes
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = MetadataCache::new(capacity);
//!
//! if let Some(record) = cache.get(&key) {
//!     // Reuse without probing
//! }
//!
//! cache.insert(record);
//! ```

use crate::config::defaults::DEFAULT_METADATA_CACHE_CAPACITY;
use crate::domain::gallery::ImageRecord;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Statistics about metadata cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataCacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,

    /// Number of lookups that required a probe.
    pub misses: u64,

    /// Number of records evicted due to the capacity limit.
    pub evictions: u64,

    /// Number of records inserted.
    pub insertions: u64,

    /// Number of times the cache was cleared.
    pub clears: u64,
}

impl MetadataCacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of probed records keyed by object key.
pub struct MetadataCache {
    cache: LruCache<String, ImageRecord>,
    stats: MetadataCacheStats,
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_CACHE_CAPACITY)
    }
}

impl MetadataCache {
    /// Creates a cache holding at most `capacity` records.
    ///
    /// A zero capacity falls back to [`DEFAULT_METADATA_CACHE_CAPACITY`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(DEFAULT_METADATA_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            stats: MetadataCacheStats::default(),
        }
    }

    /// Looks up a record, marking it as recently used.
    pub fn get(&mut self, key: &str) -> Option<&ImageRecord> {
        let record = self.cache.get(key);
        if record.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        record
    }

    /// Returns `true` if `key` is cached, without touching recency or stats.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    /// Stores a record under its key, replacing any previous entry.
    pub fn insert(&mut self, record: ImageRecord) {
        let key = record.key.clone();
        if let Some((evicted_key, _)) = self.cache.push(key.clone(), record) {
            if evicted_key != key {
                self.stats.evictions += 1;
            }
        }
        self.stats.insertions += 1;
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.clears += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    #[must_use]
    pub fn stats(&self) -> MetadataCacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::ObjectRecord;
    use chrono::{TimeZone, Utc};

    fn record(key: &str) -> ImageRecord {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        ImageRecord::from_object(ObjectRecord::new(key, ts), 20_000, "image/jpeg")
    }

    #[test]
    fn get_returns_inserted_record() {
        let mut cache = MetadataCache::new(4);
        cache.insert(record("a.jpg"));

        assert_eq!(cache.get("a.jpg").map(|r| r.size), Some(20_000));
        assert!(cache.get("b.jpg").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 1);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let mut cache = MetadataCache::new(2);
        cache.insert(record("a.jpg"));
        cache.insert(record("b.jpg"));
        // Touch "a" so "b" becomes the eviction candidate.
        let _ = cache.get("a.jpg");
        cache.insert(record("c.jpg"));

        assert!(cache.contains("a.jpg"));
        assert!(!cache.contains("b.jpg"));
        assert!(cache.contains("c.jpg"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn reinserting_same_key_is_not_an_eviction() {
        let mut cache = MetadataCache::new(2);
        cache.insert(record("a.jpg"));
        cache.insert(record("a.jpg"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = MetadataCache::new(8);
        cache.insert(record("a.jpg"));
        cache.insert(record("b.jpg"));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().clears, 1);
    }

    #[test]
    fn zero_capacity_uses_default() {
        let cache = MetadataCache::new(0);
        assert_eq!(cache.capacity(), DEFAULT_METADATA_CACHE_CAPACITY);
    }

    #[test]
    fn hit_rate_is_a_percentage() {
        let stats = MetadataCacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 75.0).abs() < f64::EPSILON);
        assert!(MetadataCacheStats::default().hit_rate().abs() < f64::EPSILON);
    }
}
