// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Filtering**: Minimum object size kept in the gallery
//! - **Paging**: Number of images revealed per page
//! - **Probing**: Concurrency bound for metadata requests
//! - **Metadata Cache**: Capacity of the per-key memoization

// ==========================================================================
// Filtering Defaults
// ==========================================================================

/// Objects smaller than this are treated as thumbnails or junk (10 KiB).
pub const DEFAULT_MIN_FILE_SIZE_BYTES: u64 = 10 * 1024;

/// Upper bound accepted for the minimum file size (64 MiB).
pub const MAX_MIN_FILE_SIZE_BYTES: u64 = 64 * 1024 * 1024;

// ==========================================================================
// Paging Defaults
// ==========================================================================

/// Default number of images per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Minimum page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum page size.
pub const MAX_PAGE_SIZE: usize = 500;

// ==========================================================================
// Probe Defaults
// ==========================================================================

/// Default number of metadata probes allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 5;

/// Minimum concurrent probes.
pub const MIN_CONCURRENT_PROBES: usize = 1;

/// Maximum concurrent probes.
pub const MAX_CONCURRENT_PROBES: usize = 64;

// ==========================================================================
// Metadata Cache Defaults
// ==========================================================================

/// Default number of probed records kept in the metadata cache.
pub const DEFAULT_METADATA_CACHE_CAPACITY: usize = 4096;

/// Minimum metadata cache capacity.
pub const MIN_METADATA_CACHE_CAPACITY: usize = 16;

/// Maximum metadata cache capacity.
pub const MAX_METADATA_CACHE_CAPACITY: usize = 1_000_000;

// ==========================================================================
// HTTP Defaults
// ==========================================================================

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "BucketLens/0.1.0";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_MIN_FILE_SIZE_BYTES <= MAX_MIN_FILE_SIZE_BYTES);

    assert!(MIN_PAGE_SIZE > 0);
    assert!(MAX_PAGE_SIZE >= MIN_PAGE_SIZE);
    assert!(DEFAULT_PAGE_SIZE >= MIN_PAGE_SIZE);
    assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);

    assert!(MIN_CONCURRENT_PROBES > 0);
    assert!(MAX_CONCURRENT_PROBES >= MIN_CONCURRENT_PROBES);
    assert!(DEFAULT_MAX_CONCURRENT_PROBES >= MIN_CONCURRENT_PROBES);
    assert!(DEFAULT_MAX_CONCURRENT_PROBES <= MAX_CONCURRENT_PROBES);

    assert!(MIN_METADATA_CACHE_CAPACITY > 0);
    assert!(MAX_METADATA_CACHE_CAPACITY >= MIN_METADATA_CACHE_CAPACITY);
    assert!(DEFAULT_METADATA_CACHE_CAPACITY >= MIN_METADATA_CACHE_CAPACITY);
    assert!(DEFAULT_METADATA_CACHE_CAPACITY <= MAX_METADATA_CACHE_CAPACITY);
};
