// SPDX-License-Identifier: MPL-2.0
//! Object store port definition.
//!
//! This module defines the [`ObjectStore`] trait for talking to an
//! S3-compatible bucket. The HTTP adapter lives in
//! [`crate::infrastructure::s3`]; tests use the in-memory `MemoryStore`
//! from `test_utils` (behind the `test-utils` feature).

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// StoreError
// =============================================================================

/// Errors that can occur while talking to the object store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Network(String),

    /// The store answered with a non-success HTTP status.
    #[error("HTTP status: {0}")]
    Status(u16),

    /// The store answered with something that is not a bucket listing.
    #[error("{0}")]
    Format(String),
}

// =============================================================================
// ObjectHead
// =============================================================================

/// Headers returned by a metadata probe.
///
/// Either header may be absent; the enricher applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectHead {
    /// `Content-Length`, in bytes.
    pub content_length: Option<u64>,
    /// `Content-Type`.
    pub content_type: Option<String>,
}

impl ObjectHead {
    #[must_use]
    pub fn new(content_length: u64, content_type: impl Into<String>) -> Self {
        Self {
            content_length: Some(content_length),
            content_type: Some(content_type.into()),
        }
    }
}

// =============================================================================
// ObjectStore Trait
// =============================================================================

/// Read-only access to a bucket.
///
/// # Example
///
/// ```ignore
/// use bucket_lens::application::port::ObjectStore;
///
/// async fn first_page(store: &dyn ObjectStore) -> Option<String> {
///     store.fetch_listing(None).await.ok()
/// }
/// ```
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches one raw listing page (`list-type=2`), continuing after
    /// `continuation_token` when given.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Network`] or [`StoreError::Status`] when the
    /// request fails.
    async fn fetch_listing(&self, continuation_token: Option<&str>) -> Result<String, StoreError>;

    /// Probes an object's headers without downloading its body.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the status is not a success.
    async fn head(&self, key: &str) -> Result<ObjectHead, StoreError>;

    /// URL the rendering layer loads the full image from.
    fn object_url(&self, key: &str) -> String;
}
