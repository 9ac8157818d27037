// SPDX-License-Identifier: MPL-2.0
//! Metadata enrichment with bounded concurrency.
//!
//! Every listed object needs its size and content type before it can enter the
//! gallery. Those come from a header-only probe per object. Large buckets hold
//! thousands of objects, so probes are gated by a fair semaphore: at most
//! `max_concurrent` are in flight, the rest wait in submission order, and a
//! slow probe only holds its own permit.
//!
//! Enrichment never fails as a whole. An object whose probe fails, or whose
//! size is below the configured floor, is dropped and reported in
//! [`EnrichReport::dropped`].

use crate::application::port::{ObjectHead, ObjectStore, StoreError};
use crate::config::defaults::{DEFAULT_MAX_CONCURRENT_PROBES, DEFAULT_MIN_FILE_SIZE_BYTES};
use crate::domain::gallery::{ImageRecord, ObjectRecord};
use crate::media::MetadataCache;
use futures_util::future::join_all;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Content type used when a probe response has no `Content-Type` header.
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown";

/// Why a listed object did not make it into the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The probe request failed or returned a non-success status.
    ProbeFailed(StoreError),
    /// The object is smaller than the minimum file size.
    BelowMinimumSize { size: u64, minimum: u64 },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::ProbeFailed(err) => write!(f, "metadata probe failed: {err}"),
            DropReason::BelowMinimumSize { size, minimum } => {
                write!(f, "size {size} B is below the {minimum} B minimum")
            }
        }
    }
}

/// Diagnostic for one dropped object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedObject {
    pub key: String,
    pub reason: DropReason,
}

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Enriched records, in input order.
    pub images: Vec<ImageRecord>,
    /// Objects left out, in input order.
    pub dropped: Vec<DroppedObject>,
    /// Number of records served from the metadata cache.
    pub cache_hits: usize,
    /// Number of probes issued.
    pub probes: usize,
}

impl EnrichReport {
    /// Dropped objects whose probe failed (as opposed to undersized ones).
    pub fn probe_failures(&self) -> impl Iterator<Item = &DroppedObject> {
        self.dropped
            .iter()
            .filter(|d| matches!(d.reason, DropReason::ProbeFailed(_)))
    }
}

/// Enriches listed objects with probed metadata.
#[derive(Debug, Clone)]
pub struct MetadataEnricher {
    min_file_size: u64,
    max_concurrent: usize,
    permits: Arc<Semaphore>,
}

impl Default for MetadataEnricher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FILE_SIZE_BYTES, DEFAULT_MAX_CONCURRENT_PROBES)
    }
}

impl MetadataEnricher {
    /// Creates an enricher keeping objects of at least `min_file_size` bytes
    /// and running at most `max_concurrent` probes at once (minimum 1).
    #[must_use]
    pub fn new(min_file_size: u64, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            min_file_size,
            max_concurrent,
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    #[must_use]
    pub fn min_file_size(&self) -> u64 {
        self.min_file_size
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Enriches `records`, consulting and filling `cache`.
    pub async fn enrich<S>(
        &self,
        store: &S,
        records: Vec<ObjectRecord>,
        cache: &mut MetadataCache,
    ) -> EnrichReport
    where
        S: ObjectStore + ?Sized,
    {
        let mut slots: Vec<Option<Result<ImageRecord, DroppedObject>>> =
            Vec::with_capacity(records.len());
        let mut pending = Vec::new();
        let mut cache_hits = 0;

        for (idx, record) in records.into_iter().enumerate() {
            if let Some(hit) = cache.get(&record.key) {
                cache_hits += 1;
                slots.push(Some(Ok(hit.clone())));
            } else {
                slots.push(None);
                pending.push((idx, record));
            }
        }

        let probes = pending.len();
        debug!(
            total = slots.len(),
            cache_hits,
            probes,
            max_concurrent = self.max_concurrent,
            "enriching listed objects"
        );

        let outcomes = join_all(pending.into_iter().map(|(idx, record)| {
            let permits = Arc::clone(&self.permits);
            async move {
                let Ok(_permit) = permits.acquire().await else {
                    let closed = StoreError::Network("probe pool closed".to_string());
                    return (idx, record, Err(closed));
                };
                let head = store.head(&record.key).await;
                (idx, record, head)
            }
        }))
        .await;

        for (idx, record, head) in outcomes {
            let outcome = self.evaluate(record, head);
            if let Ok(ref image) = outcome {
                cache.insert(image.clone());
            }
            slots[idx] = Some(outcome);
        }

        let mut report = EnrichReport {
            cache_hits,
            probes,
            ..EnrichReport::default()
        };
        for outcome in slots.into_iter().flatten() {
            match outcome {
                Ok(image) => report.images.push(image),
                Err(dropped) => {
                    warn!(key = %dropped.key, reason = %dropped.reason, "dropping object");
                    report.dropped.push(dropped);
                }
            }
        }

        report
    }

    fn evaluate(
        &self,
        record: ObjectRecord,
        head: Result<ObjectHead, StoreError>,
    ) -> Result<ImageRecord, DroppedObject> {
        let head = match head {
            Ok(head) => head,
            Err(err) => {
                return Err(DroppedObject {
                    key: record.key,
                    reason: DropReason::ProbeFailed(err),
                });
            }
        };

        let size = head.content_length.unwrap_or(0);
        if size < self.min_file_size {
            return Err(DroppedObject {
                key: record.key,
                reason: DropReason::BelowMinimumSize {
                    size,
                    minimum: self.min_file_size,
                },
            });
        }

        let content_type = head
            .content_type
            .unwrap_or_else(|| UNKNOWN_CONTENT_TYPE.to_string());
        Ok(ImageRecord::from_object(record, size, content_type))
    }
}
