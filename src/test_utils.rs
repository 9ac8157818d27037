// SPDX-License-Identifier: MPL-2.0
//! Test utilities: an in-memory [`ObjectStore`] and listing payload builders.
//!
//! [`MemoryStore`] serves pre-rendered listing pages and answers header probes
//! from a key table. It counts calls and tracks how many probes overlap, so
//! tests can check paging and the probe concurrency bound without a network.

use crate::application::port::{ObjectHead, ObjectStore, StoreError};
use async_trait::async_trait;
use quick_xml::escape::escape;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// One object held by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    pub key: String,
    /// RFC 3339 timestamp written into the listing.
    pub last_modified: String,
    pub size: Option<u64>,
    pub content_type: Option<String>,
}

impl MemoryObject {
    /// An object whose content type follows its extension.
    pub fn new(key: impl Into<String>, last_modified: impl Into<String>, size: u64) -> Self {
        let key = key.into();
        let content_type = content_type_for(&key);
        Self {
            key,
            last_modified: last_modified.into(),
            size: Some(size),
            content_type: Some(content_type.to_string()),
        }
    }

    /// Probes of this object return neither `Content-Length` nor `Content-Type`.
    #[must_use]
    pub fn without_headers(mut self) -> Self {
        self.size = None;
        self.content_type = None;
        self
    }
}

fn content_type_for(key: &str) -> &'static str {
    let ext = Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Renders a `ListBucketResult` payload.
///
/// `entries` are `(key, last_modified)` pairs; `next` becomes the
/// `NextContinuationToken`.
#[must_use]
pub fn listing_xml(entries: &[(&str, &str)], next: Option<&str>) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <ListBucketResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\n\
         <Name>memory</Name>\n",
    );
    xml.push_str(&format!("<KeyCount>{}</KeyCount>\n", entries.len()));
    xml.push_str(&format!("<IsTruncated>{}</IsTruncated>\n", next.is_some()));
    for (key, last_modified) in entries {
        xml.push_str(&format!(
            "<Contents><Key>{}</Key><LastModified>{}</LastModified></Contents>\n",
            escape(*key),
            escape(*last_modified)
        ));
    }
    if let Some(token) = next {
        xml.push_str(&format!(
            "<NextContinuationToken>{}</NextContinuationToken>\n",
            escape(token)
        ));
    }
    xml.push_str("</ListBucketResult>");
    xml
}

const PAGE_TOKEN_PREFIX: &str = "page-";

/// In-memory bucket.
///
/// Listing page `i` (0-based) is requested with token `page-{i}`; page 0 is
/// requested without a token.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: Vec<String>,
    heads: HashMap<String, ObjectHead>,
    failing_probes: HashSet<String>,
    listing_status: Option<u16>,
    request_yields: usize,
    slow_keys: HashMap<String, usize>,
    completion_order: Mutex<Vec<String>>,
    listing_calls: AtomicUsize,
    head_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryStore {
    /// Holds `objects`, listed `page_len` entries per page.
    #[must_use]
    pub fn new(objects: Vec<MemoryObject>, page_len: usize) -> Self {
        let page_len = page_len.max(1);
        let chunks: Vec<&[MemoryObject]> = if objects.is_empty() {
            vec![&[]]
        } else {
            objects.chunks(page_len).collect()
        };
        let last = chunks.len() - 1;
        let pages = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let entries: Vec<(&str, &str)> = chunk
                    .iter()
                    .map(|o| (o.key.as_str(), o.last_modified.as_str()))
                    .collect();
                let next = (i < last).then(|| format!("{PAGE_TOKEN_PREFIX}{}", i + 1));
                listing_xml(&entries, next.as_deref())
            })
            .collect();

        let heads = objects
            .into_iter()
            .map(|o| {
                let head = ObjectHead {
                    content_length: o.size,
                    content_type: o.content_type,
                };
                (o.key, head)
            })
            .collect();

        Self {
            pages,
            heads,
            ..Self::default()
        }
    }

    /// Serves the given raw payloads as listing pages. No object can be probed.
    #[must_use]
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Every listing request answers with `status`.
    #[must_use]
    pub fn failing_listing(mut self, status: u16) -> Self {
        self.listing_status = Some(status);
        self
    }

    /// Probes of `key` fail with a network error.
    #[must_use]
    pub fn failing_probe(mut self, key: impl Into<String>) -> Self {
        self.failing_probes.insert(key.into());
        self
    }

    /// Each `head` request yields to the scheduler `yields` times while in flight.
    #[must_use]
    pub fn with_request_yields(mut self, yields: usize) -> Self {
        self.request_yields = yields;
        self
    }

    /// Requests for `key` yield `yields` times instead of the common amount.
    #[must_use]
    pub fn slow_key(mut self, key: impl Into<String>, yields: usize) -> Self {
        self.slow_keys.insert(key.into(), yields);
        self
    }

    /// Keys of finished `head` requests, in completion order.
    #[must_use]
    pub fn completion_order(&self) -> Vec<String> {
        self.completion_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn head_calls(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }

    /// Highest number of probes observed in flight at once.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch_listing(&self, continuation_token: Option<&str>) -> Result<String, StoreError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.listing_status {
            return Err(StoreError::Status(status));
        }
        let index = match continuation_token {
            None => 0,
            Some(token) => token
                .strip_prefix(PAGE_TOKEN_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or(StoreError::Status(400))?,
        };
        self.pages.get(index).cloned().ok_or(StoreError::Status(404))
    }

    async fn head(&self, key: &str) -> Result<ObjectHead, StoreError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let yields = self.slow_keys.get(key).copied().unwrap_or(self.request_yields);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }

        let result = if self.failing_probes.contains(key) {
            Err(StoreError::Network(format!("connection reset while probing {key}")))
        } else {
            self.heads.get(key).cloned().ok_or(StoreError::Status(404))
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completion_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.to_string());
        result
    }

    fn object_url(&self, key: &str) -> String {
        format!("memory://bucket/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pages_chain_through_tokens() {
        let objects = (0..5)
            .map(|i| MemoryObject::new(format!("{i}.png"), "2024-01-01T00:00:00Z", 1))
            .collect();
        let store = MemoryStore::new(objects, 2);

        let first = store.fetch_listing(None).await.unwrap();
        assert!(first.contains("<NextContinuationToken>page-1</NextContinuationToken>"));
        let last = store.fetch_listing(Some("page-2")).await.unwrap();
        assert!(!last.contains("NextContinuationToken"));
        assert_eq!(store.fetch_listing(Some("page-3")).await, Err(StoreError::Status(404)));
        assert_eq!(store.fetch_listing(Some("bogus")).await, Err(StoreError::Status(400)));
    }

    #[test]
    fn listing_xml_escapes_keys() {
        let xml = listing_xml(&[("a&b<c>.jpg", "2024-01-01T00:00:00Z")], None);
        assert!(xml.contains("a&amp;b&lt;c&gt;.jpg"));
    }

    #[tokio::test]
    async fn head_reports_headers_and_failures() {
        let store = MemoryStore::new(
            vec![
                MemoryObject::new("a.webp", "2024-01-01T00:00:00Z", 12),
                MemoryObject::new("b.jpg", "2024-01-01T00:00:00Z", 12),
            ],
            10,
        )
        .failing_probe("b.jpg");

        assert_eq!(store.head("a.webp").await, Ok(ObjectHead::new(12, "image/webp")));
        assert!(matches!(store.head("b.jpg").await, Err(StoreError::Network(_))));
        assert_eq!(store.head("zzz.jpg").await, Err(StoreError::Status(404)));
        assert_eq!(store.head_calls(), 3);
    }
}
