// SPDX-License-Identifier: MPL-2.0
//! Bucket listing client.
//!
//! Walks every listing page of the bucket by following continuation tokens,
//! validates each payload and keeps the entries whose key looks like an image.
//! Nothing is cached here; every call re-lists the bucket.

pub mod xml;

use crate::application::port::ObjectStore;
use crate::domain::gallery::ObjectRecord;
use crate::error::{Error, Result};
use crate::media::is_image_key;
use std::collections::HashSet;
use tracing::{debug, info};

pub use xml::{parse_listing, ListingPage};

/// Lists every image object in the bucket, in listing order.
///
/// All pages are accumulated in memory before returning, so a failure on any
/// page yields an error and no partial result.
///
/// # Errors
///
/// - [`Error::Network`] if a listing request fails
/// - [`Error::Format`] if a page is not a valid bucket listing, or the store
///   hands back a continuation token it already returned
pub async fn list_all<S>(store: &S) -> Result<Vec<ObjectRecord>>
where
    S: ObjectStore + ?Sized,
{
    let mut objects = Vec::new();
    let mut token: Option<String> = None;
    let mut seen_tokens = HashSet::new();
    let mut pages = 0usize;

    loop {
        let payload = store.fetch_listing(token.as_deref()).await?;
        let page = parse_listing(&payload)?;
        pages += 1;
        debug!(
            page = pages,
            entries = page.objects.len(),
            more = page.next_continuation_token.is_some(),
            "listing page parsed"
        );
        objects.extend(page.objects);

        match page.next_continuation_token {
            Some(next) => {
                if !seen_tokens.insert(next.clone()) {
                    return Err(Error::Format(format!(
                        "store repeated continuation token {next:?}"
                    )));
                }
                token = Some(next);
            }
            None => break,
        }
    }

    let listed = objects.len();
    objects.retain(|object| is_image_key(&object.key));
    info!(pages, listed, images = objects.len(), "bucket listing complete");

    Ok(objects)
}
