// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for [`ObjectStore`] against an S3-compatible endpoint.
//!
//! The endpoint is the bucket URL itself (virtual-host or path style), e.g.
//! `https://photos.s3.eu-west-3.amazonaws.com` or
//! `http://localhost:9000/photos`. Requests carry no credentials, so the
//! bucket must allow anonymous listing and reads.
//!
//! - Listing: `GET {endpoint}?list-type=2[&continuation-token=...]`
//! - Probe: `HEAD {endpoint}/{key}` with the key as one percent-encoded segment

use crate::application::port::{ObjectHead, ObjectStore, StoreError};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Url};
use tracing::debug;

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// A bucket reached over plain HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpBucket {
    client: Client,
    endpoint: Url,
}

impl HttpBucket {
    /// Creates an adapter for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not an absolute `http` or
    /// `https` URL, and [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL of one listing page.
    #[must_use]
    pub fn listing_url(&self, continuation_token: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("list-type", "2");
            if let Some(token) = continuation_token {
                query.append_pair("continuation-token", token);
            }
        }
        url
    }

    /// URL of one object; the whole key, `/` included, is a single segment.
    #[must_use]
    pub fn key_url(&self, key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key);
        }
        url
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim())
        .map_err(|err| Error::Config(format!("invalid endpoint {endpoint:?}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "endpoint must use http or https, got {:?}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("endpoint {endpoint:?} has no path")));
    }
    Ok(url)
}

fn network(err: &reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

#[async_trait]
impl ObjectStore for HttpBucket {
    async fn fetch_listing(&self, continuation_token: Option<&str>) -> std::result::Result<String, StoreError> {
        let url = self.listing_url(continuation_token);
        debug!(%url, "fetching listing page");

        let response = self.client.get(url).send().await.map_err(|e| network(&e))?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }
        response.text().await.map_err(|e| network(&e))
    }

    async fn head(&self, key: &str) -> std::result::Result<ObjectHead, StoreError> {
        let response = self
            .client
            .head(self.key_url(key))
            .send()
            .await
            .map_err(|e| network(&e))?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        // HEAD responses have no body, so read the header rather than
        // `Response::content_length`.
        let headers = response.headers();
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(ObjectHead {
            content_length,
            content_type,
        })
    }

    fn object_url(&self, key: &str) -> String {
        self.key_url(key).into()
    }
}
