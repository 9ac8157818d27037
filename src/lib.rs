// SPDX-License-Identifier: MPL-2.0
//! `bucket_lens` is a photo gallery over S3-compatible buckets.
//!
//! It lists a bucket anonymously, probes each image's size and content type
//! with bounded concurrency, groups the images by local calendar day and
//! serves them newest first in fixed-size pages, with a full-size viewer that
//! steps between images and days.
//!
//! The crate is headless: [`app::GalleryController`] holds the state a
//! renderer would draw and accepts the events it would emit.

#![doc(html_root_url = "https://docs.rs/bucket_lens/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
