// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`s3`]: Anonymous HTTP access to an S3-compatible bucket (implements [`ObjectStore`])
//!
//! [`ObjectStore`]: crate::application::port::ObjectStore

pub mod s3;

// Re-export main types for convenience
pub use s3::HttpBucket;
