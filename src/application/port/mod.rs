// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only plain data, ensuring the application layer remains
//! independent of the HTTP client.
//!
//! # Available Ports
//!
//! - [`object_store`]: Bucket listing payloads and per-object metadata probes
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so one store can be shared behind an `Arc`
//! - Methods return `Result` with the port error type [`StoreError`]
//! - Listing payloads are returned raw; validation belongs to the listing client

pub mod object_store;

// Re-export main types for convenience
pub use object_store::{ObjectHead, ObjectStore, StoreError};
