// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`listing`]: Bucket listing client (continuation-token paging + validation)
//! - [`enricher`]: Bounded-concurrency metadata probing
//! - [`index`]: Sorted, de-duplicated gallery and its day set
//! - [`query`]: Query services (CQRS read-side): pagination and navigation
//!
//! # Architecture
//!
//! The application layer sits between the domain layer (pure business logic)
//! and the infrastructure/presentation layers. It defines:
//!
//! - **Ports (Traits)**: Abstract interfaces that infrastructure implements
//! - **Pipeline stages**: listing → enrichment → indexing
//! - **Queries**: Read-only operations on the built gallery
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use bucket_lens::application::{enricher::MetadataEnricher, index::GalleryIndex, listing};
//!
//! let objects = listing::list_all(&store).await?;
//! let report = enricher.enrich(&store, objects, &mut cache).await;
//! let gallery = GalleryIndex::build(report.images);
//! ```

pub mod enricher;
pub mod index;
pub mod listing;
pub mod port;
pub mod query;
