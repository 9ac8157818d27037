// SPDX-License-Identifier: MPL-2.0
//! Query services (CQRS read-side).
//!
//! These services read a built [`GalleryIndex`](crate::application::index::GalleryIndex)
//! and never modify it.
//!
//! # Available Services
//!
//! - [`pagination`]: Date-filtered pages (`page`, `PageCursor`, `DisplayWindow`)
//! - [`navigation`]: Viewer stepping between images and between days

pub mod navigation;
pub mod pagination;

// Re-export main types
pub use pagination::{page, DisplayWindow, PageCursor, PageView};
