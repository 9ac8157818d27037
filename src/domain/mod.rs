// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core gallery types with no I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `chrono` for calendar arithmetic it depends only on `std`, so
//! every rule here is testable without a bucket or a runtime.
//!
//! # Modules
//!
//! - [`gallery`]: Gallery records ([`ObjectRecord`](gallery::ObjectRecord),
//!   [`ImageRecord`](gallery::ImageRecord)), calendar-day normalization
//!   ([`DateSet`](gallery::DateSet)) and the [`DateFilter`](gallery::DateFilter)

pub mod gallery;
