// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! This module contains the records flowing through the listing pipeline and
//! the calendar-day rules used to group and filter them.

pub mod date;
pub mod filter;
pub mod types;

// Re-export commonly used types
pub use date::{day_in, local_day, DateSet};
pub use filter::DateFilter;
pub use types::{ImageRecord, ObjectRecord};
