// SPDX-License-Identifier: MPL-2.0
//! Messages consumed by `GalleryController::update`.

use chrono::NaiveDate;

/// Events emitted by the rendering layer (or forwarded from a mounted
/// [`ProximitySignal`](super::ProximitySignal)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The end-of-list sentinel came near the viewport; load the next page.
    SentinelVisible,
    /// A day was picked in the date picker (`None` = all dates).
    SelectDate(Option<NaiveDate>),
    /// Step the selected day back by one.
    PreviousDate,
    /// Step the selected day forward by one (refused at today).
    NextDate,
    /// A thumbnail was activated.
    OpenImage(String),
    PreviousImage,
    NextImage,
    CloseViewer,
    /// The rendering layer could not display an image.
    ImageFailed(String),
}
