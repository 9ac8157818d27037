// SPDX-License-Identifier: MPL-2.0
//! Gallery controller: the owned state behind one gallery view.
//!
//! The controller runs the load pipeline (listing, enrichment, indexing),
//! keeps the selected day, the paging cursor, the display window and the open
//! viewer image, and translates [`Message`]s from the rendering layer into
//! state changes. It draws nothing; the renderer reads the state back through
//! the accessors.
//!
//! A refresh commits atomically: on any fatal error the previous gallery,
//! filter, window and viewer are left exactly as they were.

mod message;
mod subscription;
mod viewer;

pub use message::Message;
pub use subscription::{
    ListenerId, ProximitySignal, SentinelSignal, SignalCallback, SignalSubscription,
};
pub use viewer::ViewerInfo;

use crate::application::enricher::{DroppedObject, MetadataEnricher};
use crate::application::index::GalleryIndex;
use crate::application::listing;
use crate::application::port::ObjectStore;
use crate::application::query::{navigation, page, DisplayWindow, PageCursor};
use crate::config::Config;
use crate::domain::gallery::{DateFilter, DateSet, ImageRecord};
use crate::error::{Error, Result};
use crate::media::{MetadataCache, MetadataCacheStats};
use chrono::{FixedOffset, Local, NaiveDate, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Outcome of a successful refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Images in the new gallery.
    pub images: usize,
    /// Distinct days with content.
    pub days: usize,
    /// Objects left out by the enricher.
    pub dropped: Vec<DroppedObject>,
    pub cache_hits: usize,
    pub probes: usize,
}

/// A claimed page load, valid for the generation it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    generation: u64,
}

/// Headless state of one gallery view.
pub struct GalleryController {
    store: Arc<dyn ObjectStore>,
    enricher: MetadataEnricher,
    cache: MetadataCache,
    gallery: GalleryIndex,
    filter: DateFilter,
    cursor: PageCursor,
    window: DisplayWindow,
    viewer: Option<String>,
    page_size: usize,
    /// Fixed zone for day grouping; `None` uses the local zone.
    zone: Option<FixedOffset>,
    /// Bumped whenever the gallery or the filter changes.
    generation: u64,
    subscription: Option<SignalSubscription>,
    events_tx: UnboundedSender<Message>,
    events_rx: UnboundedReceiver<Message>,
}

impl GalleryController {
    /// Creates an empty controller reading from `store`.
    pub fn new(store: Arc<dyn ObjectStore>, config: &Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            store,
            enricher: MetadataEnricher::new(
                config.min_file_size(),
                config.max_concurrent_probes(),
            ),
            cache: MetadataCache::new(config.metadata_cache_capacity()),
            gallery: GalleryIndex::default(),
            filter: DateFilter::default(),
            cursor: PageCursor::default(),
            window: DisplayWindow::new(),
            viewer: None,
            page_size: config.page_size(),
            zone: None,
            generation: 0,
            subscription: None,
            events_tx,
            events_rx,
        }
    }

    /// Groups days in `zone` instead of the local time zone.
    #[must_use]
    pub fn with_time_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Points the controller at another bucket.
    ///
    /// The metadata cache is dropped. The gallery stays on screen until the
    /// next successful [`refresh`](Self::refresh).
    pub fn set_store(&mut self, store: Arc<dyn ObjectStore>) {
        self.store = store;
        self.cache.clear();
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Re-lists the bucket, enriches the result and replaces the gallery.
    ///
    /// On success the paging restarts at page 1 under the current filter. The
    /// viewer stays open if its image survived the refresh.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] / [`Error::Format`] if the listing fails
    /// - [`Error::EmptyResult`] if no image survives enrichment
    ///
    /// On error nothing is committed.
    pub async fn refresh(&mut self) -> Result<RefreshReport> {
        let objects = listing::list_all(self.store.as_ref()).await?;
        let enriched = self
            .enricher
            .enrich(self.store.as_ref(), objects, &mut self.cache)
            .await;

        let gallery = self.build_index(enriched.images);
        if gallery.is_empty() {
            warn!(dropped = enriched.dropped.len(), "no images left after enrichment");
            return Err(Error::EmptyResult);
        }

        let report = RefreshReport {
            images: gallery.len(),
            days: gallery.dates().len(),
            dropped: enriched.dropped,
            cache_hits: enriched.cache_hits,
            probes: enriched.probes,
        };
        info!(
            images = report.images,
            days = report.days,
            dropped = report.dropped.len(),
            "gallery refreshed"
        );

        self.gallery = gallery;
        if let Some(key) = self.viewer.as_deref() {
            if self.gallery.get(key).is_none() {
                self.viewer = None;
            }
        }
        self.restart_paging();
        Ok(report)
    }

    /// Selects a day (`None` = all dates) and restarts paging at page 1.
    ///
    /// The metadata cache is cleared; the gallery is kept.
    pub fn select_date(&mut self, day: Option<NaiveDate>) {
        debug!(?day, "date selected");
        self.filter = DateFilter { selected: day };
        self.cache.clear();
        if let Some(key) = self.viewer.as_deref() {
            let still_visible = self
                .gallery
                .position(key)
                .and_then(|idx| self.gallery.day_at(idx))
                .is_some_and(|d| self.filter.matches_day(d));
            if !still_visible {
                self.viewer = None;
            }
        }
        self.restart_paging();
    }

    /// Claims the next page, unless a load is in flight or nothing is left.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        let page = self.cursor.begin()?;
        Some(PageRequest {
            page,
            generation: self.generation,
        })
    }

    /// Delivers a claimed page into the display window.
    ///
    /// Requests issued before the last gallery or filter change are ignored.
    /// Returns `true` if items were appended.
    pub fn complete_load(&mut self, request: PageRequest) -> bool {
        if request.generation != self.generation {
            debug!(page = request.page, "ignoring stale page load");
            return false;
        }
        let view = page(&self.gallery, self.filter, request.page, self.page_size);
        let appended = self.window.append(&view);
        self.cursor.finish(view.page_number, view.has_more);
        debug!(
            page = view.page_number,
            items = view.items.len(),
            has_more = view.has_more,
            "page loaded"
        );
        appended
    }

    /// Loads the next page if allowed. Returns `true` if items were appended.
    pub fn load_more(&mut self) -> bool {
        match self.begin_load() {
            Some(request) => self.complete_load(request),
            None => false,
        }
    }

    /// Removes an image the renderer failed to display.
    pub fn image_failed(&mut self, key: &str) {
        if self.window.remove(key) {
            warn!(key, "image failed to display");
        }
    }

    fn restart_paging(&mut self) {
        self.generation += 1;
        self.window.clear();
        self.cursor = PageCursor::start(self.gallery.filtered_len(self.filter));
        self.load_more();
    }

    fn build_index(&self, images: Vec<ImageRecord>) -> GalleryIndex {
        match self.zone {
            Some(zone) => GalleryIndex::build_in(images, &zone),
            None => GalleryIndex::build(images),
        }
    }

    // =========================================================================
    // Viewer
    // =========================================================================

    fn subset(&self) -> Vec<&ImageRecord> {
        self.gallery.filtered(self.filter).collect()
    }

    /// Opens the viewer on `key`. Returns `false` if the key is not in the
    /// filtered subset.
    pub fn open_viewer(&mut self, key: &str) -> bool {
        if navigation::position_of(&self.subset(), key).is_none() {
            return false;
        }
        self.viewer = Some(key.to_string());
        true
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    /// Moves the viewer to the newer neighbour. Returns `false` at the start.
    pub fn show_previous(&mut self) -> bool {
        let Some(current) = self.viewer.as_deref() else {
            return false;
        };
        let target = navigation::previous(&self.subset(), current).map(|r| r.key.clone());
        self.move_viewer(target)
    }

    /// Moves the viewer to the older neighbour. Returns `false` at the end.
    pub fn show_next(&mut self) -> bool {
        let Some(current) = self.viewer.as_deref() else {
            return false;
        };
        let target = navigation::next(&self.subset(), current).map(|r| r.key.clone());
        self.move_viewer(target)
    }

    fn move_viewer(&mut self, target: Option<String>) -> bool {
        match target {
            Some(key) => {
                self.viewer = Some(key);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.viewer
            .as_deref()
            .is_some_and(|key| navigation::has_previous(&self.subset(), key))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.viewer
            .as_deref()
            .is_some_and(|key| navigation::has_next(&self.subset(), key))
    }

    /// Snapshot of the open image, if any.
    #[must_use]
    pub fn viewer_info(&self) -> Option<ViewerInfo> {
        let key = self.viewer.as_deref()?;
        let subset = self.subset();
        let index = navigation::position_of(&subset, key)?;
        let record = subset[index];
        Some(ViewerInfo::new(
            record,
            self.store.object_url(&record.key),
            index,
            subset.len(),
            self.zone,
        ))
    }

    // =========================================================================
    // Date navigation
    // =========================================================================

    /// Today in the gallery's time zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        let now = Utc::now();
        match self.zone {
            Some(zone) => now.with_timezone(&zone).date_naive(),
            None => now.with_timezone(&Local).date_naive(),
        }
    }

    /// Selects the day before the current one (or before `today` with no
    /// selection).
    pub fn previous_date_at(&mut self, today: NaiveDate) {
        if let Some(day) = navigation::previous_day(self.filter.selected, today) {
            self.select_date(Some(day));
        }
    }

    /// Selects the day after the current one. Returns `false` once the
    /// selection reached `today`.
    pub fn next_date_at(&mut self, today: NaiveDate) -> bool {
        match navigation::next_day(self.filter.selected, today) {
            Some(day) => {
                self.select_date(Some(day));
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_next_date_at(&self, today: NaiveDate) -> bool {
        navigation::has_next_date(self.filter.selected, today)
    }

    pub fn previous_date(&mut self) {
        self.previous_date_at(self.today());
    }

    pub fn next_date(&mut self) -> bool {
        self.next_date_at(self.today())
    }

    #[must_use]
    pub fn has_next_date(&self) -> bool {
        self.has_next_date_at(self.today())
    }

    // =========================================================================
    // Messages and scroll subscription
    // =========================================================================

    /// Applies one message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::SentinelVisible => {
                self.load_more();
            }
            Message::SelectDate(day) => self.select_date(day),
            Message::PreviousDate => self.previous_date(),
            Message::NextDate => {
                self.next_date();
            }
            Message::OpenImage(key) => {
                self.open_viewer(&key);
            }
            Message::PreviousImage => {
                self.show_previous();
            }
            Message::NextImage => {
                self.show_next();
            }
            Message::CloseViewer => self.close_viewer(),
            Message::ImageFailed(key) => self.image_failed(&key),
        }
    }

    /// Registers on `signal`; each notification queues
    /// [`Message::SentinelVisible`]. Replaces any earlier registration.
    pub fn mount(&mut self, signal: Arc<dyn ProximitySignal>) {
        let tx = self.events_tx.clone();
        let callback: SignalCallback = Arc::new(move || {
            let _ = tx.send(Message::SentinelVisible);
        });
        self.subscription = Some(SignalSubscription::subscribe(signal, callback));
    }

    /// Drops the scroll registration.
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Applies every queued message. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.events_rx.try_recv() {
            self.update(message);
            handled += 1;
        }
        handled
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn gallery(&self) -> &GalleryIndex {
        &self.gallery
    }

    /// Records currently handed to the renderer.
    #[must_use]
    pub fn visible(&self) -> &[ImageRecord] {
        self.window.items()
    }

    /// Days with content, for the date picker.
    #[must_use]
    pub fn dates(&self) -> &DateSet {
        self.gallery.dates()
    }

    #[must_use]
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.filter.selected
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.gallery.filtered_len(self.filter)
    }

    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.cursor.is_loading()
    }

    #[must_use]
    pub fn viewer_key(&self) -> Option<&str> {
        self.viewer.as_deref()
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn image_url(&self, key: &str) -> String {
        self.store.object_url(key)
    }

    #[must_use]
    pub fn cache_stats(&self) -> MetadataCacheStats {
        self.cache.stats()
    }

    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for GalleryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryController")
            .field("images", &self.gallery.len())
            .field("filter", &self.filter)
            .field("cursor", &self.cursor)
            .field("visible", &self.window.len())
            .field("viewer", &self.viewer)
            .field("generation", &self.generation)
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}
