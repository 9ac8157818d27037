// SPDX-License-Identifier: MPL-2.0
use bucket_lens::app::{GalleryController, Message, SentinelSignal};
use bucket_lens::application::enricher::DropReason;
use bucket_lens::application::port::ObjectStore;
use bucket_lens::config::{self, Config};
use bucket_lens::error::Error;
use bucket_lens::test_utils::{listing_xml, MemoryObject, MemoryStore};
use chrono::{FixedOffset, NaiveDate};
use std::sync::Arc;
use tempfile::tempdir;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 20 images on June 3rd, 15 on June 2nd, 10 on June 1st, listed 7 per page.
fn three_day_bucket() -> MemoryStore {
    let mut objects = Vec::new();
    for (day, count) in [(3, 20), (2, 15), (1, 10)] {
        for i in 0..count {
            objects.push(MemoryObject::new(
                format!("2024-06-0{day}/IMG_{i:04}.jpg"),
                format!("2024-06-0{day}T{:02}:{:02}:00Z", 8 + i / 60, i % 60),
                120_000,
            ));
        }
    }
    MemoryStore::new(objects, 7)
}

fn controller_for(store: MemoryStore) -> GalleryController {
    let store: Arc<dyn ObjectStore> = Arc::new(store);
    GalleryController::new(store, &Config::default()).with_time_zone(utc())
}

#[tokio::test]
async fn test_single_day_fits_on_one_page() {
    let mut controller = controller_for(three_day_bucket());
    let report = controller.refresh().await.expect("refresh succeeds");
    assert_eq!(report.images, 45);
    assert_eq!(report.days, 3);

    controller.select_date(Some(ymd(2024, 6, 3)));
    assert_eq!(controller.visible().len(), 20);
    assert!(!controller.has_more());
}

#[tokio::test]
async fn test_all_dates_pages_through_the_whole_gallery() {
    let mut controller = controller_for(three_day_bucket());
    controller.refresh().await.expect("refresh succeeds");

    assert_eq!(controller.visible().len(), 20);
    assert!(controller.has_more());

    controller.update(Message::SentinelVisible);
    assert_eq!(controller.visible().len(), 40);
    assert!(controller.has_more());

    controller.update(Message::SentinelVisible);
    assert_eq!(controller.visible().len(), 45);
    assert!(!controller.has_more());

    // Further triggers are no-ops.
    controller.update(Message::SentinelVisible);
    assert_eq!(controller.visible().len(), 45);

    let visible = controller.visible();
    assert!(visible
        .windows(2)
        .all(|w| w[0].last_modified >= w[1].last_modified));
}

#[tokio::test]
async fn test_malformed_listing_commits_nothing() {
    let mut controller = controller_for(three_day_bucket());
    controller.refresh().await.expect("first refresh succeeds");
    controller.select_date(Some(ymd(2024, 6, 2)));
    let visible_before: Vec<String> =
        controller.visible().iter().map(|r| r.key.clone()).collect();
    let has_more_before = controller.has_more();

    // Page 1 is fine, page 2 is cut off mid-element.
    let healthy_page = listing_xml(
        &[("2024-06-04/IMG_0000.jpg", "2024-06-04T09:00:00Z")],
        Some("page-1"),
    );
    controller.set_store(Arc::new(MemoryStore::from_pages(vec![
        healthy_page,
        "<ListBucketResult><Contents><Key>b.jpg</Key>".to_string(),
    ])));

    let err = controller.refresh().await.unwrap_err();
    assert!(matches!(err, Error::Format(_)));

    assert_eq!(controller.gallery().len(), 45);
    assert!(controller.gallery().get("2024-06-04/IMG_0000.jpg").is_none());
    assert_eq!(controller.selected_date(), Some(ymd(2024, 6, 2)));
    let visible_after: Vec<String> =
        controller.visible().iter().map(|r| r.key.clone()).collect();
    assert_eq!(visible_after.len(), 15);
    assert_eq!(visible_after, visible_before);
    assert_eq!(controller.has_more(), has_more_before);
}

#[tokio::test]
async fn test_html_endpoint_reports_format_error() {
    let store = MemoryStore::from_pages(vec![
        "<!DOCTYPE html><html><body>Bucket website</body></html>".to_string(),
    ]);
    let mut controller = controller_for(store);

    match controller.refresh().await {
        Err(Error::Format(msg)) => assert!(msg.contains("HTML")),
        other => panic!("expected a format error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_probes_are_diagnostics_not_errors() {
    let objects = (0..10)
        .map(|i| MemoryObject::new(format!("p{i}.png"), "2024-06-01T10:00:00Z", 30_000))
        .collect();
    let store = MemoryStore::new(objects, 4)
        .failing_probe("p3.png")
        .failing_probe("p8.png");
    let mut controller = controller_for(store);

    let report = controller.refresh().await.expect("refresh succeeds");

    assert_eq!(report.images, 8);
    let failed: Vec<&str> = report.dropped.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(failed, vec!["p3.png", "p8.png"]);
    assert!(report
        .dropped
        .iter()
        .all(|d| matches!(d.reason, DropReason::ProbeFailed(_))));
}

#[tokio::test]
async fn test_refresh_reuses_cached_metadata() {
    let mut controller = controller_for(three_day_bucket());

    let first = controller.refresh().await.expect("refresh succeeds");
    assert_eq!(first.probes, 45);

    let second = controller.refresh().await.expect("refresh succeeds");
    assert_eq!(second.probes, 0);
    assert_eq!(second.cache_hits, 45);
    assert_eq!(controller.visible().len(), 20);
}

#[tokio::test]
async fn test_bucket_with_only_small_files_is_empty() {
    let store = MemoryStore::new(
        vec![
            MemoryObject::new("thumb.jpg", "2024-06-01T10:00:00Z", 2_048),
            MemoryObject::new("readme.txt", "2024-06-01T10:00:00Z", 90_000),
        ],
        10,
    );
    let mut controller = controller_for(store);

    assert_eq!(controller.refresh().await, Err(Error::EmptyResult));
    assert_eq!(Error::EmptyResult.to_string(), "No images found in bucket");
}

#[tokio::test]
async fn test_listing_failure_is_a_network_error() {
    let mut controller = controller_for(MemoryStore::new(Vec::new(), 10).failing_listing(403));
    let err = controller.refresh().await.unwrap_err();
    assert_eq!(err, Error::Network("HTTP status: 403".to_string()));
    assert_eq!(err.to_string(), "Network Error: HTTP status: 403");
}

#[tokio::test]
async fn test_viewer_and_date_navigation_boundaries() {
    let mut controller = controller_for(three_day_bucket());
    controller.refresh().await.expect("refresh succeeds");
    let today = ymd(2024, 6, 3);

    controller.select_date(Some(ymd(2024, 6, 1)));
    let first = controller.visible()[0].key.clone();
    let last = controller.visible()[9].key.clone();

    assert!(controller.open_viewer(&first));
    assert!(!controller.has_previous());
    assert!(!controller.show_previous());
    assert_eq!(controller.viewer_key(), Some(first.as_str()));

    assert!(controller.open_viewer(&last));
    assert!(!controller.has_next());
    assert!(!controller.show_next());
    assert_eq!(controller.viewer_info().map(|i| i.position), Some(10));

    assert!(controller.next_date_at(today));
    assert!(controller.next_date_at(today));
    assert_eq!(controller.selected_date(), Some(today));
    assert!(!controller.has_next_date_at(today));
    assert!(!controller.next_date_at(today));

    // Moving back past the earliest day is allowed and simply shows nothing.
    controller.select_date(Some(ymd(2024, 6, 1)));
    controller.previous_date_at(today);
    assert_eq!(controller.selected_date(), Some(ymd(2024, 5, 31)));
    assert!(controller.visible().is_empty());
    assert!(!controller.has_more());
}

#[tokio::test]
async fn test_broken_image_only_leaves_the_display_window() {
    let mut controller = controller_for(three_day_bucket());
    controller.refresh().await.expect("refresh succeeds");
    let broken = controller.visible()[3].key.clone();

    controller.update(Message::ImageFailed(broken.clone()));

    assert_eq!(controller.visible().len(), 19);
    assert!(controller.visible().iter().all(|r| r.key != broken));
    assert!(controller.gallery().get(&broken).is_some());
}

#[tokio::test]
async fn test_scroll_subscription_follows_mount_lifecycle() {
    let signal = Arc::new(SentinelSignal::new());
    {
        let mut controller = controller_for(three_day_bucket());
        controller.refresh().await.expect("refresh succeeds");
        controller.mount(signal.clone());
        assert_eq!(signal.listener_count(), 1);

        signal.notify();
        signal.notify();
        controller.process_events();
        assert_eq!(controller.visible().len(), 45);
    }
    // Dropping the controller unregisters its callback.
    assert_eq!(signal.listener_count(), 0);
}

#[test]
fn test_listing_xml_round_trips_through_the_parser() {
    let xml = listing_xml(&[("a & b.jpg", "2024-06-01T10:00:00Z")], Some("page-1"));
    let page = bucket_lens::application::listing::parse_listing(&xml).expect("valid listing");
    assert_eq!(page.objects[0].key, "a & b.jpg");
    assert_eq!(page.next_continuation_token.as_deref(), Some("page-1"));
}

#[test]
fn test_config_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let saved = Config {
        endpoint: Some("https://photos.example.com".to_string()),
        page_size: Some(40),
        ..Config::default()
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.page_size(), 40);

    dir.close().expect("Failed to close temporary directory");
}
