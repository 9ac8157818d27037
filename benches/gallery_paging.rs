// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the in-memory gallery operations.
//!
//! Measures the performance of:
//! - Index building (dedup, sort, day grouping) for a large bucket
//! - Page queries with and without a date filter
//! - Viewer navigation over the filtered subset

use bucket_lens::application::index::GalleryIndex;
use bucket_lens::application::query::{navigation, page};
use bucket_lens::domain::gallery::{DateFilter, ImageRecord, ObjectRecord};
use chrono::{Duration, FixedOffset, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const IMAGE_COUNT: usize = 10_000;

/// Synthetic bucket: one image every 37 minutes, listed oldest first.
fn records() -> Vec<ImageRecord> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    (0..IMAGE_COUNT)
        .map(|i| {
            let ts = start + Duration::minutes(37 * i as i64);
            ImageRecord::from_object(
                ObjectRecord::new(format!("photos/IMG_{i:05}.jpg"), ts),
                2_000_000,
                "image/jpeg",
            )
        })
        .collect()
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_paging");
    let input = records();

    group.bench_function("build_index", |b| {
        b.iter(|| {
            black_box(GalleryIndex::build_in(input.clone(), &utc()));
        });
    });

    group.finish();
}

fn bench_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_paging");
    let gallery = GalleryIndex::build_in(records(), &utc());
    let busy_day = gallery.dates().as_slice()[gallery.dates().len() / 2];

    group.bench_function("page_all_dates_deep", |b| {
        b.iter(|| black_box(page(&gallery, DateFilter::default(), 400, 20)));
    });

    group.bench_function("page_single_day", |b| {
        b.iter(|| black_box(page(&gallery, DateFilter::on(busy_day), 1, 20)));
    });

    group.finish();
}

fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_paging");
    let gallery = GalleryIndex::build_in(records(), &utc());
    let subset: Vec<&ImageRecord> = gallery.filtered(DateFilter::default()).collect();
    let middle = subset[subset.len() / 2].key.clone();

    group.bench_function("next_in_subset", |b| {
        b.iter(|| black_box(navigation::next(&subset, &middle)));
    });

    group.finish();
}

criterion_group!(benches, bench_build_index, bench_page, bench_navigate);
criterion_main!(benches);
