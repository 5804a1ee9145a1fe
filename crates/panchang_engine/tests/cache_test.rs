//! Cache behaviour under paused tokio time.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{config, date, sunrise, ujjain};
use panchang_engine::synthetic::{CountingProvider, SyntheticProvider};
use panchang_engine::{CacheConfig, DailyPanchanga, Location, PanchangCache, compute_daily};

fn counting() -> CountingProvider<SyntheticProvider> {
    let epoch = sunrise(date(2024, 3, 1), &ujjain());
    CountingProvider::new(SyntheticProvider::new(epoch, 320.0, 75.0))
}

fn cache(max_size: usize, ttl_secs: u64) -> PanchangCache {
    PanchangCache::new(&CacheConfig {
        max_size,
        ttl_secs,
        coordinate_decimals: 4,
    })
}

async fn row_for(day: chrono::NaiveDate) -> Arc<DailyPanchanga> {
    let provider = counting();
    Arc::new(compute_daily(&provider, day, &ujjain(), &config()).await.unwrap())
}

#[tokio::test(start_paused = true)]
async fn hit_skips_the_provider() {
    let provider = counting();
    let cache = cache(16, 3_600);
    let day = date(2024, 3, 5);

    let first = cache
        .get_or_compute(&provider, day, &ujjain(), &config())
        .await
        .unwrap();
    assert!(provider.calls() > 0);

    provider.reset();
    let second = cache
        .get_or_compute(&provider, day, &ujjain(), &config())
        .await
        .unwrap();
    assert_eq!(provider.calls(), 0);
    assert!(Arc::ptr_eq(&first, &second));

    let stats = cache.stats();
    assert_eq!((stats.size, stats.hits, stats.misses), (1, 1, 1));
}

#[tokio::test(start_paused = true)]
async fn expired_entry_is_recomputed() {
    let provider = counting();
    let cache = cache(16, 60);
    let day = date(2024, 3, 5);

    cache
        .get_or_compute(&provider, day, &ujjain(), &config())
        .await
        .unwrap();
    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(cache.get(day, &ujjain()).is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get(day, &ujjain()).is_none());
    assert_eq!(cache.stats().size, 0);

    provider.reset();
    cache
        .get_or_compute(&provider, day, &ujjain(), &config())
        .await
        .unwrap();
    assert!(provider.calls() > 0);
}

#[tokio::test(start_paused = true)]
async fn clear_drops_entries_and_counters() {
    let provider = counting();
    let cache = cache(16, 3_600);
    let day = date(2024, 3, 5);

    cache
        .get_or_compute(&provider, day, &ujjain(), &config())
        .await
        .unwrap();
    cache.clear();
    let stats = cache.stats();
    assert_eq!((stats.size, stats.hits, stats.misses), (0, 0, 0));

    provider.reset();
    cache
        .get_or_compute(&provider, day, &ujjain(), &config())
        .await
        .unwrap();
    assert!(provider.calls() > 0);
}

#[tokio::test(start_paused = true)]
async fn failures_are_not_cached() {
    let epoch = sunrise(date(2024, 3, 1), &ujjain());
    let provider = CountingProvider::new(SyntheticProvider::new(epoch, 0.0, 0.0).polar_night());
    let cache = cache(16, 3_600);
    let day = date(2024, 3, 5);

    assert!(
        cache
            .get_or_compute(&provider, day, &ujjain(), &config())
            .await
            .is_err()
    );
    let after_first = provider.calls();
    assert!(
        cache
            .get_or_compute(&provider, day, &ujjain(), &config())
            .await
            .is_err()
    );
    assert!(provider.calls() > after_first);
    assert_eq!(cache.stats().size, 0);
}

#[tokio::test(start_paused = true)]
async fn oldest_insertion_is_evicted_first() {
    let cache = cache(2, 3_600);
    let loc = ujjain();
    let days = [date(2024, 3, 5), date(2024, 3, 6), date(2024, 3, 7)];

    cache.put(days[0], &loc, row_for(days[0]).await);
    cache.put(days[1], &loc, row_for(days[1]).await);
    // Reading does not refresh the entry.
    assert!(cache.get(days[0], &loc).is_some());
    cache.put(days[2], &loc, row_for(days[2]).await);

    assert!(cache.get(days[0], &loc).is_none());
    assert!(cache.get(days[1], &loc).is_some());
    assert!(cache.get(days[2], &loc).is_some());
    assert_eq!(cache.stats().size, 2);
}

#[tokio::test(start_paused = true)]
async fn key_uses_rounded_coordinates_and_offset() {
    let cache = cache(16, 3_600);
    let day = date(2024, 3, 5);
    cache.put(day, &ujjain(), row_for(day).await);

    let nearby = Location::new("Ujjain city", 23.180_01, 75.789_99, 330);
    assert!(cache.get(day, &nearby).is_some());

    let other_zone = Location::new("Ujjain", 23.18, 75.79, 300);
    assert!(cache.get(day, &other_zone).is_none());
}
