//! Bounded, time-limited cache of daily computations.
//!
//! Keyed by civil date and rounded location. Only successful computations
//! are stored. Reads do not refresh an entry's position, so when the cache
//! is full the oldest insertion is evicted first. Entries older than the TTL
//! are dropped on read.
//!
//! The lock is never held across an `.await`: two callers missing on the
//! same cold key may both compute, and the second insert wins.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use lru::LruCache;
use tokio::time::Instant;

use crate::config::{CacheConfig, PanchangConfig};
use crate::daily::compute_daily;
use crate::error::PanchangError;
use crate::location::{Location, LocationKey};
use crate::panchang_types::DailyPanchanga;
use crate::provider::EphemerisProvider;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    date: NaiveDate,
    location: LocationKey,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    panchanga: Arc<DailyPanchanga>,
    computed_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub ttl: Duration,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
struct Inner {
    entries: LruCache<CacheKey, CacheEntry>,
    hits: u64,
    misses: u64,
}

#[derive(Debug)]
pub struct PanchangCache {
    inner: Mutex<Inner>,
    max_size: NonZeroUsize,
    ttl: Duration,
    coordinate_decimals: u32,
}

impl PanchangCache {
    pub fn new(config: &CacheConfig) -> Self {
        let max_size = NonZeroUsize::new(config.max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(max_size),
                hits: 0,
                misses: 0,
            }),
            max_size,
            ttl: config.ttl(),
            coordinate_decimals: config.coordinate_decimals,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(&self, date: NaiveDate, location: &Location) -> CacheKey {
        CacheKey {
            date,
            location: location.key(self.coordinate_decimals),
        }
    }

    /// Cached panchanga, if present and younger than the TTL.
    pub fn get(&self, date: NaiveDate, location: &Location) -> Option<Arc<DailyPanchanga>> {
        let key = self.key(date, location);
        let mut inner = self.lock();
        let lookup = inner
            .entries
            .peek(&key)
            .map(|e| (e.computed_at.elapsed() < self.ttl, Arc::clone(&e.panchanga)));
        let fresh = match lookup {
            Some((true, panchanga)) => Some(panchanga),
            Some((false, _)) => {
                inner.entries.pop(&key);
                log::debug!("cache entry for {date} expired");
                None
            }
            None => None,
        };
        if fresh.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        fresh
    }

    pub fn put(&self, date: NaiveDate, location: &Location, panchanga: Arc<DailyPanchanga>) {
        let key = self.key(date, location);
        let entry = CacheEntry {
            panchanga,
            computed_at: Instant::now(),
        };
        let mut inner = self.lock();
        if let Some((evicted, _)) = inner.entries.push(key.clone(), entry) {
            if evicted != key {
                log::debug!("cache full, evicted {}", evicted.date);
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            size: inner.entries.len(),
            max_size: self.max_size.get(),
            ttl: self.ttl,
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    /// Cached panchanga, computing and storing it on a miss.
    ///
    /// Errors are returned to the caller and never cached.
    pub async fn get_or_compute<P>(
        &self,
        provider: &P,
        date: NaiveDate,
        location: &Location,
        config: &PanchangConfig,
    ) -> Result<Arc<DailyPanchanga>, PanchangError>
    where
        P: EphemerisProvider + ?Sized,
    {
        if let Some(hit) = self.get(date, location) {
            return Ok(hit);
        }
        let computed = Arc::new(compute_daily(provider, date, location, config).await?);
        self.put(date, location, Arc::clone(&computed));
        Ok(computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_clamped() {
        let cache = PanchangCache::new(&CacheConfig {
            max_size: 0,
            ttl_secs: 10,
            coordinate_decimals: 4,
        });
        assert_eq!(cache.stats().max_size, 1);
    }

    #[test]
    fn empty_stats() {
        let cache = PanchangCache::new(&CacheConfig::default());
        let s = cache.stats();
        assert_eq!((s.size, s.max_size), (0, 512));
        assert_eq!(s.ttl, Duration::from_secs(86_400));
    }
}
