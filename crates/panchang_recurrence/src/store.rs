//! Storage ports for precomputed days and generated occurrences.
//!
//! Expansion reads days through [`DailyStore`] and never calls the ephemeris
//! itself. The in-memory adapters back tests and small deployments; a
//! database adapter implements the same traits.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use panchang_base::Rashi;
use panchang_engine::{DailyPanchanga, DailySink, LocationKey, PanchangError};

use crate::error::RecurrenceError;
use crate::rule::Occurrence;

/// Filter over stored days. Unset filters match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub location: LocationKey,
    /// Days on which this tithi is current at sunrise or begins later.
    pub lunar_day: Option<u8>,
    pub adhika: Option<bool>,
    /// Days with (or without) a solar ingress.
    pub ingress: Option<bool>,
    /// Sign entered by the day's ingress.
    pub ingress_rashi: Option<Rashi>,
}

impl DailyQuery {
    pub fn range(start: NaiveDate, end: NaiveDate, location: LocationKey) -> Self {
        Self {
            start,
            end,
            location,
            lunar_day: None,
            adhika: None,
            ingress: None,
            ingress_rashi: None,
        }
    }

    pub fn matches(&self, row: &DailyPanchanga) -> bool {
        if row.date < self.start || row.date > self.end || row.location != self.location {
            return false;
        }
        if self.lunar_day.is_some_and(|n| !row.has_tithi(n)) {
            return false;
        }
        if self.adhika.is_some_and(|a| a != row.is_adhika()) {
            return false;
        }
        if self.ingress.is_some_and(|i| i != row.has_sankranti()) {
            return false;
        }
        match self.ingress_rashi {
            Some(rashi) => row.sankranti.is_some_and(|s| s.rashi == rashi),
            None => true,
        }
    }
}

/// Read side of the daily-attribute table.
#[async_trait]
pub trait DailyStore: Send + Sync {
    /// Matching rows in ascending date order.
    async fn query(&self, query: &DailyQuery) -> Result<Vec<DailyPanchanga>, RecurrenceError>;
}

/// Counts from one [`OccurrenceStore::upsert`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Occurrence table keyed by `(event_id, date)`.
#[async_trait]
pub trait OccurrenceStore: Send + Sync {
    /// Insert or replace each occurrence. Writing the same rows twice leaves
    /// the table as it was after the first write.
    async fn upsert(&self, occurrences: &[Occurrence]) -> Result<UpsertSummary, RecurrenceError>;

    /// All stored occurrences of an event in date order.
    async fn list(&self, event_id: &str) -> Result<Vec<Occurrence>, RecurrenceError>;
}

type DayKey = (NaiveDate, LocationKey);

/// In-memory daily table. Also accepts rows from range seeding.
#[derive(Debug, Default)]
pub struct InMemoryDailyStore {
    rows: RwLock<BTreeMap<DayKey, DailyPanchanga>>,
    queries: AtomicUsize,
}

impl InMemoryDailyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<DayKey, DailyPanchanga>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<DayKey, DailyPanchanga>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, row: DailyPanchanga) {
        self.write().insert((row.date, row.location.clone()), row);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of [`DailyStore::query`] calls served.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DailyStore for InMemoryDailyStore {
    async fn query(&self, query: &DailyQuery) -> Result<Vec<DailyPanchanga>, RecurrenceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        // Keys sort by date first, so the scan is already in date order.
        let rows: Vec<DailyPanchanga> = self
            .read()
            .values()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();
        log::debug!(
            "daily query {}..={} matched {} rows",
            query.start,
            query.end,
            rows.len()
        );
        Ok(rows)
    }
}

#[async_trait]
impl DailySink for InMemoryDailyStore {
    async fn upsert_daily(&self, row: DailyPanchanga) -> Result<(), PanchangError> {
        self.insert(row);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOccurrenceStore {
    rows: RwLock<BTreeMap<(String, NaiveDate), Occurrence>>,
}

impl InMemoryOccurrenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OccurrenceStore for InMemoryOccurrenceStore {
    async fn upsert(&self, occurrences: &[Occurrence]) -> Result<UpsertSummary, RecurrenceError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let mut summary = UpsertSummary::default();
        for occ in occurrences {
            let key = (occ.event_id.clone(), occ.date);
            match rows.insert(key, occ.clone()) {
                None => summary.inserted += 1,
                Some(previous) if previous == *occ => summary.unchanged += 1,
                Some(_) => summary.updated += 1,
            }
        }
        Ok(summary)
    }

    async fn list(&self, event_id: &str) -> Result<Vec<Occurrence>, RecurrenceError> {
        Ok(self
            .rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|o| o.event_id == event_id)
            .cloned()
            .collect())
    }
}
