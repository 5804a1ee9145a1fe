//! Range seeding: per-day failures are reported and do not stop the run.

mod common;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{config, date, init_logging, sunrise, ujjain};
use panchang_engine::synthetic::SyntheticProvider;
use panchang_engine::{
    Body, BodyPosition, CalcFlags, DailyPanchanga, DailySink, EphemerisInstant,
    EphemerisProvider, Location, PanchangError, PhaseInfo, ProviderError, RiseSetKind,
    seed_range,
};

/// Fails the ayanamsa query for one day's sunrise.
struct FlakyProvider {
    inner: SyntheticProvider,
    bad_sunrise: EphemerisInstant,
}

#[async_trait]
impl EphemerisProvider for FlakyProvider {
    async fn position(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError> {
        self.inner.position(at, body, flags).await
    }

    async fn phase(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<PhaseInfo, ProviderError> {
        self.inner.phase(at, body, flags).await
    }

    async fn rise_set(
        &self,
        after: EphemerisInstant,
        body: Body,
        location: &Location,
        kind: RiseSetKind,
    ) -> Result<Option<EphemerisInstant>, ProviderError> {
        self.inner.rise_set(after, body, location, kind).await
    }

    async fn ayanamsa(&self, at: EphemerisInstant) -> Result<f64, ProviderError> {
        if at.hours_since(self.bad_sunrise).abs() < 1.0 {
            return Err(ProviderError::Unavailable("ephemeris file locked".into()));
        }
        self.inner.ayanamsa(at).await
    }
}

#[derive(Default)]
struct VecSink {
    rows: Mutex<Vec<DailyPanchanga>>,
    reject: Option<NaiveDate>,
}

#[async_trait]
impl DailySink for VecSink {
    async fn upsert_daily(&self, row: DailyPanchanga) -> Result<(), PanchangError> {
        if self.reject == Some(row.date) {
            return Err(PanchangError::Sink(format!("constraint violation on {}", row.date)));
        }
        self.rows.lock().unwrap().push(row);
        Ok(())
    }
}

fn synthetic() -> SyntheticProvider {
    SyntheticProvider::new(sunrise(date(2024, 2, 1), &ujjain()), 290.0, 130.0)
}

#[tokio::test]
async fn provider_failure_skips_one_day() {
    init_logging();
    let loc = ujjain();
    let bad = date(2024, 2, 3);
    let provider = FlakyProvider {
        inner: synthetic(),
        bad_sunrise: sunrise(bad, &loc),
    };
    let sink = VecSink::default();

    let report = seed_range(
        &provider,
        &sink,
        &loc,
        date(2024, 2, 1),
        date(2024, 2, 5),
        &config(),
    )
    .await
    .unwrap();

    assert_eq!(report.computed, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total(), 5);
    assert_eq!(report.failures[0].0, bad);
    assert!(matches!(report.failures[0].1, PanchangError::Provider(ProviderError::Unavailable(_))));

    let rows = sink.rows.lock().unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 2, 1), date(2024, 2, 2), date(2024, 2, 4), date(2024, 2, 5)]
    );
}

#[tokio::test]
async fn sink_rejection_is_counted() {
    let sink = VecSink {
        reject: Some(date(2024, 2, 2)),
        ..VecSink::default()
    };
    let report = seed_range(
        &synthetic(),
        &sink,
        &ujjain(),
        date(2024, 2, 1),
        date(2024, 2, 3),
        &config(),
    )
    .await
    .unwrap();
    assert_eq!((report.computed, report.failed), (2, 1));
    assert!(matches!(report.failures[0].1, PanchangError::Sink(_)));
}

#[tokio::test]
async fn reversed_range_is_empty() {
    let sink = VecSink::default();
    let report = seed_range(
        &synthetic(),
        &sink,
        &ujjain(),
        date(2024, 2, 5),
        date(2024, 2, 1),
        &config(),
    )
    .await
    .unwrap();
    assert_eq!(report.total(), 0);
    assert!(sink.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_location_fails_the_run() {
    let sink = VecSink::default();
    let bad = Location::new("Nowhere", 0.0, 200.0, 0);
    let err = seed_range(
        &synthetic(),
        &sink,
        &bad,
        date(2024, 2, 1),
        date(2024, 2, 3),
        &config(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PanchangError::InvalidLocation(_)));
}
