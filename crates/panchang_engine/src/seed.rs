//! Bulk computation of a date range into a daily store.
//!
//! Days are computed one after another. A day that fails (provider error,
//! no sunrise, sink rejection) is logged and counted; the range carries on.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::PanchangConfig;
use crate::daily::compute_daily;
use crate::error::{ConfigError, PanchangError};
use crate::location::Location;
use crate::panchang_types::DailyPanchanga;
use crate::provider::EphemerisProvider;

/// Destination for computed days, keyed by (date, location).
#[async_trait]
pub trait DailySink: Send + Sync {
    /// Insert or replace the row for `row.date` and `row.location`.
    async fn upsert_daily(&self, row: DailyPanchanga) -> Result<(), PanchangError>;
}

/// Outcome of a [`seed_range`] run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub computed: usize,
    pub failed: usize,
    pub failures: Vec<(NaiveDate, PanchangError)>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.computed + self.failed
    }
}

/// Compute every date in `start..=end` and hand each row to `sink`.
///
/// Fails up front only for an invalid location or config; per-day failures
/// land in the report.
pub async fn seed_range<P, S>(
    provider: &P,
    sink: &S,
    location: &Location,
    start: NaiveDate,
    end: NaiveDate,
    config: &PanchangConfig,
) -> Result<SeedReport, PanchangError>
where
    P: EphemerisProvider + ?Sized,
    S: DailySink + ?Sized,
{
    location.validate()?;
    if let Err(ConfigError::Invalid { field, .. }) = config.validate() {
        return Err(PanchangError::InvalidConfig(field));
    }

    let mut report = SeedReport::default();
    if end < start {
        log::warn!("seed range {start}..={end} is empty");
        return Ok(report);
    }

    for date in start.iter_days().take_while(|d| *d <= end) {
        let outcome = match compute_daily(provider, date, location, config).await {
            Ok(row) => sink.upsert_daily(row).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => report.computed += 1,
            Err(e) => {
                log::warn!("seeding {date} at {} failed: {e}", location.name);
                report.failed += 1;
                report.failures.push((date, e));
            }
        }
    }

    log::info!(
        "seeded {}..={} at {}: {} computed, {} failed",
        start,
        end,
        location.name,
        report.computed,
        report.failed
    );
    Ok(report)
}
