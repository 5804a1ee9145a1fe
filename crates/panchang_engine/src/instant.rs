//! Ephemeris time coordinate.
//!
//! Instants are Julian Days on the UT scale. They convert to `chrono`
//! date-times for display and civil-date logic; all searching happens on the
//! raw JD so the boundary finder can step in fractional hours.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use panchang_math::SearchTime;
use serde::{Deserialize, Serialize};

/// Julian Day of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A moment on the UT Julian Day scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EphemerisInstant(f64);

impl EphemerisInstant {
    pub const fn from_jd_ut(jd: f64) -> Self {
        Self(jd)
    }

    pub const fn jd_ut(self) -> f64 {
        self.0
    }

    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        let seconds = utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 * 1e-9;
        Self(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Civil UTC time, rounded to the millisecond.
    ///
    /// `None` if the JD is not finite or lies outside chrono's range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let millis = ((self.0 - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1_000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }

    pub fn to_local(self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.to_utc().map(|utc| utc.with_timezone(&offset))
    }

    /// Local midnight starting `date` at a fixed UTC offset.
    pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<Self> {
        offset
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
            .map(|local| Self::from_utc(local.with_timezone(&Utc)))
    }

    pub fn add_hours(self, hours: f64) -> Self {
        Self(self.0 + hours / 24.0)
    }

    /// Hours from `earlier` to `self` (negative if `earlier` is later).
    pub fn hours_since(self, earlier: Self) -> f64 {
        (self.0 - earlier.0) * 24.0
    }
}

impl SearchTime for EphemerisInstant {
    fn offset_hours(self, hours: f64) -> Self {
        self.add_hours(hours)
    }

    fn hours_until(self, later: Self) -> f64 {
        later.hours_since(self)
    }
}

impl fmt::Display for EphemerisInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(utc) => write!(f, "{}", utc.format("%Y-%m-%dT%H:%M:%SZ")),
            None => write!(f, "JD {:.6}", self.0),
        }
    }
}
