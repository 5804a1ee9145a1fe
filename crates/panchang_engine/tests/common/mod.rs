//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use panchang_engine::{EphemerisInstant, Location, PanchangConfig};

pub fn ujjain() -> Location {
    Location::new("Ujjain", 23.18, 75.79, 330)
}

pub fn greenwich() -> Location {
    Location::new("Greenwich", 51.48, 0.0, 0)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> EphemerisInstant {
    EphemerisInstant::from_utc(Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
}

/// Local midnight of `date` at `location`.
pub fn midnight(date: NaiveDate, location: &Location) -> EphemerisInstant {
    let offset = FixedOffset::east_opt(location.utc_offset_minutes * 60).unwrap();
    EphemerisInstant::local_midnight(date, offset).unwrap()
}

/// Synthetic sunrise: 06:00 local.
pub fn sunrise(date: NaiveDate, location: &Location) -> EphemerisInstant {
    midnight(date, location).add_hours(6.0)
}

pub fn config() -> PanchangConfig {
    PanchangConfig::default()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
