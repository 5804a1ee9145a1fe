//! Vedic calendar name tables and classification.
//!
//! This crate provides:
//! - Tithi (30) with paksha, nakshatra (27) with pada, yoga (27), karana (60 slots)
//! - Rashi (12) and longitude-to-sign mapping
//! - Masa (12), month numbering, and full-moon month naming
//! - Samvatsara (60-year cycle) and Vikram/Shaka era years
//! - Vaar (weekday) and the weekday-fixed Rahu/Yamaganda/Gulika windows
//!
//! Everything here is a pure lookup. Instants and ephemeris sampling live in
//! `panchang_engine`.

pub mod era;
pub mod karana;
pub mod masa;
pub mod nakshatra;
pub mod rashi;
pub mod samvatsara;
pub mod tithi;
pub mod vaar;
pub mod yoga;

pub use era::{
    EraYears, SHAKA_CYCLE_OFFSET, SHAKA_YEAR_OFFSET, VIKRAM_CYCLE_OFFSET, VIKRAM_YEAR_OFFSET,
    era_years, precedes_lunar_new_year,
};
pub use karana::{Karana, KaranaClass};
pub use masa::{
    ALL_MASAS, FULL_MOON_SIGN_OFFSET_DEG, Masa, MonthNumbering, day_in_month,
    masa_from_full_moon_sun,
};
pub use nakshatra::{ALL_NAKSHATRAS, Nakshatra, NakshatraPosition, PADA_SPAN, nakshatra_from_longitude};
pub use rashi::{ALL_RASHIS, RASHI_SPAN_DEG, Rashi, rashi_from_longitude};
pub use samvatsara::{ALL_SAMVATSARAS, Samvatsara};
pub use tithi::{ALL_TITHIS, Paksha, Tithi};
pub use vaar::{ALL_VAARS, Kalam, Vaar};
pub use yoga::{ALL_YOGAS, Yoga};
