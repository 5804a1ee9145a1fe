//! Vikram and Shaka era years with their 60-year cycle names.
//!
//! Both eras start their year at the lunar new year (Chaitra Shukla
//! Pratipada), so a civil date early in the year that still falls in the
//! previous lunar year takes one less than the plain offset. The new-year
//! test here is month based; it does not locate the exact new-moon instant.
//!
//! The cycle offsets are calibration constants checked against reference
//! years, not derived from an epoch rule:
//! - Shaka 1909 (CE 1987-88) = Prabhava
//! - Shaka 1946 (CE 2024-25) = Krodhi
//! - Vikram 2081 (CE 2024-25) = Kaalayukti

use serde::{Deserialize, Serialize};

use crate::masa::{Masa, MonthNumbering};
use crate::samvatsara::Samvatsara;
use crate::tithi::Paksha;

/// Vikram Samvat = civil year + 57 (after the lunar new year).
pub const VIKRAM_YEAR_OFFSET: i32 = 57;
/// Shaka Samvat = civil year - 78 (after the lunar new year).
pub const SHAKA_YEAR_OFFSET: i32 = 78;
/// Added to a Vikram year before reducing modulo 60.
pub const VIKRAM_CYCLE_OFFSET: i32 = 10;
/// Added to a Shaka year before reducing modulo 60.
pub const SHAKA_CYCLE_OFFSET: i32 = 11;

/// Era year numbers and their samvatsara names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraYears {
    pub vikram: i32,
    pub vikram_samvatsara: Samvatsara,
    pub shaka: i32,
    pub shaka_samvatsara: Samvatsara,
}

/// Whether a date in `civil_month` (1-12) still belongs to the previous
/// lunar year.
///
/// True for the winter months Margashirsha..Phalguna seen in the first half
/// of the civil year, and for the Purnimanta waning half of Chaitra, which
/// precedes Chaitra Shukla Pratipada.
pub fn precedes_lunar_new_year(
    civil_month: u32,
    masa: Masa,
    paksha: Paksha,
    numbering: MonthNumbering,
) -> bool {
    if civil_month > 6 {
        return false;
    }
    if masa.index() >= Masa::Margashirsha.index() {
        return true;
    }
    masa == Masa::Chaitra
        && paksha == Paksha::Krishna
        && numbering == MonthNumbering::Purnimanta
}

/// Era years for a civil year, with the new-year correction applied.
pub fn era_years(civil_year: i32, before_new_year: bool) -> EraYears {
    let correction = if before_new_year { 1 } else { 0 };
    let vikram = civil_year + VIKRAM_YEAR_OFFSET - correction;
    let shaka = civil_year - SHAKA_YEAR_OFFSET - correction;
    EraYears {
        vikram,
        vikram_samvatsara: Samvatsara::from_cycle_position(vikram + VIKRAM_CYCLE_OFFSET),
        shaka,
        shaka_samvatsara: Samvatsara::from_cycle_position(shaka + SHAKA_CYCLE_OFFSET),
    }
}
