//! Lunar month naming and adhika (intercalary) detection.
//!
//! The month is named from the Sun's sidereal sign at the full moon that
//! governs the query instant: the next full moon while the Moon waxes, the
//! previous one while it wanes. Purnimanta months end at the full moon, so
//! their waning days already belong to the following month.
//!
//! A lunation (new moon to new moon) during which the Sun does not change
//! sign is adhika. Detection compares the Sun's sign at the bracketing new
//! moons.

use std::ops::RangeInclusive;

use panchang_base::{
    Masa, MonthNumbering, Paksha, day_in_month, masa_from_full_moon_sun, rashi_from_longitude,
};
use panchang_math::{LUNAR_DAY_COUNT, find_boundary, index_from_progress, lunar_day_progress};
use serde::{Deserialize, Serialize};

use crate::config::PanchangConfig;
use crate::error::{PanchangError, ProviderError};
use crate::instant::EphemerisInstant;
use crate::provider::{Body, EphemerisProvider, sidereal_longitude, sun_moon_longitudes};

/// Offset used when no exact full or new moon is found, in days.
const FALLBACK_OFFSET_DAYS: f64 = 15.0;

/// How close (in tithis) the daily scan must come before bracketing.
const SCAN_REACH_TITHIS: u8 = 3;

/// The two syzygies the month logic searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarPhase {
    FullMoon,
    NewMoon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl LunarPhase {
    /// Lunar-day progress at which the phase occurs.
    pub const fn target_progress(self) -> f64 {
        match self {
            Self::FullMoon => 15.0,
            Self::NewMoon => 30.0,
        }
    }

    /// Tithi numbers from which the phase lies within reach of the scan.
    ///
    /// Ahead: the three tithis before it. Behind: the three after it.
    fn scan_window(self, direction: SearchDirection) -> RangeInclusive<u8> {
        let last_before = self.target_progress() as u8;
        match direction {
            SearchDirection::Forward => (last_before + 1 - SCAN_REACH_TITHIS)..=last_before,
            SearchDirection::Backward => {
                let first_after = last_before % LUNAR_DAY_COUNT + 1;
                first_after..=(first_after + SCAN_REACH_TITHIS - 1)
            }
        }
    }
}

/// Lunar month state at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarMonth {
    pub masa: Masa,
    pub numbering: MonthNumbering,
    /// Continuous day number within the month, 1-30.
    pub day_in_month: u8,
    pub paksha: Paksha,
    pub adhika: bool,
    /// The full moon whose solar sign names the month.
    pub governing_full_moon: EphemerisInstant,
    /// New moon at or before the query.
    pub lunation_start: EphemerisInstant,
    /// New moon after the query.
    pub lunation_end: EphemerisInstant,
}

async fn lunar_day_progress_at<P>(provider: &P, at: EphemerisInstant) -> Result<f64, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let (sun, moon) = sun_moon_longitudes(provider, at).await?;
    Ok(lunar_day_progress(sun, moon))
}

/// Nearest full or new moon from `from` in the given direction.
///
/// Scans one day at a time until the tithi is within three of the phase,
/// then brackets it with `config.phase_search`. If nothing is found within
/// `config.phase_scan_days`, returns `from` shifted by 15 days.
pub async fn find_lunar_phase<P>(
    provider: &P,
    from: EphemerisInstant,
    phase: LunarPhase,
    direction: SearchDirection,
    config: &PanchangConfig,
) -> Result<EphemerisInstant, PanchangError>
where
    P: EphemerisProvider + ?Sized,
{
    let sign = match direction {
        SearchDirection::Forward => 1.0,
        SearchDirection::Backward => -1.0,
    };
    let window = phase.scan_window(direction);

    for day in 0..=config.phase_scan_days {
        let t = from.add_hours(sign * 24.0 * day as f64);
        let progress = lunar_day_progress_at(provider, t).await?;
        if !window.contains(&index_from_progress(progress, LUNAR_DAY_COUNT)) {
            continue;
        }

        let search_start = match direction {
            SearchDirection::Forward => t,
            SearchDirection::Backward => t.add_hours(-config.phase_search.horizon_hours),
        };
        let hit = find_boundary(
            search_start,
            |x| lunar_day_progress_at(provider, x),
            phase.target_progress(),
            LUNAR_DAY_COUNT as f64,
            &config.phase_search,
        )
        .await?;
        if let Some(hit) = hit {
            return Ok(hit);
        }
        break;
    }

    let fallback = from.add_hours(sign * 24.0 * FALLBACK_OFFSET_DAYS);
    log::warn!("{phase:?} not found {direction:?} from {from}; using {fallback}");
    Ok(fallback)
}

/// Lunar month state at `at`.
pub async fn masa_for_instant<P>(
    provider: &P,
    at: EphemerisInstant,
    config: &PanchangConfig,
) -> Result<LunarMonth, PanchangError>
where
    P: EphemerisProvider + ?Sized,
{
    let progress = lunar_day_progress_at(provider, at).await?;
    let tithi = index_from_progress(progress, LUNAR_DAY_COUNT);
    lunar_month_at(provider, at, tithi, config).await
}

/// Lunar month state at `at` when its tithi number is already known.
pub(crate) async fn lunar_month_at<P>(
    provider: &P,
    at: EphemerisInstant,
    tithi_number: u8,
    config: &PanchangConfig,
) -> Result<LunarMonth, PanchangError>
where
    P: EphemerisProvider + ?Sized,
{
    let paksha = if tithi_number <= 15 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    };
    let numbering = config.month_numbering;

    let full_moon_direction = if paksha.is_waxing() {
        SearchDirection::Forward
    } else {
        SearchDirection::Backward
    };
    let governing_full_moon =
        find_lunar_phase(provider, at, LunarPhase::FullMoon, full_moon_direction, config).await?;
    let sun_at_full = sidereal_longitude(provider, governing_full_moon, Body::Sun).await?;
    let mut masa = masa_from_full_moon_sun(sun_at_full);
    if !paksha.is_waxing() && numbering == MonthNumbering::Purnimanta {
        masa = masa.next();
    }

    let lunation_start =
        find_lunar_phase(provider, at, LunarPhase::NewMoon, SearchDirection::Backward, config)
            .await?;
    let lunation_end =
        find_lunar_phase(provider, at, LunarPhase::NewMoon, SearchDirection::Forward, config)
            .await?;
    let adhika = is_adhika(provider, lunation_start, lunation_end).await?;

    Ok(LunarMonth {
        masa,
        numbering,
        day_in_month: day_in_month(tithi_number, numbering),
        paksha,
        adhika,
        governing_full_moon,
        lunation_start,
        lunation_end,
    })
}

/// True when the Sun is in the same sign at both new moons.
pub async fn is_adhika<P>(
    provider: &P,
    start_new_moon: EphemerisInstant,
    end_new_moon: EphemerisInstant,
) -> Result<bool, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let first = rashi_from_longitude(sidereal_longitude(provider, start_new_moon, Body::Sun).await?);
    let last = rashi_from_longitude(sidereal_longitude(provider, end_new_moon, Body::Sun).await?);
    Ok(first == last)
}
