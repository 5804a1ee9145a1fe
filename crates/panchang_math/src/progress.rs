//! Cyclic progress values derived from sidereal Sun/Moon longitudes.
//!
//! Each panchanga attribute is a position on its own cycle:
//!
//! | attribute | quantity                     | span      | cycle |
//! |-----------|------------------------------|-----------|-------|
//! | tithi     | Moon - Sun                   | 12 deg    | 30    |
//! | nakshatra | Moon                         | 13 deg 20'| 27    |
//! | yoga      | Sun + Moon                   | 13 deg 20'| 27    |
//! | karana    | Moon - Sun                   | 6 deg     | 60    |
//!
//! The integer part of a progress value is the 0-based index of the current
//! segment; the fractional part is how far through it the bodies are.

use serde::{Deserialize, Serialize};

use crate::util::{normalize_360, normalize_cyclic};

pub const LUNAR_DAY_COUNT: u8 = 30;
pub const MANSION_COUNT: u8 = 27;
pub const YOGA_COUNT: u8 = 27;
pub const HALF_DAY_COUNT: u8 = 60;

/// Elongation span of one tithi.
pub const LUNAR_DAY_SPAN_DEG: f64 = 12.0;
/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const MANSION_SPAN_DEG: f64 = 360.0 / 27.0;
pub const YOGA_SPAN_DEG: f64 = 360.0 / 27.0;
pub const HALF_DAY_SPAN_DEG: f64 = 6.0;

/// Progress through the 30 tithis, in [0, 30).
pub fn lunar_day_progress(sun_lon: f64, moon_lon: f64) -> f64 {
    normalize_cyclic(
        normalize_360(moon_lon - sun_lon) / LUNAR_DAY_SPAN_DEG,
        LUNAR_DAY_COUNT as f64,
    )
}

/// Progress through the 27 nakshatras, in [0, 27).
pub fn mansion_progress(moon_lon: f64) -> f64 {
    normalize_cyclic(
        normalize_360(moon_lon) / MANSION_SPAN_DEG,
        MANSION_COUNT as f64,
    )
}

/// Progress through the 27 yogas, in [0, 27).
pub fn yoga_progress(sun_lon: f64, moon_lon: f64) -> f64 {
    normalize_cyclic(
        normalize_360(sun_lon + moon_lon) / YOGA_SPAN_DEG,
        YOGA_COUNT as f64,
    )
}

/// Progress through the 60 karanas, in [0, 60). Exactly twice the tithi progress.
pub fn half_day_progress(sun_lon: f64, moon_lon: f64) -> f64 {
    lunar_day_progress(sun_lon, moon_lon) * 2.0
}

/// 1-based segment number for a progress value (floor + 1), clamped to `count`.
pub fn index_from_progress(progress: f64, count: u8) -> u8 {
    let idx = normalize_cyclic(progress, count as f64).floor() as u8 + 1;
    idx.min(count)
}

/// The four angular attributes that the boundary finder tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    LunarDay,
    Mansion,
    Yoga,
    HalfDay,
}

impl Attribute {
    /// Number of segments in one cycle.
    pub const fn count(self) -> u8 {
        match self {
            Self::LunarDay => LUNAR_DAY_COUNT,
            Self::Mansion => MANSION_COUNT,
            Self::Yoga => YOGA_COUNT,
            Self::HalfDay => HALF_DAY_COUNT,
        }
    }

    /// Cycle length as a float, for the boundary finder.
    pub const fn modulus(self) -> f64 {
        self.count() as f64
    }

    /// Progress value for the given sidereal longitudes.
    pub fn progress(self, sun_lon: f64, moon_lon: f64) -> f64 {
        match self {
            Self::LunarDay => lunar_day_progress(sun_lon, moon_lon),
            Self::Mansion => mansion_progress(moon_lon),
            Self::Yoga => yoga_progress(sun_lon, moon_lon),
            Self::HalfDay => half_day_progress(sun_lon, moon_lon),
        }
    }

    /// Name of the daily element the attribute measures.
    pub const fn label(self) -> &'static str {
        match self {
            Self::LunarDay => "tithi",
            Self::Mansion => "nakshatra",
            Self::Yoga => "yoga",
            Self::HalfDay => "karana",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_moon_is_first_tithi() {
        assert_eq!(lunar_day_progress(100.0, 100.0), 0.0);
        assert_eq!(index_from_progress(lunar_day_progress(100.0, 100.0), 30), 1);
    }

    #[test]
    fn full_moon_starts_sixteenth_tithi() {
        let p = lunar_day_progress(10.0, 190.0);
        assert!((p - 15.0).abs() < 1e-12);
        assert_eq!(index_from_progress(p, 30), 16);
    }

    #[test]
    fn elongation_wraps_across_zero() {
        // Moon 5 deg behind Sun: elongation 355, last tithi.
        let p = lunar_day_progress(5.0, 0.0);
        assert!((p - 355.0 / 12.0).abs() < 1e-12);
        assert_eq!(index_from_progress(p, 30), 30);
    }

    #[test]
    fn mansion_boundaries() {
        assert_eq!(index_from_progress(mansion_progress(0.0), 27), 1);
        assert_eq!(index_from_progress(mansion_progress(13.4), 27), 2);
        assert_eq!(index_from_progress(mansion_progress(359.9), 27), 27);
    }

    #[test]
    fn yoga_uses_sum() {
        let p = yoga_progress(200.0, 200.0);
        assert!((p - 40.0 / MANSION_SPAN_DEG).abs() < 1e-12);
    }

    #[test]
    fn attribute_counts() {
        assert_eq!(Attribute::LunarDay.count(), 30);
        assert_eq!(Attribute::Mansion.count(), 27);
        assert_eq!(Attribute::Yoga.count(), 27);
        assert_eq!(Attribute::HalfDay.count(), 60);
    }

    #[test]
    fn labels_name_the_daily_elements() {
        assert_eq!(Attribute::LunarDay.label(), "tithi");
        assert_eq!(Attribute::HalfDay.label(), "karana");
    }

    #[test]
    fn index_clamps_at_top() {
        assert_eq!(index_from_progress(29.999_999_999, 30), 30);
        assert_eq!(index_from_progress(30.0, 30), 1);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent_and_bounded(x in -1.0e6f64..1.0e6f64) {
            let once = normalize_360(x);
            prop_assert!((0.0..360.0).contains(&once));
            prop_assert_eq!(normalize_360(once), once);
        }

        #[test]
        fn progress_values_stay_in_range(sun in -720.0f64..720.0, moon in -720.0f64..720.0) {
            let tithi = lunar_day_progress(sun, moon);
            let nak = mansion_progress(moon);
            let yoga = yoga_progress(sun, moon);
            let karana = half_day_progress(sun, moon);
            prop_assert!((0.0..30.0).contains(&tithi));
            prop_assert!((0.0..27.0).contains(&nak));
            prop_assert!((0.0..27.0).contains(&yoga));
            prop_assert!((0.0..60.0).contains(&karana));
        }

        #[test]
        fn karana_is_twice_tithi(sun in 0.0f64..360.0, moon in 0.0f64..360.0) {
            let tithi = lunar_day_progress(sun, moon);
            let karana = half_day_progress(sun, moon);
            prop_assert_eq!(normalize_cyclic(karana, 60.0), normalize_cyclic(tithi * 2.0, 60.0));
        }
    }
}
