//! Types for the daily panchanga record.

use chrono::NaiveDate;
use panchang_base::{
    EraYears, Kalam, Karana, KaranaClass, Nakshatra, Paksha, Rashi, Tithi, Vaar, Yoga,
};
use serde::{Deserialize, Serialize};

use crate::instant::EphemerisInstant;
use crate::location::LocationKey;
use crate::masa::LunarMonth;
use crate::sankranti::Sankranti;

/// An attribute's value at sunrise, and the value that follows it when the
/// first one ends before the next sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading<T> {
    pub current: T,
    pub next: Option<T>,
}

/// Tithi classification with its end instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TithiInfo {
    /// 1-based number within the month (1-30).
    pub number: u8,
    pub tithi: Option<Tithi>,
    pub paksha: Paksha,
    /// `None` when the end lies beyond the search horizon.
    pub end: Option<EphemerisInstant>,
}

impl TithiInfo {
    pub fn name(&self) -> Option<String> {
        self.tithi.map(Tithi::full_name)
    }
}

/// Nakshatra classification with pada and end instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    /// 1-based number (1-27).
    pub number: u8,
    pub nakshatra: Option<Nakshatra>,
    /// Pada (quarter) at the start of the reading, 1-4.
    pub pada: u8,
    pub end: Option<EphemerisInstant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YogaInfo {
    /// 1-based number (1-27).
    pub number: u8,
    pub yoga: Option<Yoga>,
    pub end: Option<EphemerisInstant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KaranaInfo {
    /// 1-based slot within the month (1-60).
    pub number: u8,
    pub karana: Option<Karana>,
    pub class: Option<KaranaClass>,
    pub end: Option<EphemerisInstant>,
}

/// Lunar phase at sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    /// Illuminated fraction of the disc, in percent.
    pub illumination_percent: f64,
    /// Moon-Sun elongation below 180 deg.
    pub waxing: bool,
    pub phase_angle_deg: f64,
}

/// A half-open `[start, end)` span of time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: EphemerisInstant,
    pub end: EphemerisInstant,
}

impl TimeWindow {
    pub fn contains(&self, at: EphemerisInstant) -> bool {
        self.start <= at && at < self.end
    }

    pub fn duration_hours(&self) -> f64 {
        self.end.hours_since(self.start)
    }
}

/// A body's sign at sunrise and when it next changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RashiInfo {
    pub rashi: Rashi,
    pub transition: Option<EphemerisInstant>,
}

/// Complete panchanga for one civil date at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPanchanga {
    pub date: NaiveDate,
    pub location: LocationKey,

    pub sunrise: EphemerisInstant,
    pub sunset: EphemerisInstant,
    pub next_sunrise: EphemerisInstant,
    pub moonrise: Option<EphemerisInstant>,
    pub moonset: Option<EphemerisInstant>,
    pub ayanamsa_deg: f64,

    /// Weekday of the sunrise.
    pub vaar: Vaar,
    pub tithi: Reading<TithiInfo>,
    pub nakshatra: Reading<NakshatraInfo>,
    pub yoga: Reading<YogaInfo>,
    pub karana: Reading<KaranaInfo>,
    pub moon_phase: MoonPhase,

    pub rahu_kalam: TimeWindow,
    pub yamaganda: TimeWindow,
    pub gulika_kalam: TimeWindow,

    pub lunar_month: LunarMonth,
    /// Ingress between this sunrise and 24 hours later.
    pub sankranti: Option<Sankranti>,
    pub sun_rashi: RashiInfo,
    pub moon_rashi: RashiInfo,
    pub era: EraYears,

    /// Most recent ingress at or before this day.
    pub last_sankranti: Option<Sankranti>,
    pub last_sankranti_date: Option<NaiveDate>,
    pub days_since_sankranti: Option<i64>,
}

impl DailyPanchanga {
    /// Whether tithi `number` is in force at any point of this day.
    pub fn has_tithi(&self, number: u8) -> bool {
        self.tithi.current.number == number
            || self.tithi.next.is_some_and(|n| n.number == number)
    }

    /// End of tithi `number` if it is one of this day's readings.
    pub fn tithi_end(&self, number: u8) -> Option<EphemerisInstant> {
        if self.tithi.current.number == number {
            return self.tithi.current.end;
        }
        self.tithi
            .next
            .filter(|n| n.number == number)
            .and_then(|n| n.end)
    }

    /// Whether tithi `number` is the one in force at sunrise.
    pub fn tithi_at_sunrise(&self, number: u8) -> bool {
        self.tithi.current.number == number
    }

    pub fn kalam(&self, kalam: Kalam) -> TimeWindow {
        match kalam {
            Kalam::Rahu => self.rahu_kalam,
            Kalam::Yamaganda => self.yamaganda,
            Kalam::Gulika => self.gulika_kalam,
        }
    }

    pub fn is_adhika(&self) -> bool {
        self.lunar_month.adhika
    }

    pub fn has_sankranti(&self) -> bool {
        self.sankranti.is_some()
    }
}
