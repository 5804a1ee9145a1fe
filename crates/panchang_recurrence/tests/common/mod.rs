//! Hand-built daily rows for expansion tests.
//!
//! Every row is at Ujjain (UTC+05:30) with sunrise at 06:00 local. Tithi
//! ends are given in hours after that sunrise.

#![allow(dead_code)]

use chrono::{FixedOffset, NaiveDate};
use panchang_base::{
    Karana, Masa, MonthNumbering, Nakshatra, Paksha, Rashi, Tithi, Vaar, Yoga, era_years,
};
use panchang_engine::{
    DailyPanchanga, EphemerisInstant, KaranaInfo, Location, LocationKey, LunarMonth, MoonPhase,
    NakshatraInfo, RashiInfo, Reading, Sankranti, TimeWindow, TithiInfo, YogaInfo,
};
use panchang_recurrence::ExpansionWindow;

pub fn ujjain() -> Location {
    Location::new("Ujjain", 23.18, 75.79, 330)
}

pub fn key() -> LocationKey {
    ujjain().key(4)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn window(start: NaiveDate, end: NaiveDate) -> ExpansionWindow {
    ExpansionWindow::new(start, end, key()).unwrap()
}

pub fn sunrise(day: NaiveDate) -> EphemerisInstant {
    let offset = FixedOffset::east_opt(330 * 60).unwrap();
    EphemerisInstant::local_midnight(day, offset)
        .unwrap()
        .add_hours(6.0)
}

fn tithi(number: u8, end: Option<EphemerisInstant>) -> TithiInfo {
    TithiInfo {
        number,
        tithi: Tithi::from_number(number),
        paksha: if number <= 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        },
        end,
    }
}

/// A day whose sunrise tithi is `current`, ending `current_end_h` hours
/// after sunrise. When that is under 24 hours the following tithi is the
/// day's second reading, ending `next_end_h` after sunrise.
pub fn day(
    on: NaiveDate,
    current: u8,
    current_end_h: f64,
    next_end_h: f64,
    masa: Masa,
    adhika: bool,
) -> DailyPanchanga {
    let rise = sunrise(on);
    let at = |h: f64| rise.add_hours(h);
    let next = (current_end_h < 24.0).then(|| tithi(current % 30 + 1, Some(at(next_end_h))));
    let paksha = if current <= 15 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    };

    DailyPanchanga {
        date: on,
        location: key(),
        sunrise: rise,
        sunset: at(12.0),
        next_sunrise: at(24.0),
        moonrise: None,
        moonset: None,
        ayanamsa_deg: 24.1,
        vaar: Vaar::Ravivara,
        tithi: Reading {
            current: tithi(current, Some(at(current_end_h))),
            next,
        },
        nakshatra: Reading {
            current: NakshatraInfo {
                number: 1,
                nakshatra: Some(Nakshatra::Ashwini),
                pada: 1,
                end: None,
            },
            next: None,
        },
        yoga: Reading {
            current: YogaInfo {
                number: 1,
                yoga: Yoga::from_number(1),
                end: None,
            },
            next: None,
        },
        karana: Reading {
            current: KaranaInfo {
                number: 1,
                karana: Some(Karana::Kimstughna),
                class: Some(Karana::Kimstughna.class()),
                end: None,
            },
            next: None,
        },
        moon_phase: MoonPhase {
            illumination_percent: 50.0,
            waxing: paksha == Paksha::Shukla,
            phase_angle_deg: 90.0,
        },
        rahu_kalam: TimeWindow {
            start: at(10.5),
            end: at(12.0),
        },
        yamaganda: TimeWindow {
            start: at(6.0),
            end: at(7.5),
        },
        gulika_kalam: TimeWindow {
            start: at(9.0),
            end: at(10.5),
        },
        lunar_month: LunarMonth {
            masa,
            numbering: MonthNumbering::Amanta,
            day_in_month: current,
            paksha,
            adhika,
            governing_full_moon: at(240.0),
            lunation_start: at(-240.0),
            lunation_end: at(480.0),
        },
        sankranti: None,
        sun_rashi: RashiInfo {
            rashi: Rashi::Mesha,
            transition: None,
        },
        moon_rashi: RashiInfo {
            rashi: Rashi::Mesha,
            transition: None,
        },
        era: era_years(2025, false),
        last_sankranti: None,
        last_sankranti_date: None,
        days_since_sankranti: None,
    }
}

/// A tithi lasting the whole sunrise-to-sunrise day.
pub fn plain(on: NaiveDate, current: u8, masa: Masa) -> DailyPanchanga {
    day(on, current, 30.0, 0.0, masa, false)
}

/// Tithi `number` begins during the first day and ends `end_h` hours after
/// the second day's sunrise.
pub fn straddling(first: NaiveDate, number: u8, end_h: f64, masa: Masa) -> [DailyPanchanga; 2] {
    let previous = if number == 1 { 30 } else { number - 1 };
    let second = first.succ_opt().unwrap();
    [
        day(first, previous, 10.0, 24.0 + end_h, masa, false),
        day(second, number, end_h, end_h + 23.0, masa, false),
    ]
}

/// A day with the Sun entering `rashi` `hours` after sunrise.
pub fn ingress(on: NaiveDate, rashi: Rashi, hours: f64) -> DailyPanchanga {
    let mut row = plain(on, 5, Masa::Pausha);
    let s = Sankranti {
        rashi,
        at: sunrise(on).add_hours(hours),
    };
    row.sankranti = Some(s);
    row.last_sankranti = Some(s);
    row.last_sankranti_date = Some(on);
    row.days_since_sankranti = Some(0);
    row
}
