//! Era years for a civil date.

use chrono::{Datelike, NaiveDate};
use panchang_base::{EraYears, era_years, precedes_lunar_new_year};

use crate::masa::LunarMonth;

/// Vikram and Shaka years (and their samvatsaras) for `date`, given the
/// lunar month in force that day.
pub fn era_for_date(date: NaiveDate, month: &LunarMonth) -> EraYears {
    let before_new_year =
        precedes_lunar_new_year(date.month(), month.masa, month.paksha, month.numbering);
    era_years(date.year(), before_new_year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::EphemerisInstant;
    use panchang_base::{Masa, MonthNumbering, Paksha, Samvatsara};

    fn month(masa: Masa, paksha: Paksha) -> LunarMonth {
        let t = EphemerisInstant::from_jd_ut(2_460_400.0);
        LunarMonth {
            masa,
            numbering: MonthNumbering::Purnimanta,
            day_in_month: 5,
            paksha,
            adhika: false,
            governing_full_moon: t,
            lunation_start: t,
            lunation_end: t,
        }
    }

    #[test]
    fn january_is_still_last_year() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let e = era_for_date(d, &month(Masa::Pausha, Paksha::Shukla));
        assert_eq!(e.vikram, 2081);
        assert_eq!(e.shaka, 1946);
        assert_eq!(e.shaka_samvatsara, Samvatsara::Krodhi);
    }

    #[test]
    fn after_chaitra_shukla_pratipada() {
        let d = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
        let e = era_for_date(d, &month(Masa::Chaitra, Paksha::Shukla));
        assert_eq!(e.vikram, 2081);
        assert_eq!(e.vikram_samvatsara, Samvatsara::Kaalayukti);
    }

    #[test]
    fn purnimanta_krishna_chaitra_precedes() {
        let d = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let e = era_for_date(d, &month(Masa::Chaitra, Paksha::Krishna));
        assert_eq!(e.vikram, 2080);
        assert_eq!(e.vikram_samvatsara, Samvatsara::Pingala);
    }
}
