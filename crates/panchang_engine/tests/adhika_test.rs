//! Intercalary month detection across three consecutive lunations.
//!
//! A new moon at 2024-05-10 00:00 UTC with the Sun at 30.5 deg puts the next
//! new moon at Sun 59.6 deg: both in Vrishabha, so that lunation is adhika.
//! The lunations either side start and end in different signs.

mod common;

use chrono::Duration;
use common::{config, date, greenwich, utc};
use panchang_base::{Masa, MonthNumbering, Paksha};
use panchang_engine::synthetic::SyntheticProvider;
use panchang_engine::{
    LunarPhase, SearchDirection, compute_daily, find_lunar_phase, is_adhika, masa_for_instant,
};

fn provider() -> SyntheticProvider {
    SyntheticProvider::new_moon_at(utc(2024, 5, 10, 0, 0), 30.5)
}

#[tokio::test]
async fn every_day_of_the_lunation_is_flagged() {
    let p = provider();
    let loc = greenwich();
    let mut cfg = config();
    cfg.month_numbering = MonthNumbering::Amanta;

    let first_adhika = date(2024, 5, 10);
    let last_adhika = date(2024, 6, 8);
    let mut day = date(2024, 5, 5);
    while day <= date(2024, 6, 12) {
        let row = compute_daily(&p, day, &loc, &cfg).await.unwrap();
        let expected = (first_adhika..=last_adhika).contains(&day);
        assert_eq!(row.is_adhika(), expected, "adhika flag on {day}");
        if expected {
            assert_eq!(row.lunar_month.masa, Masa::Jyeshtha, "{day}");
        }
        day += Duration::days(1);
    }
}

#[tokio::test]
async fn month_after_adhika_keeps_the_name() {
    let p = provider();
    let mut cfg = config();
    cfg.month_numbering = MonthNumbering::Amanta;

    let adhika = masa_for_instant(&p, utc(2024, 5, 20, 6, 0), &cfg).await.unwrap();
    let nija = masa_for_instant(&p, utc(2024, 6, 15, 6, 0), &cfg).await.unwrap();
    assert!(adhika.adhika);
    assert!(!nija.adhika);
    assert_eq!(adhika.masa, Masa::Jyeshtha);
    assert_eq!(nija.masa, Masa::Jyeshtha);
    assert_eq!(adhika.paksha, Paksha::Shukla);
    assert!(adhika.lunation_end.hours_since(nija.lunation_start).abs() < 0.01);
}

#[tokio::test]
async fn adhika_does_not_depend_on_numbering() {
    let p = provider();
    let amanta = {
        let mut c = config();
        c.month_numbering = MonthNumbering::Amanta;
        c
    };
    // Krishna paksha of the intercalary lunation.
    let at = utc(2024, 6, 1, 6, 0);
    let a = masa_for_instant(&p, at, &amanta).await.unwrap();
    let b = masa_for_instant(&p, at, &config()).await.unwrap();
    assert_eq!(a.paksha, Paksha::Krishna);
    assert!(a.adhika);
    assert_eq!(a.adhika, b.adhika);
    assert_eq!(b.masa, a.masa.next());
}

#[tokio::test]
async fn bounding_new_moons_share_a_sign() {
    let p = provider();
    let cfg = config();
    let start = utc(2024, 5, 10, 0, 0);
    let end = find_lunar_phase(
        &p,
        start.add_hours(24.0),
        LunarPhase::NewMoon,
        SearchDirection::Forward,
        &cfg,
    )
    .await
    .unwrap();
    let expected_hours = p.synodic_month_days() * 24.0;
    assert!((end.hours_since(start) - expected_hours).abs() < 0.05);

    assert!(is_adhika(&p, start, end).await.unwrap());
    let before = start.add_hours(-expected_hours);
    assert!(!is_adhika(&p, before, start).await.unwrap());
}
