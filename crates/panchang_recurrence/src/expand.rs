//! Rule expansion over precomputed days.
//!
//! A lunar rule matches every day on which its tithi is in force, either at
//! sunrise or beginning later in the day. A tithi that straddles a sunrise
//! therefore matches two consecutive days; such runs merge into one
//! occurrence spread over both dates.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveTime, Timelike};
use panchang_base::Masa;
use panchang_engine::{DailyPanchanga, EphemerisInstant, LocationKey};

use crate::error::RecurrenceError;
use crate::rule::{Event, ExpansionWindow, Occurrence, RecurrenceRule};
use crate::store::{DailyQuery, DailyStore, OccurrenceStore, UpsertSummary};

/// Consecutive matching days.
type Run<'a> = Vec<&'a DailyPanchanga>;

/// Store query for `event` over `window`, or `None` when the rule cannot
/// match anything.
fn query_for(event: &Event, window: &ExpansionWindow) -> Option<DailyQuery> {
    if !event.rule.is_complete() {
        return None;
    }
    let mut query = DailyQuery::range(window.start, window.end, window.location.clone());
    match event.rule {
        RecurrenceRule::YearlyLunarDay { .. } | RecurrenceRule::MonthlyLunarDay { .. } => {
            query.lunar_day = event.rule.lunar_day();
            query.adhika = event.adhika_policy.required_flag();
        }
        RecurrenceRule::YearlySolarIngress { rashi } => {
            query.ingress = Some(true);
            query.ingress_rashi = rashi;
        }
        RecurrenceRule::None => return None,
    }
    Some(query)
}

fn local_minute(at: EphemerisInstant, location: &LocationKey) -> Option<NaiveTime> {
    let local = at.to_local(location.offset()?)?;
    NaiveTime::from_hms_opt(local.hour(), local.minute(), 0)
}

fn consecutive_runs<'a>(rows: &[&'a DailyPanchanga]) -> Vec<Run<'a>> {
    let mut runs: Vec<Run<'a>> = Vec::new();
    for &row in rows {
        let extends = runs
            .last()
            .and_then(|run| run.last())
            .and_then(|prev| prev.date.succ_opt())
            .is_some_and(|next| next == row.date);
        if extends {
            if let Some(run) = runs.last_mut() {
                run.push(row);
                continue;
            }
        }
        runs.push(vec![row]);
    }
    runs
}

/// Day whose month names the run: the one starting in the tithi.
fn reference_day<'a>(run: &Run<'a>, lunar_day: u8) -> Option<&'a DailyPanchanga> {
    run.iter()
        .copied()
        .find(|row| row.tithi_at_sunrise(lunar_day))
        .or_else(|| run.first().copied())
}

/// Per civil year, the first run falling in `masa`.
fn select_yearly<'a>(runs: Vec<Run<'a>>, lunar_day: u8, masa: Masa) -> Vec<Run<'a>> {
    let mut by_year: BTreeMap<i32, Vec<Run<'a>>> = BTreeMap::new();
    for run in runs {
        let Some(first) = run.first() else { continue };
        by_year.entry(first.date.year()).or_default().push(run);
    }

    let mut selected = Vec::new();
    for (year, candidates) in by_year {
        let total = candidates.len();
        let in_masa = |run: &Run<'a>| {
            reference_day(run, lunar_day).is_some_and(|r| r.lunar_month.masa == masa)
        };
        let matching = candidates.iter().filter(|&run| in_masa(run)).count();
        if matching > 1 {
            log::debug!("{year}: {matching} matches in {}, keeping the first", masa.name());
        }
        match candidates.into_iter().find(|run| in_masa(run)) {
            Some(run) => selected.push(run),
            None => log::debug!("{year}: none of {total} matches fall in {}", masa.name()),
        }
    }
    selected
}

fn run_occurrences(event: &Event, lunar_day: u8, run: &Run<'_>) -> Vec<Occurrence> {
    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        return Vec::new();
    };
    if run.len() == 1 {
        return vec![Occurrence::on(event.id.as_str(), first.date)];
    }

    let day_end = NaiveTime::from_hms_opt(23, 59, 0);
    let mut out = Vec::with_capacity(run.len());
    for (i, row) in run.iter().enumerate() {
        let mut occ = Occurrence::on(event.id.as_str(), row.date);
        occ.start_time = Some(NaiveTime::MIN);
        if i == 0 {
            occ.end_date = Some(last.date);
            occ.end_time = day_end;
            occ.notes = Some("begins".to_string());
        } else if i + 1 < run.len() {
            occ.end_time = day_end;
            occ.notes = Some("continues".to_string());
        } else {
            occ.end_time = row
                .tithi_end(lunar_day)
                .and_then(|end| local_minute(end, &row.location));
            occ.notes = Some(match occ.end_time {
                Some(t) => format!("ends at {}", t.format("%H:%M")),
                None => "ends".to_string(),
            });
        }
        out.push(occ);
    }
    out
}

fn lunar_occurrences(event: &Event, lunar_day: u8, rows: &[&DailyPanchanga]) -> Vec<Occurrence> {
    let mut runs = consecutive_runs(rows);
    if let RecurrenceRule::YearlyLunarDay {
        masa: Some(masa), ..
    } = event.rule
    {
        runs = select_yearly(runs, lunar_day, masa);
    }
    if let Some(max) = event.max_occurrences {
        runs.truncate(max);
    }
    runs.iter()
        .flat_map(|run| run_occurrences(event, lunar_day, run))
        .collect()
}

fn ingress_occurrences(event: &Event, rows: &[&DailyPanchanga]) -> Vec<Occurrence> {
    let mut out: Vec<Occurrence> = rows
        .iter()
        .filter_map(|row| {
            let sankranti = row.sankranti?;
            let mut occ = Occurrence::on(event.id.as_str(), row.date);
            occ.start_time = local_minute(sankranti.at, &row.location);
            occ.notes = Some(match occ.start_time {
                Some(t) => format!("{} sankranti at {}", sankranti.rashi.name(), t.format("%H:%M")),
                None => format!("{} sankranti", sankranti.rashi.name()),
            });
            Some(occ)
        })
        .collect();
    if let Some(max) = event.max_occurrences {
        out.truncate(max);
    }
    out
}

/// Occurrences of `event` among `rows`, which may be a superset of the
/// days matching `query`.
fn occurrences_for(event: &Event, query: &DailyQuery, rows: &[DailyPanchanga]) -> Vec<Occurrence> {
    let matching: Vec<&DailyPanchanga> = rows.iter().filter(|row| query.matches(row)).collect();
    match (event.rule, query.lunar_day) {
        (RecurrenceRule::YearlySolarIngress { .. }, _) => ingress_occurrences(event, &matching),
        (_, Some(lunar_day)) => lunar_occurrences(event, lunar_day, &matching),
        (_, None) => Vec::new(),
    }
}

/// Occurrences of `event` within `window`, in date order.
///
/// Issues one store query, or none when the rule is `None` or lacks a field
/// it needs.
pub async fn expand<S>(
    store: &S,
    event: &Event,
    window: &ExpansionWindow,
) -> Result<Vec<Occurrence>, RecurrenceError>
where
    S: DailyStore + ?Sized,
{
    let Some(query) = query_for(event, window) else {
        log::debug!("event {} has no expandable rule", event.id);
        return Ok(Vec::new());
    };
    let rows = store.query(&query).await?;
    let occurrences = occurrences_for(event, &query, &rows);
    log::debug!(
        "event {}: {} occurrences in {}..={}",
        event.id,
        occurrences.len(),
        window.start,
        window.end
    );
    Ok(occurrences)
}

/// Expand several events over the same window with a single store read.
///
/// Every event id appears in the result, with an empty list when its rule
/// expands to nothing.
pub async fn expand_many<S>(
    store: &S,
    events: &[Event],
    window: &ExpansionWindow,
) -> Result<BTreeMap<String, Vec<Occurrence>>, RecurrenceError>
where
    S: DailyStore + ?Sized,
{
    let queries: Vec<(&Event, Option<DailyQuery>)> =
        events.iter().map(|e| (e, query_for(e, window))).collect();

    let rows = if queries.iter().any(|(_, q)| q.is_some()) {
        let all = DailyQuery::range(window.start, window.end, window.location.clone());
        store.query(&all).await?
    } else {
        Vec::new()
    };

    let mut out = BTreeMap::new();
    for (event, query) in queries {
        let occurrences = match query {
            Some(q) => occurrences_for(event, &q, &rows),
            None => Vec::new(),
        };
        out.insert(event.id.clone(), occurrences);
    }
    log::info!(
        "expanded {} events over {}..={} from {} stored days",
        events.len(),
        window.start,
        window.end,
        rows.len()
    );
    Ok(out)
}

/// Expand `event` and upsert the result.
pub async fn regenerate<D, O>(
    daily: &D,
    occurrences: &O,
    event: &Event,
    window: &ExpansionWindow,
) -> Result<UpsertSummary, RecurrenceError>
where
    D: DailyStore + ?Sized,
    O: OccurrenceStore + ?Sized,
{
    let expanded = expand(daily, event, window).await?;
    let summary = occurrences.upsert(&expanded).await?;
    log::info!(
        "event {}: {} inserted, {} updated, {} unchanged",
        event.id,
        summary.inserted,
        summary.updated,
        summary.unchanged
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::AdhikaPolicy;
    use panchang_engine::Location;

    fn window() -> ExpansionWindow {
        let d = |m, day| chrono::NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        ExpansionWindow::new(d(1, 1), d(12, 31), Location::new("x", 10.0, 20.0, 0).key(4)).unwrap()
    }

    #[test]
    fn lunar_query_carries_adhika_policy() {
        let event = Event::new(
            "ekadashi",
            "Ekadashi",
            RecurrenceRule::MonthlyLunarDay {
                lunar_day: Some(11),
            },
        )
        .with_adhika_policy(AdhikaPolicy::Only);
        let q = query_for(&event, &window()).unwrap();
        assert_eq!(q.lunar_day, Some(11));
        assert_eq!(q.adhika, Some(true));
        assert_eq!(q.ingress, None);
    }

    #[test]
    fn ingress_query_ignores_adhika() {
        let event = Event::new(
            "makar",
            "Makar Sankranti",
            RecurrenceRule::YearlySolarIngress {
                rashi: Some(panchang_base::Rashi::Makara),
            },
        );
        let q = query_for(&event, &window()).unwrap();
        assert_eq!(q.ingress, Some(true));
        assert_eq!(q.adhika, None);
        assert_eq!(q.lunar_day, None);
    }

    #[test]
    fn incomplete_rules_have_no_query() {
        let none = Event::new("a", "A", RecurrenceRule::None);
        let no_day = Event::new(
            "b",
            "B",
            RecurrenceRule::YearlyLunarDay {
                lunar_day: None,
                masa: Some(Masa::Chaitra),
            },
        );
        assert!(query_for(&none, &window()).is_none());
        assert!(query_for(&no_day, &window()).is_none());
    }
}
