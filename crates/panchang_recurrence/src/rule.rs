//! Recurrence rules, events and the occurrences they expand to.

use chrono::{NaiveDate, NaiveTime};
use panchang_base::{Masa, Rashi};
use panchang_engine::LocationKey;
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;

/// How an event repeats against the lunisolar calendar.
///
/// Every field is optional so that partially configured events can be
/// stored; a rule missing a field it needs expands to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceRule {
    #[default]
    None,
    /// Once a year, on a lunar day of a named month.
    YearlyLunarDay {
        lunar_day: Option<u8>,
        masa: Option<Masa>,
    },
    /// Every month, on a lunar day.
    MonthlyLunarDay { lunar_day: Option<u8> },
    /// Once a year, on the Sun's ingress into a sign.
    YearlySolarIngress { rashi: Option<Rashi> },
}

impl RecurrenceRule {
    /// Lunar day (1-30) if the rule has a valid one.
    pub fn lunar_day(&self) -> Option<u8> {
        let day = match self {
            Self::YearlyLunarDay { lunar_day, .. } | Self::MonthlyLunarDay { lunar_day } => {
                *lunar_day
            }
            Self::None | Self::YearlySolarIngress { .. } => None,
        };
        day.filter(|d| (1..=30).contains(d))
    }

    /// Whether every field the rule needs is present and in range.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::None => false,
            Self::YearlyLunarDay { masa, .. } => masa.is_some() && self.lunar_day().is_some(),
            Self::MonthlyLunarDay { .. } => self.lunar_day().is_some(),
            Self::YearlySolarIngress { rashi } => rashi.is_some(),
        }
    }
}

/// Treatment of days falling in an intercalary month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdhikaPolicy {
    #[default]
    Exclude,
    Only,
    Both,
}

impl AdhikaPolicy {
    /// Required adhika flag, or `None` when either is accepted.
    pub fn required_flag(self) -> Option<bool> {
        match self {
            Self::Exclude => Some(false),
            Self::Only => Some(true),
            Self::Both => None,
        }
    }

    pub fn admits(self, adhika: bool) -> bool {
        self.required_flag().is_none_or(|flag| flag == adhika)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub rule: RecurrenceRule,
    #[serde(default)]
    pub adhika_policy: AdhikaPolicy,
    #[serde(default)]
    pub max_occurrences: Option<usize>,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, rule: RecurrenceRule) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            rule,
            adhika_policy: AdhikaPolicy::default(),
            max_occurrences: None,
        }
    }

    pub fn with_adhika_policy(mut self, policy: AdhikaPolicy) -> Self {
        self.adhika_policy = policy;
        self
    }

    pub fn with_max_occurrences(mut self, max: usize) -> Self {
        self.max_occurrences = Some(max);
        self
    }
}

/// One concrete date of an event. Keyed by `(event_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub event_id: String,
    pub date: NaiveDate,
    /// Last date of a multi-day occurrence, set on its first day.
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl Occurrence {
    pub fn on(event_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            event_id: event_id.into(),
            date,
            end_date: None,
            start_time: None,
            end_time: None,
            notes: None,
        }
    }
}

/// Inclusive civil date range at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub location: LocationKey,
}

impl ExpansionWindow {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        location: LocationKey,
    ) -> Result<Self, RecurrenceError> {
        if end < start {
            return Err(RecurrenceError::InvalidWindow { start, end });
        }
        Ok(Self {
            start,
            end,
            location,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_day_is_incomplete() {
        let rule = RecurrenceRule::MonthlyLunarDay {
            lunar_day: Some(31),
        };
        assert_eq!(rule.lunar_day(), None);
        assert!(!rule.is_complete());
        assert!(
            RecurrenceRule::MonthlyLunarDay {
                lunar_day: Some(11)
            }
            .is_complete()
        );
    }

    #[test]
    fn yearly_needs_month() {
        let rule = RecurrenceRule::YearlyLunarDay {
            lunar_day: Some(9),
            masa: None,
        };
        assert!(!rule.is_complete());
        assert!(!RecurrenceRule::None.is_complete());
        assert!(!RecurrenceRule::YearlySolarIngress { rashi: None }.is_complete());
    }

    #[test]
    fn adhika_policy_filters() {
        assert!(AdhikaPolicy::Exclude.admits(false));
        assert!(!AdhikaPolicy::Exclude.admits(true));
        assert!(AdhikaPolicy::Only.admits(true));
        assert!(!AdhikaPolicy::Only.admits(false));
        assert!(AdhikaPolicy::Both.admits(true) && AdhikaPolicy::Both.admits(false));
    }

    #[test]
    fn reversed_window_is_rejected() {
        let key = panchang_engine::Location::new("x", 0.0, 0.0, 0).key(4);
        let a = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(ExpansionWindow::new(a, b, key.clone()).is_err());
        let w = ExpansionWindow::new(b, a, key).unwrap();
        assert!(w.contains(a) && w.contains(b));
    }
}
