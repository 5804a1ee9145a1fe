//! Festival recurrence expansion over precomputed panchanga days.
//!
//! Rules name a lunar day (yearly within a month, or monthly) or a solar
//! ingress. [`expand`] turns a rule into dated [`Occurrence`]s by reading
//! a [`DailyStore`] filled by `panchang_engine::seed_range`; nothing here
//! touches an ephemeris.

pub mod error;
pub mod expand;
pub mod rule;
pub mod store;

pub use error::RecurrenceError;
pub use expand::{expand, expand_many, regenerate};
pub use rule::{AdhikaPolicy, Event, ExpansionWindow, Occurrence, RecurrenceRule};
pub use store::{
    DailyQuery, DailyStore, InMemoryDailyStore, InMemoryOccurrenceStore, OccurrenceStore,
    UpsertSummary,
};
