//! Error types for recurrence expansion.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from recurrence expansion and its stores.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RecurrenceError {
    #[error("store error: {0}")]
    Store(String),

    #[error("expansion window ends ({end}) before it starts ({start})")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}
