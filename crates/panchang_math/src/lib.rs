//! Pure angular arithmetic for panchanga attributes.
//!
//! This crate provides:
//! - Angle normalization to [0, 360)
//! - The four cyclic progress functions (tithi, nakshatra, yoga, karana)
//! - A generic boundary finder that locates the instant a cyclic progress
//!   value crosses a target, with unwrapping across the cycle seam
//!
//! Nothing here talks to an ephemeris. Callers supply progress closures.

pub mod boundary;
pub mod progress;
pub mod util;

pub use boundary::{SearchTime, SearchWindow, find_boundary, find_change};
pub use progress::{
    Attribute, HALF_DAY_COUNT, HALF_DAY_SPAN_DEG, LUNAR_DAY_COUNT, LUNAR_DAY_SPAN_DEG,
    MANSION_COUNT, MANSION_SPAN_DEG, YOGA_COUNT, YOGA_SPAN_DEG, half_day_progress,
    index_from_progress, lunar_day_progress, mansion_progress, yoga_progress,
};
pub use util::{normalize_360, normalize_cyclic, signed_separation};
