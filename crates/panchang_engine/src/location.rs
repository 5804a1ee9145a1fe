//! Observer location and its rounded cache/store key.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::PanchangError;

/// Largest UTC offset accepted, in minutes (UTC+14 / UTC-14).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// A named place with a fixed civil-time offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Geographic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Geographic longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Civil time offset from UTC, in minutes.
    pub utc_offset_minutes: i32,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
        utc_offset_minutes: i32,
    ) -> Self {
        Self {
            name: name.into(),
            latitude_deg,
            longitude_deg,
            utc_offset_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), PanchangError> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(PanchangError::InvalidLocation("latitude must be in [-90, 90]"));
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(PanchangError::InvalidLocation(
                "longitude must be in [-180, 180]",
            ));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(PanchangError::InvalidLocation("utc offset beyond 14 hours"));
        }
        Ok(())
    }

    pub fn offset(&self) -> Result<FixedOffset, PanchangError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or(PanchangError::InvalidLocation("utc offset beyond 14 hours"))
    }

    /// Key with coordinates rounded to `decimals` places.
    pub fn key(&self, decimals: u32) -> LocationKey {
        let scale = 10f64.powi(decimals as i32);
        LocationKey {
            latitude_e: (self.latitude_deg * scale).round() as i64,
            longitude_e: (self.longitude_deg * scale).round() as i64,
            decimals,
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }
}

/// Location identity for caches and stores.
///
/// Two locations whose coordinates agree after rounding share a key. The
/// UTC offset is part of the key because it fixes the civil date boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationKey {
    latitude_e: i64,
    longitude_e: i64,
    decimals: u32,
    utc_offset_minutes: i32,
}

impl LocationKey {
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_e as f64 / 10f64.powi(self.decimals as i32)
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_e as f64 / 10f64.powi(self.decimals as i32)
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// The civil offset, `None` if the key was built from an invalid location.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }
}
