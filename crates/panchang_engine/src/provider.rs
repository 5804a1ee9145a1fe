//! The ephemeris provider seam.
//!
//! A provider answers four kinds of query: body position, lunar phase,
//! rise/set events and the ayanamsa. Every query is async because real
//! providers sit behind I/O or a native callback bridge. The engine only
//! ever asks for sidereal positions, with the flags fixed by
//! [`SIDEREAL_FLAGS`].

use async_trait::async_trait;
use bitflags::bitflags;
use panchang_math::normalize_360;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::instant::EphemerisInstant;
use crate::location::Location;

/// Bodies the engine queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
}

bitflags! {
    /// Calculation options passed through to the provider.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CalcFlags: u32 {
        /// Longitudes measured from the sidereal zodiac (ayanamsa applied).
        const SIDEREAL     = 1 << 0;
        /// Include the longitudinal speed.
        const SPEED        = 1 << 1;
        /// Observer-centred instead of geocentric.
        const TOPOCENTRIC  = 1 << 2;
        /// Geometric position without light-time correction.
        const TRUE_POSITION = 1 << 3;
    }
}

/// The single sidereal mode used for every query in the process.
pub const SIDEREAL_FLAGS: CalcFlags = CalcFlags::SIDEREAL.union(CalcFlags::SPEED);

/// Which horizon crossing to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiseSetKind {
    Rise,
    Set,
}

/// Ecliptic position of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees, [0, 360) in the requested frame.
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub distance_au: f64,
    /// Longitudinal speed in degrees per day.
    pub speed_deg_per_day: f64,
}

/// Illumination geometry of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseInfo {
    /// Sun-body-observer angle in degrees.
    pub phase_angle_deg: f64,
    /// Illuminated fraction of the disc, [0, 1].
    pub illumination_fraction: f64,
}

#[async_trait]
pub trait EphemerisProvider: Send + Sync {
    async fn position(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError>;

    async fn phase(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<PhaseInfo, ProviderError>;

    /// First `kind` event of `body` after `after`, `None` when the body
    /// stays above or below the horizon.
    async fn rise_set(
        &self,
        after: EphemerisInstant,
        body: Body,
        location: &Location,
        kind: RiseSetKind,
    ) -> Result<Option<EphemerisInstant>, ProviderError>;

    /// Ayanamsa in degrees at `at`.
    async fn ayanamsa(&self, at: EphemerisInstant) -> Result<f64, ProviderError>;
}

/// Sidereal longitude of `body`, normalized to [0, 360).
pub async fn sidereal_longitude<P>(
    provider: &P,
    at: EphemerisInstant,
    body: Body,
) -> Result<f64, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let pos = provider.position(at, body, SIDEREAL_FLAGS).await?;
    Ok(normalize_360(pos.longitude_deg))
}

/// Sidereal (Sun, Moon) longitudes at `at`.
pub async fn sun_moon_longitudes<P>(
    provider: &P,
    at: EphemerisInstant,
) -> Result<(f64, f64), ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let sun = sidereal_longitude(provider, at, Body::Sun).await?;
    let moon = sidereal_longitude(provider, at, Body::Moon).await?;
    Ok((sun, moon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidereal_flags_are_fixed() {
        assert!(SIDEREAL_FLAGS.contains(CalcFlags::SIDEREAL));
        assert!(SIDEREAL_FLAGS.contains(CalcFlags::SPEED));
        assert!(!SIDEREAL_FLAGS.contains(CalcFlags::TOPOCENTRIC));
    }
}
