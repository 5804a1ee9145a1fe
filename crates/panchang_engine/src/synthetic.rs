//! Deterministic providers for tests and benches.
//!
//! [`SyntheticProvider`] moves the Sun and Moon at their mean sidereal rates
//! from a chosen epoch. It knows nothing about latitude: the Sun rises at
//! 06:00 and sets at 18:00 local civil time, and the Moon rises later each day
//! by its elongation (15 deg per hour). That is enough to exercise every
//! boundary search with exactly predictable answers.
//!
//! [`CountingProvider`] wraps any provider and counts the queries it serves.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use panchang_math::{normalize_360, signed_separation};

use crate::error::ProviderError;
use crate::instant::{EphemerisInstant, UNIX_EPOCH_JD};
use crate::location::Location;
use crate::provider::{
    Body, BodyPosition, CalcFlags, EphemerisProvider, PhaseInfo, RiseSetKind,
};

/// Mean sidereal motion of the Sun, degrees per day.
pub const MEAN_SUN_RATE: f64 = 0.985_609;
/// Mean sidereal motion of the Moon, degrees per day.
pub const MEAN_MOON_RATE: f64 = 13.176_358;

const SUNRISE_DAY_FRACTION: f64 = 0.25;
const SUNSET_DAY_FRACTION: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticProvider {
    epoch: EphemerisInstant,
    sun_at_epoch: f64,
    moon_at_epoch: f64,
    sun_rate: f64,
    moon_rate: f64,
    ayanamsa_deg: f64,
    sun_rises: bool,
}

impl SyntheticProvider {
    /// Sun and Moon at the given sidereal longitudes at `epoch`.
    pub fn new(epoch: EphemerisInstant, sun_at_epoch: f64, moon_at_epoch: f64) -> Self {
        Self {
            epoch,
            sun_at_epoch,
            moon_at_epoch,
            sun_rate: MEAN_SUN_RATE,
            moon_rate: MEAN_MOON_RATE,
            ayanamsa_deg: 24.1,
            sun_rises: true,
        }
    }

    /// A new moon at `epoch`, with the Sun at `sun_lon`.
    pub fn new_moon_at(epoch: EphemerisInstant, sun_lon: f64) -> Self {
        Self::new(epoch, sun_lon, sun_lon)
    }

    pub fn with_rates(mut self, sun_rate: f64, moon_rate: f64) -> Self {
        self.sun_rate = sun_rate;
        self.moon_rate = moon_rate;
        self
    }

    /// A provider whose Sun never rises, as above a polar circle in winter.
    pub fn polar_night(mut self) -> Self {
        self.sun_rises = false;
        self
    }

    /// Length of the mean synodic month in days.
    pub fn synodic_month_days(&self) -> f64 {
        360.0 / (self.moon_rate - self.sun_rate)
    }

    pub fn sun_longitude(&self, at: EphemerisInstant) -> f64 {
        normalize_360(self.sun_at_epoch + self.sun_rate * self.days_since_epoch(at))
    }

    pub fn moon_longitude(&self, at: EphemerisInstant) -> f64 {
        normalize_360(self.moon_at_epoch + self.moon_rate * self.days_since_epoch(at))
    }

    /// Moon minus Sun, [0, 360).
    pub fn elongation(&self, at: EphemerisInstant) -> f64 {
        normalize_360(self.moon_longitude(at) - self.sun_longitude(at))
    }

    fn days_since_epoch(&self, at: EphemerisInstant) -> f64 {
        at.jd_ut() - self.epoch.jd_ut()
    }

    /// Next instant after `after` whose local day fraction equals `fraction`.
    fn next_local_fraction(
        after: EphemerisInstant,
        location: &Location,
        fraction: f64,
    ) -> EphemerisInstant {
        let local_days =
            after.jd_ut() - UNIX_EPOCH_JD + location.utc_offset_minutes as f64 / 1_440.0;
        let mut delta = (fraction - local_days.rem_euclid(1.0)).rem_euclid(1.0);
        if delta <= 1e-9 {
            delta += 1.0;
        }
        EphemerisInstant::from_jd_ut(after.jd_ut() + delta)
    }
}

#[async_trait]
impl EphemerisProvider for SyntheticProvider {
    async fn position(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError> {
        let (sidereal, speed, distance_au) = match body {
            Body::Sun => (self.sun_longitude(at), self.sun_rate, 1.0),
            Body::Moon => (self.moon_longitude(at), self.moon_rate, 0.002_57),
        };
        let longitude_deg = if flags.contains(CalcFlags::SIDEREAL) {
            sidereal
        } else {
            normalize_360(sidereal + self.ayanamsa_deg)
        };
        Ok(BodyPosition {
            longitude_deg,
            latitude_deg: 0.0,
            distance_au,
            speed_deg_per_day: if flags.contains(CalcFlags::SPEED) { speed } else { 0.0 },
        })
    }

    async fn phase(
        &self,
        at: EphemerisInstant,
        body: Body,
        _flags: CalcFlags,
    ) -> Result<PhaseInfo, ProviderError> {
        match body {
            Body::Moon => {
                let elong = self.elongation(at);
                Ok(PhaseInfo {
                    phase_angle_deg: 180.0 - signed_separation(elong, 0.0).abs(),
                    illumination_fraction: (1.0 - elong.to_radians().cos()) / 2.0,
                })
            }
            Body::Sun => Err(ProviderError::Body(Body::Sun)),
        }
    }

    async fn rise_set(
        &self,
        after: EphemerisInstant,
        body: Body,
        location: &Location,
        kind: RiseSetKind,
    ) -> Result<Option<EphemerisInstant>, ProviderError> {
        let base = match kind {
            RiseSetKind::Rise => SUNRISE_DAY_FRACTION,
            RiseSetKind::Set => SUNSET_DAY_FRACTION,
        };
        match body {
            Body::Sun if !self.sun_rises => Ok(None),
            Body::Sun => Ok(Some(Self::next_local_fraction(after, location, base))),
            Body::Moon => {
                let lag = self.elongation(after) / 360.0;
                let fraction = (base + lag).rem_euclid(1.0);
                Ok(Some(Self::next_local_fraction(after, location, fraction)))
            }
        }
    }

    async fn ayanamsa(&self, _at: EphemerisInstant) -> Result<f64, ProviderError> {
        Ok(self.ayanamsa_deg)
    }
}

/// Counts every query passed through to the wrapped provider.
#[derive(Debug)]
pub struct CountingProvider<P> {
    inner: P,
    calls: AtomicUsize,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<P: EphemerisProvider> EphemerisProvider for CountingProvider<P> {
    async fn position(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError> {
        self.tick();
        self.inner.position(at, body, flags).await
    }

    async fn phase(
        &self,
        at: EphemerisInstant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<PhaseInfo, ProviderError> {
        self.tick();
        self.inner.phase(at, body, flags).await
    }

    async fn rise_set(
        &self,
        after: EphemerisInstant,
        body: Body,
        location: &Location,
        kind: RiseSetKind,
    ) -> Result<Option<EphemerisInstant>, ProviderError> {
        self.tick();
        self.inner.rise_set(after, body, location, kind).await
    }

    async fn ayanamsa(&self, at: EphemerisInstant) -> Result<f64, ProviderError> {
        self.tick();
        self.inner.ayanamsa(at).await
    }
}
