//! Daily panchanga computation over an async sidereal ephemeris provider.
//!
//! This crate provides:
//! - `compute_daily`: sunrise-anchored tithi, nakshatra, yoga and karana with
//!   end instants, moon phase, Rahu/Yamaganda/Gulika windows, lunar month,
//!   sankranti, Sun/Moon signs and era years
//! - Full/new moon search and adhika detection
//! - A TTL- and size-bounded result cache
//! - Sequential range seeding into a `DailySink`
//! - A deterministic synthetic provider for tests and benches
//!
//! The ephemeris itself is external and reached only through
//! [`EphemerisProvider`].

pub mod cache;
pub mod config;
pub mod daily;
pub mod error;
pub mod instant;
pub mod location;
pub mod masa;
pub mod panchang_types;
pub mod provider;
pub mod sankranti;
pub mod seed;
pub mod synthetic;
pub mod varsha;

pub use cache::{CacheStats, PanchangCache};
pub use config::{CacheConfig, PanchangConfig};
pub use daily::{compute_daily, kalam_window, moon_phase_at};
pub use error::{ConfigError, PanchangError, ProviderError};
pub use instant::EphemerisInstant;
pub use location::{Location, LocationKey};
pub use masa::{LunarMonth, LunarPhase, SearchDirection, find_lunar_phase, is_adhika, masa_for_instant};
pub use panchang_types::{
    DailyPanchanga, KaranaInfo, MoonPhase, NakshatraInfo, RashiInfo, Reading, TimeWindow,
    TithiInfo, YogaInfo,
};
pub use provider::{
    Body, BodyPosition, CalcFlags, EphemerisProvider, PhaseInfo, RiseSetKind, SIDEREAL_FLAGS,
};
pub use sankranti::{Sankranti, ingress_between, previous_ingress, sun_rashi_at};
pub use seed::{DailySink, SeedReport, seed_range};
pub use varsha::era_for_date;
