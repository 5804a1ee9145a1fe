//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//! Loading always validates.

use std::path::Path;
use std::time::Duration;

use panchang_base::MonthNumbering;
use panchang_math::SearchWindow;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bisection iterations above this add nothing at f64 precision.
const MAX_ITERATIONS: u32 = 64;
const MAX_COORDINATE_DECIMALS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanchangConfig {
    pub month_numbering: MonthNumbering,
    /// Maximum days scanned for a full or new moon.
    pub phase_scan_days: u32,
    pub ingress_precision_minutes: f64,
    /// Window for tithi, nakshatra, yoga and karana end searches.
    pub attribute_search: SearchWindow,
    /// Window for the Moon's sign transition.
    pub moon_sign_search: SearchWindow,
    /// Window used to pin down a full or new moon once the daily scan has
    /// bracketed it.
    pub phase_search: SearchWindow,
    /// Window for the Sun's sign transition and the ingress look-back.
    pub ingress_search: SearchWindow,
    pub cache: CacheConfig,
}

impl Default for PanchangConfig {
    fn default() -> Self {
        Self {
            month_numbering: MonthNumbering::Purnimanta,
            phase_scan_days: 35,
            ingress_precision_minutes: 1.0,
            attribute_search: SearchWindow::ATTRIBUTE,
            moon_sign_search: SearchWindow::LUNAR_SIGN,
            phase_search: SearchWindow::LUNAR_PHASE,
            ingress_search: SearchWindow::SOLAR_SIGN,
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_size: usize,
    pub ttl_secs: u64,
    /// Decimal places kept when keying a location.
    pub coordinate_decimals: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 512,
            ttl_secs: 86_400,
            coordinate_decimals: 4,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl PanchangConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded panchang config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Ingress bisection precision in hours.
    pub fn ingress_precision_hours(&self) -> f64 {
        self.ingress_precision_minutes / 60.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window("attribute_search", &self.attribute_search)?;
        validate_window("moon_sign_search", &self.moon_sign_search)?;
        validate_window("phase_search", &self.phase_search)?;
        validate_window("ingress_search", &self.ingress_search)?;
        if self.phase_scan_days == 0 {
            return Err(invalid("phase_scan_days", "must be at least 1"));
        }
        if !(self.ingress_precision_minutes.is_finite() && self.ingress_precision_minutes > 0.0) {
            return Err(invalid("ingress_precision_minutes", "must be positive"));
        }
        if self.cache.max_size == 0 {
            return Err(invalid("cache.max_size", "must be positive"));
        }
        if self.cache.coordinate_decimals > MAX_COORDINATE_DECIMALS {
            return Err(invalid("cache.coordinate_decimals", "must be at most 8"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn validate_window(field: &'static str, window: &SearchWindow) -> Result<(), ConfigError> {
    if !(window.step_hours.is_finite() && window.step_hours > 0.0) {
        return Err(invalid(field, "step_hours must be positive"));
    }
    if !(window.horizon_hours.is_finite() && window.horizon_hours > 0.0) {
        return Err(invalid(field, "horizon_hours must be positive"));
    }
    if window.step_hours > window.horizon_hours {
        return Err(invalid(field, "step_hours exceeds horizon_hours"));
    }
    if window.iterations == 0 || window.iterations > MAX_ITERATIONS {
        return Err(invalid(field, "iterations must be in 1..=64"));
    }
    Ok(())
}
