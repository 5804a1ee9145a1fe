//! Error types for panchanga computation.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::provider::{Body, RiseSetKind};

/// Failures reported by an ephemeris provider.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("ephemeris unavailable: {0}")]
    Unavailable(String),
    #[error("instant outside ephemeris coverage: JD {0}")]
    InvalidInstant(f64),
    #[error("body not supported: {0:?}")]
    Body(Body),
}

/// Errors from a daily computation or one of its resolvers.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PanchangError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    #[error("calendar out of range: {0}")]
    Calendar(&'static str),
    /// The Sun does not rise or set on this date (polar day or night).
    #[error("no sun {kind:?} on {date}")]
    MissingSunEvent { date: NaiveDate, kind: RiseSetKind },
    #[error("daily sink rejected row: {0}")]
    Sink(String),
}

/// Errors from loading or validating a [`PanchangConfig`](crate::PanchangConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_wraps() {
        let e: PanchangError = ProviderError::InvalidInstant(0.0).into();
        assert!(matches!(e, PanchangError::Provider(_)));
        assert!(e.to_string().starts_with("provider error"));
    }

    #[test]
    fn invalid_display() {
        let e = ConfigError::Invalid {
            field: "cache.max_size",
            reason: "must be positive",
        };
        assert_eq!(e.to_string(), "invalid cache.max_size: must be positive");
    }
}
