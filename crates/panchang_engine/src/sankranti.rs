//! Solar ingress (sankranti) detection.
//!
//! The Sun needs about a month per sign, so a single day contains at most
//! one ingress. A day's window is checked by comparing the Sun's sign at
//! both ends and, when they differ, bisecting on the sign itself.

use panchang_base::{Rashi, rashi_from_longitude};
use panchang_math::find_change;
use serde::{Deserialize, Serialize};

use crate::config::PanchangConfig;
use crate::error::{PanchangError, ProviderError};
use crate::instant::EphemerisInstant;
use crate::provider::{Body, EphemerisProvider, sidereal_longitude};

/// The Sun entering a sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sankranti {
    /// The sign entered.
    pub rashi: Rashi,
    pub at: EphemerisInstant,
}

pub async fn sun_rashi_at<P>(provider: &P, at: EphemerisInstant) -> Result<Rashi, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    Ok(rashi_from_longitude(
        sidereal_longitude(provider, at, Body::Sun).await?,
    ))
}

/// The ingress inside `[from, to]`, if the Sun changes sign there.
pub async fn ingress_between<P>(
    provider: &P,
    from: EphemerisInstant,
    to: EphemerisInstant,
    config: &PanchangConfig,
) -> Result<Option<Sankranti>, PanchangError>
where
    P: EphemerisProvider + ?Sized,
{
    let start_sign = sun_rashi_at(provider, from).await?;
    let end_sign = sun_rashi_at(provider, to).await?;
    if start_sign == end_sign {
        return Ok(None);
    }

    let at = find_change(
        from,
        to,
        |t| sun_rashi_at(provider, t),
        config.ingress_precision_hours(),
    )
    .await?;
    log::debug!("sankranti into {} at {at}", end_sign.name());
    Ok(Some(Sankranti {
        rashi: end_sign,
        at,
    }))
}

/// Most recent ingress at or before `from`.
///
/// Walks back one day at a time across `config.ingress_search.horizon_hours`.
pub async fn previous_ingress<P>(
    provider: &P,
    from: EphemerisInstant,
    config: &PanchangConfig,
) -> Result<Option<Sankranti>, PanchangError>
where
    P: EphemerisProvider + ?Sized,
{
    let days = (config.ingress_search.horizon_hours / 24.0).ceil() as u32;
    let mut hi = from;
    let mut hi_sign = sun_rashi_at(provider, hi).await?;

    for _ in 0..days {
        let lo = hi.add_hours(-24.0);
        let lo_sign = sun_rashi_at(provider, lo).await?;
        if lo_sign != hi_sign {
            let at = find_change(
                lo,
                hi,
                |t| sun_rashi_at(provider, t),
                config.ingress_precision_hours(),
            )
            .await?;
            return Ok(Some(Sankranti { rashi: hi_sign, at }));
        }
        hi = lo;
        hi_sign = lo_sign;
    }

    log::debug!("no ingress within {days} days before {from}");
    Ok(None)
}
