//! Daily panchanga computation.
//!
//! Everything is anchored at the local sunrise of the requested date:
//! attributes are classified from the Sun and Moon longitudes at sunrise,
//! and each attribute's end is searched forward from there. When an end
//! falls before the next sunrise, the following value is classified and its
//! own end searched, so one day can carry two values of an attribute.

use chrono::{Datelike, FixedOffset, NaiveDate};
use panchang_base::{
    Kalam, Karana, Nakshatra, Paksha, RASHI_SPAN_DEG, Tithi, Vaar, Yoga, nakshatra_from_longitude,
    rashi_from_longitude,
};
use panchang_math::{
    Attribute, SearchWindow, find_boundary, index_from_progress, mansion_progress, normalize_360,
};

use crate::config::PanchangConfig;
use crate::error::{ConfigError, PanchangError, ProviderError};
use crate::instant::EphemerisInstant;
use crate::location::Location;
use crate::masa::lunar_month_at;
use crate::panchang_types::{
    DailyPanchanga, KaranaInfo, MoonPhase, NakshatraInfo, RashiInfo, Reading, TimeWindow,
    TithiInfo, YogaInfo,
};
use crate::provider::{
    Body, EphemerisProvider, RiseSetKind, SIDEREAL_FLAGS, sidereal_longitude, sun_moon_longitudes,
};
use crate::sankranti::{Sankranti, ingress_between, previous_ingress};
use crate::varsha::era_for_date;

/// One attribute value and where it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    number: u8,
    end: Option<EphemerisInstant>,
}

async fn attribute_progress_at<P>(
    provider: &P,
    attribute: Attribute,
    at: EphemerisInstant,
) -> Result<f64, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    match attribute {
        Attribute::Mansion => Ok(mansion_progress(
            sidereal_longitude(provider, at, Body::Moon).await?,
        )),
        _ => {
            let (sun, moon) = sun_moon_longitudes(provider, at).await?;
            Ok(attribute.progress(sun, moon))
        }
    }
}

/// Current span at sunrise, plus the following one if the current span
/// ends before `next_sunrise`.
async fn attribute_spans<P>(
    provider: &P,
    attribute: Attribute,
    sun_at_sunrise: f64,
    moon_at_sunrise: f64,
    sunrise: EphemerisInstant,
    next_sunrise: EphemerisInstant,
    window: &SearchWindow,
) -> Result<(Span, Option<Span>), ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let count = attribute.count();
    let progress = attribute.progress(sun_at_sunrise, moon_at_sunrise);
    let number = index_from_progress(progress, count);
    let end = find_boundary(
        sunrise,
        |t| attribute_progress_at(provider, attribute, t),
        number as f64,
        attribute.modulus(),
        window,
    )
    .await?;
    if end.is_none() {
        log::debug!(
            "{} {number} does not end within {}h of sunrise",
            attribute.label(),
            window.horizon_hours
        );
    }
    let current = Span { number, end };

    let Some(end_at) = end.filter(|e| *e < next_sunrise) else {
        return Ok((current, None));
    };
    let next_number = number % count + 1;
    let next_end = find_boundary(
        end_at,
        |t| attribute_progress_at(provider, attribute, t),
        next_number as f64,
        attribute.modulus(),
        window,
    )
    .await?;
    Ok((
        current,
        Some(Span {
            number: next_number,
            end: next_end,
        }),
    ))
}

async fn sign_progress_at<P>(
    provider: &P,
    body: Body,
    at: EphemerisInstant,
) -> Result<f64, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    Ok(sidereal_longitude(provider, at, body).await? / RASHI_SPAN_DEG)
}

/// Sign of `body` at sunrise and its next change within `window`.
async fn rashi_reading<P>(
    provider: &P,
    body: Body,
    longitude_at_sunrise: f64,
    sunrise: EphemerisInstant,
    window: &SearchWindow,
) -> Result<RashiInfo, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let rashi = rashi_from_longitude(longitude_at_sunrise);
    let transition = find_boundary(
        sunrise,
        |t| sign_progress_at(provider, body, t),
        (rashi.index() + 1) as f64,
        12.0,
        window,
    )
    .await?;
    Ok(RashiInfo { rashi, transition })
}

/// Moon phase at `at`.
pub async fn moon_phase_at<P>(provider: &P, at: EphemerisInstant) -> Result<MoonPhase, ProviderError>
where
    P: EphemerisProvider + ?Sized,
{
    let (sun, moon) = sun_moon_longitudes(provider, at).await?;
    let phase = provider.phase(at, Body::Moon, SIDEREAL_FLAGS).await?;
    Ok(MoonPhase {
        illumination_percent: phase.illumination_fraction * 100.0,
        waxing: normalize_360(moon - sun) < 180.0,
        phase_angle_deg: phase.phase_angle_deg,
    })
}

/// `kalam` window for `vaar`: one eighth of the daytime.
pub fn kalam_window(
    kalam: Kalam,
    vaar: Vaar,
    sunrise: EphemerisInstant,
    sunset: EphemerisInstant,
) -> TimeWindow {
    let daytime_hours = sunset.hours_since(sunrise);
    let (from, to) = kalam.day_fractions(vaar);
    TimeWindow {
        start: sunrise.add_hours(daytime_hours * from),
        end: sunrise.add_hours(daytime_hours * to),
    }
}

fn tithi_info(span: Span) -> TithiInfo {
    TithiInfo {
        number: span.number,
        tithi: Tithi::from_number(span.number),
        paksha: if span.number <= 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        },
        end: span.end,
    }
}

fn nakshatra_info(span: Span, pada: u8) -> NakshatraInfo {
    NakshatraInfo {
        number: span.number,
        nakshatra: Nakshatra::from_number(span.number),
        pada,
        end: span.end,
    }
}

fn yoga_info(span: Span) -> YogaInfo {
    YogaInfo {
        number: span.number,
        yoga: Yoga::from_number(span.number),
        end: span.end,
    }
}

fn karana_info(span: Span) -> KaranaInfo {
    let karana = Karana::from_slot(span.number);
    KaranaInfo {
        number: span.number,
        karana,
        class: karana.map(Karana::class),
        end: span.end,
    }
}

fn local_date(at: EphemerisInstant, offset: FixedOffset) -> Result<NaiveDate, PanchangError> {
    at.to_local(offset)
        .map(|local| local.date_naive())
        .ok_or(PanchangError::Calendar("instant outside the civil calendar"))
}

/// Compute the panchanga for `date` at `location`.
///
/// Boundaries that fall outside their search window are left as `None`;
/// only provider failures, a missing sunrise or sunset, and invalid input
/// are errors.
pub async fn compute_daily<P>(
    provider: &P,
    date: NaiveDate,
    location: &Location,
    config: &PanchangConfig,
) -> Result<DailyPanchanga, PanchangError>
where
    P: EphemerisProvider + ?Sized,
{
    location.validate()?;
    if let Err(ConfigError::Invalid { field, .. }) = config.validate() {
        return Err(PanchangError::InvalidConfig(field));
    }
    let offset = location.offset()?;

    let midnight = EphemerisInstant::local_midnight(date, offset)
        .ok_or(PanchangError::Calendar("date has no local midnight"))?;
    let next_date = date
        .succ_opt()
        .ok_or(PanchangError::Calendar("date is the last representable day"))?;
    let next_midnight = EphemerisInstant::local_midnight(next_date, offset)
        .ok_or(PanchangError::Calendar("date has no local midnight"))?;

    // Rise and set
    let missing = |kind| PanchangError::MissingSunEvent { date, kind };
    let sunrise = provider
        .rise_set(midnight, Body::Sun, location, RiseSetKind::Rise)
        .await?
        .ok_or(missing(RiseSetKind::Rise))?;
    let sunset = provider
        .rise_set(sunrise, Body::Sun, location, RiseSetKind::Set)
        .await?
        .ok_or(missing(RiseSetKind::Set))?;
    let next_sunrise = provider
        .rise_set(next_midnight, Body::Sun, location, RiseSetKind::Rise)
        .await?
        .ok_or(missing(RiseSetKind::Rise))?;
    let moonrise = provider
        .rise_set(midnight, Body::Moon, location, RiseSetKind::Rise)
        .await?
        .filter(|t| *t < next_midnight);
    let moonset = provider
        .rise_set(midnight, Body::Moon, location, RiseSetKind::Set)
        .await?
        .filter(|t| *t < next_midnight);
    let ayanamsa_deg = provider.ayanamsa(sunrise).await?;

    // Attributes at sunrise
    let (sun, moon) = sun_moon_longitudes(provider, sunrise).await?;
    let window = &config.attribute_search;
    let (tithi, tithi_next) = attribute_spans(
        provider, Attribute::LunarDay, sun, moon, sunrise, next_sunrise, window,
    )
    .await?;
    let (nakshatra, nakshatra_next) = attribute_spans(
        provider, Attribute::Mansion, sun, moon, sunrise, next_sunrise, window,
    )
    .await?;
    let (yoga, yoga_next) =
        attribute_spans(provider, Attribute::Yoga, sun, moon, sunrise, next_sunrise, window)
            .await?;
    let (karana, karana_next) = attribute_spans(
        provider, Attribute::HalfDay, sun, moon, sunrise, next_sunrise, window,
    )
    .await?;

    let tithi = Reading {
        current: tithi_info(tithi),
        next: tithi_next.map(tithi_info),
    };
    let pada = nakshatra_from_longitude(moon).pada;
    let nakshatra = Reading {
        current: nakshatra_info(nakshatra, pada),
        next: nakshatra_next.map(|s| nakshatra_info(s, 1)),
    };
    let yoga = Reading {
        current: yoga_info(yoga),
        next: yoga_next.map(yoga_info),
    };
    let karana = Reading {
        current: karana_info(karana),
        next: karana_next.map(karana_info),
    };

    let sunrise_local = sunrise
        .to_local(offset)
        .ok_or(PanchangError::Calendar("sunrise outside the civil calendar"))?;
    let vaar = Vaar::from_days_from_sunday(sunrise_local.weekday().num_days_from_sunday());
    let moon_phase = moon_phase_at(provider, sunrise).await?;

    // Month, ingress, signs, era
    let lunar_month = lunar_month_at(provider, sunrise, tithi.current.number, config).await?;
    let sankranti = ingress_between(provider, sunrise, sunrise.add_hours(24.0), config).await?;
    let sun_rashi =
        rashi_reading(provider, Body::Sun, sun, sunrise, &config.ingress_search).await?;
    let moon_rashi =
        rashi_reading(provider, Body::Moon, moon, sunrise, &config.moon_sign_search).await?;
    let era = era_for_date(date, &lunar_month);

    let last_sankranti: Option<Sankranti> = match sankranti {
        Some(today) => Some(today),
        None => previous_ingress(provider, sunrise, config).await?,
    };
    let last_sankranti_date = match last_sankranti {
        Some(s) => Some(local_date(s.at, offset)?),
        None => None,
    };
    let days_since_sankranti = last_sankranti_date.map(|d| (date - d).num_days());

    log::debug!(
        "panchanga {date} at {}: tithi {} nakshatra {} masa {}",
        location.name,
        tithi.current.number,
        nakshatra.current.number,
        lunar_month.masa.name()
    );

    Ok(DailyPanchanga {
        date,
        location: location.key(config.cache.coordinate_decimals),
        sunrise,
        sunset,
        next_sunrise,
        moonrise,
        moonset,
        ayanamsa_deg,
        vaar,
        tithi,
        nakshatra,
        yoga,
        karana,
        moon_phase,
        rahu_kalam: kalam_window(Kalam::Rahu, vaar, sunrise, sunset),
        yamaganda: kalam_window(Kalam::Yamaganda, vaar, sunrise, sunset),
        gulika_kalam: kalam_window(Kalam::Gulika, vaar, sunrise, sunset),
        lunar_month,
        sankranti,
        sun_rashi,
        moon_rashi,
        era,
        last_sankranti,
        last_sankranti_date,
        days_since_sankranti,
    })
}
