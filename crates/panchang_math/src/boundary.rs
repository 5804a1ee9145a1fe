//! Boundary search for cyclic progress values.
//!
//! The finder brackets a crossing by stepping forward at a fixed interval,
//! unwrapping the cyclic value at each step, then refines the bracket by
//! bisection. The progress function is an async closure so callers can
//! sample an ephemeris that suspends; synthetic closures work the same way.
//!
//! A crossing that does not occur inside the horizon is reported as
//! `Ok(None)`. That is the expected outcome for slow attributes searched
//! with a short window, not a failure.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::util::normalize_cyclic;

/// A continuously ordered time coordinate the finder can step along.
pub trait SearchTime: Copy + PartialOrd {
    /// The coordinate `hours` after `self` (negative moves backward).
    fn offset_hours(self, hours: f64) -> Self;

    /// Hours elapsed from `self` to `later`.
    fn hours_until(self, later: Self) -> f64;
}

impl SearchTime for f64 {
    fn offset_hours(self, hours: f64) -> Self {
        self + hours
    }

    fn hours_until(self, later: Self) -> f64 {
        later - self
    }
}

/// Step size, horizon and refinement depth for one boundary search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    /// Bracketing step in hours.
    pub step_hours: f64,
    /// Maximum distance searched from the start, in hours.
    pub horizon_hours: f64,
    /// Bisection iterations inside the bracket.
    pub iterations: u32,
}

impl SearchWindow {
    /// Tithi-scale window: 1h steps over 36h, 20 bisections (~3 ms).
    pub const ATTRIBUTE: Self = Self {
        step_hours: 1.0,
        horizon_hours: 36.0,
        iterations: 20,
    };

    /// Full/new-moon bracketing around a candidate day.
    pub const LUNAR_PHASE: Self = Self {
        step_hours: 1.0,
        horizon_hours: 96.0,
        iterations: 24,
    };

    /// Lunar sign changes: the Moon can stay in one sign for about 60h.
    pub const LUNAR_SIGN: Self = Self {
        step_hours: 2.0,
        horizon_hours: 66.0,
        iterations: 24,
    };

    /// Solar sign changes: daily steps over 32 days.
    pub const SOLAR_SIGN: Self = Self {
        step_hours: 24.0,
        horizon_hours: 768.0,
        iterations: 30,
    };

    pub const fn new(step_hours: f64, horizon_hours: f64, iterations: u32) -> Self {
        Self {
            step_hours,
            horizon_hours,
            iterations,
        }
    }

    /// Number of bracketing samples after the start.
    pub fn step_count(&self) -> usize {
        if self.step_hours <= 0.0 || self.horizon_hours <= 0.0 {
            return 0;
        }
        (self.horizon_hours / self.step_hours).ceil() as usize
    }

    /// Width of the final bracket after refinement, in seconds.
    pub fn resolution_seconds(&self) -> f64 {
        self.step_hours * 3600.0 / 2f64.powi(self.iterations as i32)
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::ATTRIBUTE
    }
}

/// Forward distance from `from` to `to` on a cycle of length `modulus`.
///
/// Progress values only increase, so a raw decrease means the value wrapped.
fn forward_delta(from: f64, to: f64, modulus: f64) -> f64 {
    let d = to - from;
    if d < 0.0 { d + modulus } else { d }
}

/// Find the first instant after `start` where `progress` reaches `target`.
///
/// `progress` must be non-decreasing modulo `modulus` over the horizon.
/// `target` is taken modulo `modulus`; a target at or behind the starting
/// value means the crossing in the next cycle.
pub async fn find_boundary<T, F, Fut, E>(
    start: T,
    mut progress: F,
    target: f64,
    modulus: f64,
    window: &SearchWindow,
) -> Result<Option<T>, E>
where
    T: SearchTime,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<f64, E>>,
{
    let start_raw = normalize_cyclic(progress(start).await?, modulus);
    let mut goal = normalize_cyclic(target, modulus);
    if goal <= start_raw {
        goal += modulus;
    }

    let mut lo = start;
    let mut lo_raw = start_raw;
    let mut lo_unwrapped = start_raw;

    for i in 1..=window.step_count() {
        let hours = (i as f64 * window.step_hours).min(window.horizon_hours);
        let t = start.offset_hours(hours);
        let raw = normalize_cyclic(progress(t).await?, modulus);
        let unwrapped = lo_unwrapped + forward_delta(lo_raw, raw, modulus);

        if lo_unwrapped < goal && goal <= unwrapped {
            let hit = refine(
                &mut progress,
                (lo, lo_raw, lo_unwrapped),
                t,
                goal,
                modulus,
                window.iterations,
            )
            .await?;
            return Ok(Some(hit));
        }

        lo = t;
        lo_raw = raw;
        lo_unwrapped = unwrapped;
    }

    log::debug!(
        "no crossing of {target:.4} (mod {modulus}) within {}h",
        window.horizon_hours
    );
    Ok(None)
}

/// Bisect a bracket whose unwrapped values straddle `goal`.
async fn refine<T, F, Fut, E>(
    progress: &mut F,
    lower: (T, f64, f64),
    upper: T,
    goal: f64,
    modulus: f64,
    iterations: u32,
) -> Result<T, E>
where
    T: SearchTime,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<f64, E>>,
{
    let (mut lo, mut lo_raw, mut lo_unwrapped) = lower;
    let mut hi = upper;

    for _ in 0..iterations {
        let mid = lo.offset_hours(lo.hours_until(hi) / 2.0);
        let raw = normalize_cyclic(progress(mid).await?, modulus);
        let unwrapped = lo_unwrapped + forward_delta(lo_raw, raw, modulus);
        if unwrapped < goal {
            lo = mid;
            lo_raw = raw;
            lo_unwrapped = unwrapped;
        } else {
            hi = mid;
        }
    }

    Ok(lo.offset_hours(lo.hours_until(hi) / 2.0))
}

/// Locate where a discrete classification changes between `lo` and `hi`.
///
/// `classify` must differ at the two ends; the returned instant lies within
/// `precision_hours` after the last sample that still matched `lo`.
pub async fn find_change<T, K, F, Fut, E>(
    lo: T,
    hi: T,
    mut classify: F,
    precision_hours: f64,
) -> Result<T, E>
where
    T: SearchTime,
    K: PartialEq,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<K, E>>,
{
    let start_key = classify(lo).await?;
    let mut lo = lo;
    let mut hi = hi;

    while lo.hours_until(hi) > precision_hours {
        let mid = lo.offset_hours(lo.hours_until(hi) / 2.0);
        if classify(mid).await? == start_key {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok(hi)
}
