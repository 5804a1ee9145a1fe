//! Shared angle utilities.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    normalize_cyclic(deg, 360.0)
}

/// Normalize a value onto the half-open cycle [0, modulus).
///
/// Tiny negative inputs round up to `modulus` in floating point; those
/// collapse to 0 so the result never reaches the upper bound.
pub fn normalize_cyclic(value: f64, modulus: f64) -> f64 {
    let r = value % modulus;
    let r = if r < 0.0 { r + modulus } else { r };
    if r >= modulus { 0.0 } else { r }
}

/// Shortest signed separation `a - b` in degrees, in (-180, 180].
pub fn signed_separation(a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    if d > 180.0 { d - 360.0 } else { d }
}
