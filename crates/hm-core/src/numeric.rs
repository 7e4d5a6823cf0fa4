use crate::{HmError, HmResult};

/// Floating point type used throughout the translator
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Realized vs. requested assembly R-value agreement (hr-ft2-F/Btu).
pub const R_VALUE_TOLERANCE: Real = 0.01;

/// Load fractions below this are treated as zero.
pub const LOAD_FRACTION_EPSILON: Real = 0.01;

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> HmResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HmError::NonFinite { what, value: v })
    }
}

/// Round to `places` decimal places, half away from zero.
pub fn round_to(v: Real, places: i32) -> Real {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}
