//! Membership Functions
//!
//! All functions are total on the reals. Feet are exclusive: a triangle or
//! trapezoid is exactly 0 at `a` and at its right foot, even when a shoulder
//! coincides with the foot (e.g. `trapezoidal(0.0, 0.0, 0.0, 0.3, 0.45) == 0`).

use serde::{Deserialize, Serialize};

/// Triangle with left foot `a`, peak `b`, right foot `c`
pub fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= a || x >= c {
        0.0
    } else if x <= b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Trapezoid with feet `a`, `d` and plateau `[b, c]`
pub fn trapezoidal(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x <= a || x >= d {
        0.0
    } else if x < b {
        (x - a) / (b - a)
    } else if x <= c {
        1.0
    } else {
        (d - x) / (d - c)
    }
}

/// Bell curve, `exp(-0.5 * ((x - mean) / sigma)^2)`
pub fn gaussian(x: f64, mean: f64, sigma: f64) -> f64 {
    (-0.5 * ((x - mean) / sigma).powi(2)).exp()
}

/// Shape of a fuzzy set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipFunction {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    Gaussian { mean: f64, sigma: f64 },
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        MembershipFunction::Triangular { a, b, c }
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        MembershipFunction::Trapezoidal { a, b, c, d }
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Self {
        MembershipFunction::Gaussian { mean, sigma }
    }

    /// Membership degree of `x`
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => triangular(x, a, b, c),
            MembershipFunction::Trapezoidal { a, b, c, d } => trapezoidal(x, a, b, c, d),
            MembershipFunction::Gaussian { mean, sigma } => gaussian(x, mean, sigma),
        }
    }

    /// Check the shape parameters, returning the reason they are unusable
    pub fn validate(&self) -> Result<(), &'static str> {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if ![a, b, c].iter().all(|v| v.is_finite()) {
                    Err("parameters must be finite")
                } else if a >= b || b >= c {
                    Err("triangle needs a < b < c")
                } else {
                    Ok(())
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if ![a, b, c, d].iter().all(|v| v.is_finite()) {
                    Err("parameters must be finite")
                } else if a > b || b > c || c > d || a >= d {
                    Err("trapezoid needs a <= b <= c <= d with a < d")
                } else {
                    Ok(())
                }
            }
            MembershipFunction::Gaussian { mean, sigma } => {
                if !mean.is_finite() || !sigma.is_finite() {
                    Err("parameters must be finite")
                } else if sigma <= 0.0 {
                    Err("gaussian needs sigma > 0")
                } else {
                    Ok(())
                }
            }
        }
    }
}
