use crate::ParameterError;

/// Floating point type used throughout system
pub type Real = f64;

/// Complex type used for Laplace-space values.
pub type Complex = num_complex::Complex64;

/// Absolute/relative tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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

impl Tolerances {
    /// Accepted error for an estimate of magnitude `scale`.
    pub fn bound(&self, scale: Real) -> Real {
        self.abs.max(self.rel * scale.abs())
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, ParameterError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParameterError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, ParameterError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ParameterError::NonPositive { what, value: v })
    }
}

/// Finite and not negative.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, ParameterError> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(ParameterError::Negative { what, value: v })
    }
}

pub fn is_finite_complex(z: Complex) -> bool {
    z.re.is_finite() && z.im.is_finite()
}
