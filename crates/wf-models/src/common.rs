//! Helpers shared by the radial kernels.

use crate::error::{ModelError, ModelResult};
use std::f64::consts::PI;
use wf_core::special::scaled_bessel;
use wf_core::{Complex, ParamResult, ParameterError, Position, WellConfiguration, is_finite_complex};

pub const TWO_PI: f64 = 2.0 * PI;

/// Observation points must be off the well axis and outside the screen.
pub fn check_observation_distance(well: &WellConfiguration, point: &Position) -> ParamResult<()> {
    let r = well.position().distance_to(point);
    if !r.is_finite() {
        return Err(ParameterError::NonFinite {
            what: "observation distance",
            value: r,
        });
    }
    if r <= 0.0 {
        return Err(ParameterError::NonPositive {
            what: "observation distance from well",
            value: r,
        });
    }
    if r < well.radius() {
        return Err(ParameterError::Inconsistent {
            what: format!(
                "observation distance {r} is inside the well screen (radius {})",
                well.radius()
            ),
        });
    }
    Ok(())
}

/// Reject NaN/inf kernel output.
pub fn ensure_kernel_value(model: &'static str, p: Complex, value: Complex) -> ModelResult<Complex> {
    if is_finite_complex(value) {
        Ok(value)
    } else {
        Err(ModelError::KernelEvaluation {
            what: format!("{model}: non-finite value {value} at p = {p}"),
        })
    }
}

/// Unit step response of a radial source in a homogeneous medium:
/// ```text
/// line source (r_w = 0):  K0(q r) / (2π T p)
/// finite radius:          K0(q r) / (2π T p · r_w q K1(q r_w))
/// ```
pub fn radial_source(p: Complex, q: Complex, r: f64, well_radius: f64, transmissivity: f64) -> Complex {
    let at_r = scaled_bessel(q * r);
    let denom = p * (TWO_PI * transmissivity);
    if well_radius > 0.0 {
        let at_w = scaled_bessel(q * well_radius);
        at_r.k0e / (at_w.k1e * q * well_radius) * (-(q * (r - well_radius))).exp() / denom
    } else {
        at_r.k0e * (-(q * r)).exp() / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::special::{bessel_k0, bessel_k1};

    #[test]
    fn observation_distance_checks() {
        let well = WellConfiguration::at(0.0, 0.0)
            .and_then(|w| w.with_radius(0.2))
            .unwrap();
        assert!(check_observation_distance(&well, &Position::new(5.0, 0.0)).is_ok());
        assert!(check_observation_distance(&well, &Position::new(0.2, 0.0)).is_ok());
        assert!(matches!(
            check_observation_distance(&well, &Position::ORIGIN),
            Err(ParameterError::NonPositive { .. })
        ));
        assert!(matches!(
            check_observation_distance(&well, &Position::new(0.1, 0.0)),
            Err(ParameterError::Inconsistent { .. })
        ));
    }

    #[test]
    fn radial_source_matches_unscaled_forms() {
        let p = Complex::new(0.3, 1.7);
        let q = (p * 1e-2).sqrt();
        let (r, rw, t) = (12.0, 0.5, 3.0);
        let line = radial_source(p, q, r, 0.0, t);
        let expected_line = bessel_k0(q * r) / (p * TWO_PI * t);
        assert!((line - expected_line).norm() < 1e-12 * expected_line.norm());

        let finite = radial_source(p, q, r, rw, t);
        let expected_finite = bessel_k0(q * r) / (p * TWO_PI * t * q * rw * bessel_k1(q * rw));
        assert!((finite - expected_finite).norm() < 1e-12 * expected_finite.norm());
    }

    #[test]
    fn non_finite_kernel_value_is_rejected() {
        let p = Complex::new(1.0, 0.0);
        assert!(ensure_kernel_value("test", p, Complex::new(1.0, 0.0)).is_ok());
        assert!(matches!(
            ensure_kernel_value("test", p, Complex::new(f64::INFINITY, 0.0)),
            Err(ModelError::KernelEvaluation { .. })
        ));
    }
}
