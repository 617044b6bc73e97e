//! Leaky aquifer (Hantush–Jacob) in Laplace and time-domain integral form.

use crate::common::{ensure_kernel_value, radial_source};
use crate::error::ModelResult;
use crate::traits::{LaplaceKernel, NumericDefaults, RadialIntegral, Representation, Solution};
use std::f64::consts::PI;
use wf_core::special::exp1;
use wf_core::{AquiferParameters, Complex, ParamResult, ParameterError, Tolerances, WellConfiguration};
use wf_solver::{QuadratureConfig, RadialQuadrature, SolverResult};

fn leakage(aquifer: &AquiferParameters) -> ParamResult<f64> {
    aquifer.leakage().ok_or(ParameterError::Missing {
        what: "leakage coefficient",
    })
}

/// Laplace form: `q² = (p S + c) / T`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hantush;

impl LaplaceKernel for Hantush {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let c = leakage(aquifer)?;
        let q = ((p * aquifer.storativity() + c) / aquifer.transmissivity()).sqrt();
        let value = radial_source(p, q, r, well.radius(), aquifer.transmissivity());
        ensure_kernel_value("hantush", p, value)
    }
}

impl Solution for Hantush {
    fn id(&self) -> &'static str {
        "hantush"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["leaky"]
    }

    fn description(&self) -> &'static str {
        "Leaky confined aquifer without aquitard storage"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["transmissivity", "storativity", "leakage coefficient", "well radius (optional)"]
    }

    fn validate(&self, aquifer: &AquiferParameters, _wells: &[WellConfiguration]) -> ParamResult<()> {
        leakage(aquifer).map(|_| ())
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Laplace(self)
    }
}

/// Time-domain form:
/// ```text
/// s = 1/(4πT) ∫_u^∞ exp(-y - r²/(4B²y)) / y dy,   u = r²S/(4Tt),  B² = T/c
/// ```
/// Line source only; the well radius is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct HantushIntegral;

impl RadialIntegral for HantushIntegral {
    fn drawdown(
        &self,
        quadrature: &RadialQuadrature,
        r: f64,
        t: f64,
        aquifer: &AquiferParameters,
        _well: &WellConfiguration,
    ) -> ModelResult<f64> {
        let c = leakage(aquifer)?;
        let transmissivity = aquifer.transmissivity();
        let u = r * r * aquifer.storativity() / (4.0 * transmissivity * t);
        let r_over_b = r * (c / transmissivity).sqrt();
        let w = leaky_well_function(quadrature, u, r_over_b)?;
        Ok(w / (4.0 * PI * transmissivity))
    }
}

impl Solution for HantushIntegral {
    fn id(&self) -> &'static str {
        "hantush_integral"
    }

    fn description(&self) -> &'static str {
        "Leaky confined aquifer, leaky well function by direct quadrature"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["transmissivity", "storativity", "leakage coefficient"]
    }

    fn validate(&self, aquifer: &AquiferParameters, _wells: &[WellConfiguration]) -> ParamResult<()> {
        leakage(aquifer).map(|_| ())
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Integral(self)
    }

    fn defaults(&self) -> NumericDefaults {
        NumericDefaults {
            quadrature: QuadratureConfig {
                tolerances: Tolerances {
                    abs: 1e-15,
                    rel: 1e-9,
                },
                ..QuadratureConfig::default()
            },
            ..NumericDefaults::default()
        }
    }
}

/// Hantush leaky well function `W(u, r/B)`.
///
/// Bounded above by `E1(u)`; returns zero once that bound is below the
/// quadrature's absolute tolerance.
pub fn leaky_well_function(quadrature: &RadialQuadrature, u: f64, r_over_b: f64) -> SolverResult<f64> {
    if exp1(u) <= quadrature.config().tolerances.abs {
        return Ok(0.0);
    }
    let beta = 0.25 * r_over_b * r_over_b;
    quadrature
        .integrate_log_to_infinity(|y| (-y - beta / y).exp() / y, u)
        .map(|est| est.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theis::Theis;

    #[test]
    fn missing_leakage_is_a_parameter_error() {
        let aq = AquiferParameters::new(100.0, 1e-4).unwrap();
        assert!(matches!(
            Hantush.validate(&aq, &[]),
            Err(ParameterError::Missing { .. })
        ));
        assert!(HantushIntegral.validate(&aq, &[]).is_err());
    }

    #[test]
    fn vanishing_leakage_recovers_theis_kernel() {
        let aq = AquiferParameters::new(50.0, 2e-4).unwrap();
        let leaky = aq.clone().with_leakage(1e-14).unwrap();
        let well = WellConfiguration::new();
        let p = Complex::new(1e-2, 3e-2);
        let a = Hantush.evaluate(p, 20.0, &leaky, &well).unwrap();
        let b = Theis.evaluate(p, 20.0, &aq, &well).unwrap();
        assert!((a - b).norm() < 1e-8 * b.norm());
    }

    #[test]
    fn leaky_well_function_without_leakage_is_exp1() {
        let q = RadialQuadrature::default();
        for &u in &[1e-6, 1e-2, 1.0] {
            let w = leaky_well_function(&q, u, 0.0).unwrap();
            assert!((w - exp1(u)).abs() <= 1e-6 * exp1(u));
        }
    }

    #[test]
    fn leaky_well_function_vanishes_for_large_u() {
        let q = RadialQuadrature::default();
        for &u in &[60.0, 745.0, 1000.0, 1e6] {
            assert_eq!(leaky_well_function(&q, u, 0.5).unwrap(), 0.0, "u={u}");
        }
        assert!(leaky_well_function(&q, 20.0, 0.5).unwrap() > 0.0);
    }

    #[test]
    fn leaky_well_function_reference_values() {
        // Hantush (1956) table: W(u, r/B)
        let q = RadialQuadrature::default();
        let w = leaky_well_function(&q, 1e-6, 0.1).unwrap();
        assert!((w - 4.8541).abs() < 1e-3, "{w}");
        let w = leaky_well_function(&q, 0.01, 1.0).unwrap();
        assert!((w - 0.8420).abs() < 1e-3, "{w}");
    }
}
