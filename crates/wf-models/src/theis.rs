//! Confined aquifer (Theis), line source or finite-radius well.

use crate::common::{ensure_kernel_value, radial_source};
use crate::error::ModelResult;
use crate::traits::{LaplaceKernel, Representation, Solution};
use std::f64::consts::PI;
use wf_core::special::theis_well_function;
use wf_core::{AquiferParameters, Complex, ParamResult, WellConfiguration};

#[derive(Clone, Copy, Debug, Default)]
pub struct Theis;

impl LaplaceKernel for Theis {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let q = (p / aquifer.diffusivity()).sqrt();
        let value = radial_source(p, q, r, well.radius(), aquifer.transmissivity());
        ensure_kernel_value("theis", p, value)
    }
}

impl Solution for Theis {
    fn id(&self) -> &'static str {
        "theis"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["confined"]
    }

    fn description(&self) -> &'static str {
        "Confined, homogeneous, infinite aquifer"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &["transmissivity", "storativity", "well radius (optional)"]
    }

    fn validate(&self, _aquifer: &AquiferParameters, _wells: &[WellConfiguration]) -> ParamResult<()> {
        Ok(())
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Laplace(self)
    }
}

/// Closed-form line-source drawdown for a unit rate, `W(u) / (4π T)`.
pub fn theis_drawdown(aquifer: &AquiferParameters, r: f64, t: f64) -> f64 {
    let u = r * r * aquifer.storativity() / (4.0 * aquifer.transmissivity() * t);
    theis_well_function(u) / (4.0 * PI * aquifer.transmissivity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_finite_radius_approaches_line_source() {
        let aq = AquiferParameters::new(100.0, 1e-4).unwrap();
        let line = WellConfiguration::new();
        let thin = WellConfiguration::new().with_radius(1e-6).unwrap();
        let p = Complex::new(2e-3, 4e-3);
        let a = Theis.evaluate(p, 10.0, &aq, &line).unwrap();
        let b = Theis.evaluate(p, 10.0, &aq, &thin).unwrap();
        assert!((a - b).norm() < 1e-8 * a.norm());
    }

    #[test]
    fn closed_form_reference() {
        // Q / (4πT) W(u) with Q = 1000, T = 100, S = 1e-4, r = 10, t = 1000
        let aq = AquiferParameters::new(100.0, 1e-4).unwrap();
        let s = 1000.0 * theis_drawdown(&aq, 10.0, 1000.0);
        assert!((s - 13.470_217_369_551_84).abs() < 1e-9);
    }
}
