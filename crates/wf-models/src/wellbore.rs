//! Finite-radius well with wellbore storage and skin (Agarwal et al.).
//!
//! With `s = A K0(q r)` in the aquifer, the well balance
//! `Q/p = C p s̄_w + 2π T r_w q A K1(q r_w)` and the skin relation
//! `s̄_w = A (K0(q r_w) + Sk r_w q K1(q r_w))` give
//! ```text
//! A = (1/p) / (2π T r_w q K1 + C p (K0 + Sk r_w q K1))
//! ```
//! At `r = r_w` the model reports the drawdown inside the well, skin included.

use crate::common::{TWO_PI, ensure_kernel_value};
use crate::error::ModelResult;
use crate::traits::{LaplaceKernel, NumericDefaults, Representation, Solution};
use wf_core::special::scaled_bessel;
use wf_core::{AquiferParameters, Complex, ParamResult, ParameterError, WellConfiguration};
use wf_solver::InversionConfig;

#[derive(Clone, Copy, Debug, Default)]
pub struct WellboreStorage;

impl LaplaceKernel for WellboreStorage {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let rw = well.radius();
        let q = (p / aquifer.diffusivity()).sqrt();
        let qrw = q * rw;
        let at_w = scaled_bessel(qrw);

        // everything divided by K1(q r_w)
        let skin_term = at_w.k0e / at_w.k1e + qrw * well.skin();
        let denom = p * (qrw * (TWO_PI * aquifer.transmissivity()) + p * well.wellbore_storage() * skin_term);

        let value = if r <= rw * (1.0 + 1e-12) {
            skin_term / denom
        } else {
            let at_r = scaled_bessel(q * r);
            at_r.k0e / at_w.k1e * (-(q * (r - rw))).exp() / denom
        };
        ensure_kernel_value("wellbore_storage", p, value)
    }
}

impl Solution for WellboreStorage {
    fn id(&self) -> &'static str {
        "wellbore_storage"
    }

    fn description(&self) -> &'static str {
        "Confined aquifer, finite-radius well with wellbore storage and skin"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &[
            "transmissivity",
            "storativity",
            "well radius > 0",
            "wellbore storage or casing radius",
            "skin factor",
        ]
    }

    fn validate(&self, _aquifer: &AquiferParameters, wells: &[WellConfiguration]) -> ParamResult<()> {
        for well in wells {
            if well.radius() <= 0.0 {
                return Err(ParameterError::NonPositive {
                    what: "well radius",
                    value: well.radius(),
                });
            }
        }
        Ok(())
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Laplace(self)
    }

    fn defaults(&self) -> NumericDefaults {
        NumericDefaults {
            inversion: InversionConfig {
                max_order: 32,
                ..InversionConfig::default()
            },
            ..NumericDefaults::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theis::Theis;

    #[test]
    fn no_storage_no_skin_is_finite_radius_theis() {
        let aq = AquiferParameters::new(100.0, 1e-4).unwrap();
        let well = WellConfiguration::new().with_radius(0.1).unwrap();
        let p = Complex::new(5e-3, 2e-2);
        for r in [0.1, 1.0, 25.0] {
            let a = WellboreStorage.evaluate(p, r, &aq, &well).unwrap();
            let b = Theis.evaluate(p, r, &aq, &well).unwrap();
            assert!((a - b).norm() < 1e-12 * b.norm(), "r={r}");
        }
    }

    #[test]
    fn positive_skin_raises_well_drawdown_only() {
        let aq = AquiferParameters::new(100.0, 1e-4).unwrap();
        let clean = WellConfiguration::new().with_radius(0.1).unwrap();
        let skinned = clean.with_skin(5.0).unwrap();
        let p = Complex::new(1e-3, 0.0);
        let in_well = WellboreStorage.evaluate(p, 0.1, &aq, &skinned).unwrap().re;
        let in_well_clean = WellboreStorage.evaluate(p, 0.1, &aq, &clean).unwrap().re;
        assert!(in_well > in_well_clean);
        // without storage the aquifer response does not depend on skin
        let far = WellboreStorage.evaluate(p, 10.0, &aq, &skinned).unwrap();
        let far_clean = WellboreStorage.evaluate(p, 10.0, &aq, &clean).unwrap();
        assert!((far - far_clean).norm() < 1e-12 * far_clean.norm());
    }

    #[test]
    fn requires_finite_radius() {
        let aq = AquiferParameters::new(100.0, 1e-4).unwrap();
        assert!(WellboreStorage.validate(&aq, &[WellConfiguration::new()]).is_err());
    }
}
