//! Double-porosity aquifer with pseudo-steady fracture/matrix exchange.
//!
//! Fracture storativity is the aquifer's base storativity `S_f`; the matrix
//! has storativity `S_m` and exchanges water at rate `λ (h_f - h_m)`:
//! ```text
//! q² = (p / T) · (S_f + λ S_m / (S_m p + λ))
//! ```
//! Early times see only `S_f`, late times the total `S_f + S_m`.

use crate::common::{ensure_kernel_value, radial_source};
use crate::error::ModelResult;
use crate::traits::{LaplaceKernel, Representation, Solution};
use wf_core::{AquiferParameters, Complex, DualPorosity, ParamResult, ParameterError, WellConfiguration};

fn dual(aquifer: &AquiferParameters) -> ParamResult<DualPorosity> {
    aquifer.dual_porosity().ok_or(ParameterError::Missing {
        what: "matrix storativity and exchange coefficient",
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DoublePorosity;

impl LaplaceKernel for DoublePorosity {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let d = dual(aquifer)?;
        let lambda = d.exchange_coefficient;
        let sm = d.matrix_storativity;
        let storage = (p * sm + lambda).inv() * (lambda * sm) + aquifer.storativity();
        let q = (p * storage / aquifer.transmissivity()).sqrt();
        let value = radial_source(p, q, r, well.radius(), aquifer.transmissivity());
        ensure_kernel_value("double_porosity", p, value)
    }
}

impl Solution for DoublePorosity {
    fn id(&self) -> &'static str {
        "double_porosity"
    }

    fn description(&self) -> &'static str {
        "Fractured aquifer with matrix storage (Warren-Root exchange)"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &[
            "transmissivity",
            "storativity (fracture)",
            "matrix storativity",
            "exchange coefficient",
            "well radius (optional)",
        ]
    }

    fn validate(&self, aquifer: &AquiferParameters, _wells: &[WellConfiguration]) -> ParamResult<()> {
        dual(aquifer).map(|_| ())
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Laplace(self)
    }
}
