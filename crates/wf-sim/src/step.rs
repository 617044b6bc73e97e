//! Unit step response of a single well.

use crate::config::EngineOptions;
use crate::error::SimResult;
use tracing::trace;
use wf_core::{AquiferParameters, ParameterError, WellConfiguration};
use wf_models::{Representation, Solution};
use wf_solver::{LaplaceInverter, RadialQuadrature, SolverError};

/// Drawdown for a unit rate switched on at `t = 0`, for one model and aquifer.
///
/// Laplace models are inverted with the configured inverter; integral models
/// go through the configured quadrature. The evaluator holds no mutable state
/// and is shared across worker threads.
pub struct StepResponseEvaluator<'a> {
    solution: &'a dyn Solution,
    aquifer: &'a AquiferParameters,
    inverter: LaplaceInverter,
    quadrature: RadialQuadrature,
}

impl<'a> StepResponseEvaluator<'a> {
    pub fn new(
        solution: &'a dyn Solution,
        aquifer: &'a AquiferParameters,
        options: &EngineOptions,
    ) -> SimResult<Self> {
        Ok(Self {
            solution,
            aquifer,
            inverter: LaplaceInverter::new(options.inversion.clone())?,
            quadrature: RadialQuadrature::new(options.quadrature.clone())?,
        })
    }

    pub fn solution(&self) -> &dyn Solution {
        self.solution
    }

    /// Step response at distance `r` after `t` of pumping. Zero for `t <= 0`.
    pub fn unit_response(&self, well: &WellConfiguration, r: f64, t: f64) -> SimResult<f64> {
        if !(r.is_finite() && r > 0.0) {
            return Err(ParameterError::NonPositive {
                what: "radial distance",
                value: r,
            }
            .into());
        }
        if t.is_nan() {
            return Err(ParameterError::NonFinite {
                what: "elapsed time",
                value: t,
            }
            .into());
        }
        if t <= 0.0 {
            return Ok(0.0);
        }

        let aquifer = self.aquifer;
        match self.solution.representation() {
            Representation::Laplace(kernel) => {
                let inversion = self
                    .inverter
                    .invert(|p| kernel.evaluate(p, r, aquifer, well).map_err(SolverError::from), t)?;
                trace!(r, t, order = inversion.order, "step response inverted");
                Ok(inversion.value)
            }
            Representation::Integral(integral) => {
                Ok(integral.drawdown(&self.quadrature, r, t, aquifer, well)?)
            }
        }
    }

    /// Step responses at several elapsed times, one result per time.
    pub fn curve(&self, well: &WellConfiguration, r: f64, times: &[f64]) -> Vec<SimResult<f64>> {
        times.iter().map(|&t| self.unit_response(well, r, t)).collect()
    }
}
