//! Engine options.

use wf_models::NumericDefaults;
use wf_solver::{InversionConfig, QuadratureConfig};

/// What to do when one observation point fails numerically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailurePolicy {
    /// Mark the point NaN, record the failure and continue.
    #[default]
    Nan,
    /// Abort the whole evaluation with the first failure.
    Raise,
}

/// Options for a superposition run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOptions {
    pub inversion: InversionConfig,
    pub quadrature: QuadratureConfig,
    pub failure_policy: FailurePolicy,
    /// Evaluate step responses on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_defaults(NumericDefaults::default())
    }
}

impl EngineOptions {
    /// Options seeded from a model's numeric defaults.
    pub fn from_defaults(defaults: NumericDefaults) -> Self {
        Self {
            inversion: defaults.inversion,
            quadrature: defaults.quadrature,
            failure_policy: FailurePolicy::default(),
            parallel: true,
        }
    }
}
