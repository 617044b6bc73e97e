//! Error types for step-response and superposition evaluation.

use thiserror::Error;
use wf_core::ParameterError;
use wf_models::ModelError;
use wf_solver::SolverError;

/// Errors encountered while evaluating drawdown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Kernel evaluation failed: {what}")]
    KernelEvaluation { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// Failures confined to one observation point, subject to the
    /// NaN-or-raise policy.
    pub fn is_point_failure(&self) -> bool {
        matches!(
            self,
            SimError::KernelEvaluation { .. } | SimError::ConvergenceFailed { .. }
        )
    }
}

impl From<SolverError> for SimError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::KernelEvaluation { what } | SolverError::Numeric { what } => {
                SimError::KernelEvaluation { what }
            }
            SolverError::ConvergenceFailed { what } => SimError::ConvergenceFailed { what },
            SolverError::InvalidConfig { what } => SimError::InvalidArg {
                what: what.to_string(),
            },
            SolverError::InvalidInput { what } => SimError::InvalidArg { what },
        }
    }
}

impl From<ModelError> for SimError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Parameter(p) => SimError::Parameter(p),
            ModelError::KernelEvaluation { what } => SimError::KernelEvaluation { what },
            ModelError::Solver(s) => s.into(),
            other => SimError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_failures_keep_their_class() {
        let e: SimError = SolverError::ConvergenceFailed {
            what: "order 24".to_string(),
        }
        .into();
        assert!(matches!(e, SimError::ConvergenceFailed { .. }));
        assert!(e.is_point_failure());

        let e: SimError = SolverError::InvalidConfig { what: "max_order" }.into();
        assert!(!e.is_point_failure());
    }

    #[test]
    fn model_errors_unwrap_nested_solver_errors() {
        let e: SimError = ModelError::Solver(SolverError::KernelEvaluation {
            what: "nan".to_string(),
        })
        .into();
        assert!(matches!(e, SimError::KernelEvaluation { .. }));

        let e: SimError = ModelError::Parameter(ParameterError::Missing { what: "leakage" }).into();
        assert!(matches!(e, SimError::Parameter(_)));
    }
}
