//! Error types for model validation and kernel evaluation.

use thiserror::Error;
use wf_core::ParameterError;
use wf_solver::SolverError;

/// Errors that can occur while validating or evaluating a drawdown model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Kernel evaluation failed: {what}")]
    KernelEvaluation { what: String },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Unknown model: {id}")]
    UnknownModel { id: String },

    #[error("Model id already registered: {id}")]
    DuplicateModel { id: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for SolverError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Parameter(p) => SolverError::InvalidInput {
                what: p.to_string(),
            },
            ModelError::KernelEvaluation { what } => SolverError::KernelEvaluation { what },
            ModelError::Solver(s) => s,
            ModelError::UnknownModel { id } => SolverError::InvalidInput {
                what: format!("unknown model {id}"),
            },
            ModelError::DuplicateModel { id } => SolverError::InvalidInput {
                what: format!("duplicate model {id}"),
            },
        }
    }
}
