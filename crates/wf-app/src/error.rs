//! Error types for the wf-app driver layer.

use wf_core::ParameterError;
use wf_models::ModelError;
use wf_sim::SimError;

/// Driver error: one variant per failure class a caller can act on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Kernel evaluation failed: {0}")]
    KernelEvaluation(String),

    #[error("Convergence failed: {0}")]
    ConvergenceFailed(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for wf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        match err {
            SimError::Parameter(p) => AppError::Parameter(p),
            SimError::KernelEvaluation { what } => AppError::KernelEvaluation(what),
            SimError::ConvergenceFailed { what } => AppError::ConvergenceFailed(what),
            SimError::InvalidArg { what } => AppError::InvalidConfig(what),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownModel { id } => AppError::UnknownModel(id),
            other => SimError::from(other).into(),
        }
    }
}
