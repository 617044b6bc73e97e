//! Error types for numeric solver operations.

use thiserror::Error;

/// Errors raised by the inverter, the quadrature and the linear solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Kernel evaluation failed: {what}")]
    KernelEvaluation { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// True for failures that are local to one evaluation point.
    pub fn is_numeric_failure(&self) -> bool {
        matches!(
            self,
            SolverError::KernelEvaluation { .. }
                | SolverError::ConvergenceFailed { .. }
                | SolverError::Numeric { .. }
        )
    }
}
