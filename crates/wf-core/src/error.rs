use thiserror::Error;

pub type ParamResult<T> = Result<T, ParameterError>;

/// Invalid or inconsistent input, detected before any numeric work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Missing parameter: {what}")]
    Missing { what: &'static str },

    #[error("Inconsistent parameters: {what}")]
    Inconsistent { what: String },
}
