//! Driver API for wellflow.
//!
//! Resolves a model from the catalog, validates the request before any
//! numeric work, builds the superposition plan (wells, image wells, rate
//! changes, observation points) and returns a self-contained
//! `DrawdownResult`.

pub mod driver;
pub mod error;
pub mod request;
pub mod result;

// Re-export key types for convenience
pub use driver::Driver;
pub use error::{AppError, AppResult};
pub use request::{EvaluationConfig, ObservationGrid};
pub use result::{DrawdownResult, FailedPoint, FailureKind};
pub use wf_core::{
    AquiferParameters, Boundary, BoundaryAxis, BoundaryKind, DualPorosity, LogNormalField,
    ParameterError, Position, PumpingSchedule, RadialZone, WellConfiguration, WellTransmissivity,
};
pub use wf_models::ModelInfo;
pub use wf_sim::{FailurePolicy, ObservationPoint};
