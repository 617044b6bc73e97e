//! Drawdown superposition for pumping wells.
//!
//! Provides:
//! - `StepResponseEvaluator`: unit-rate step response of one model
//! - `EvaluationPlan`: deduplicated step responses and per-point weights
//! - `SuperpositionEngine`: parallel evaluation and per-point reduction
//! - NaN-or-raise failure policy

pub mod config;
pub mod error;
pub mod plan;
pub mod step;
pub mod superposition;

// Re-exports for public API
pub use config::{EngineOptions, FailurePolicy};
pub use error::{SimError, SimResult};
pub use plan::{EvaluationPlan, ObservationPoint, Source, Task, Term};
pub use step::StepResponseEvaluator;
pub use superposition::{PointFailure, Superposed, SuperpositionEngine};
