//! wf-core: stable foundation for wellflow.
//!
//! Contains:
//! - aquifer, well and schedule (immutable, validated input data model)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact ids for wells and observation points)
//! - special (complex modified Bessel functions, exponential integral)
//! - timing (wall-clock timer for per-call summaries)
//! - error (shared parameter error type)

pub mod aquifer;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod schedule;
pub mod special;
pub mod timing;
pub mod well;

// Re-exports: nice ergonomics for downstream crates
pub use aquifer::{
    AquiferParameters, Boundary, BoundaryAxis, BoundaryKind, DualPorosity, LogNormalField, RadialZone,
    WellTransmissivity,
};
pub use error::{ParamResult, ParameterError};
pub use ids::*;
pub use numeric::*;
pub use schedule::{Breakpoint, PumpingSchedule};
pub use well::{Position, WellConfiguration};
