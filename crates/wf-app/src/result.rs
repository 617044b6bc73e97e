//! Drawdown results returned by the driver.

use crate::error::{AppError, AppResult};
use crate::request::ObservationGrid;
use wf_sim::{ObservationPoint, PointFailure, SimError};

/// Failure class of a NaN point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    KernelEvaluation,
    Convergence,
}

/// Why one observation point holds NaN.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedPoint {
    pub index: usize,
    pub kind: FailureKind,
    pub message: String,
}

impl From<PointFailure> for FailedPoint {
    fn from(failure: PointFailure) -> Self {
        let kind = match failure.error {
            SimError::ConvergenceFailed { .. } => FailureKind::Convergence,
            _ => FailureKind::KernelEvaluation,
        };
        Self {
            index: failure.point.slot(),
            kind,
            message: failure.error.to_string(),
        }
    }
}

/// Drawdown per observation point, in request order. Owns no reference to
/// the inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawdownResult {
    pub model: String,
    pub points: Vec<ObservationPoint>,
    /// NaN where the point failed; see `failures`.
    pub drawdown: Vec<f64>,
    pub failures: Vec<FailedPoint>,
    /// Distinct unit step responses computed for this result.
    pub step_responses: usize,
}

impl DrawdownResult {
    pub fn len(&self) -> usize {
        self.drawdown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawdown.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.drawdown.get(index).copied()
    }

    /// True when no point failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObservationPoint, f64)> + '_ {
        self.points.iter().zip(self.drawdown.iter().copied())
    }

    /// Reshape to one row per radius for a request built from `grid`.
    pub fn to_grid(&self, grid: &ObservationGrid) -> AppResult<Vec<Vec<f64>>> {
        if grid.points() != self.points {
            return Err(AppError::InvalidConfig(
                "result was not evaluated on this grid".to_string(),
            ));
        }
        grid.reshape(&self.drawdown)
    }
}
