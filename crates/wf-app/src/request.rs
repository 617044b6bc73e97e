//! Request-side types: observation grids and evaluation settings.

use crate::error::{AppError, AppResult};
use wf_core::{ParamResult, ensure_positive};
use wf_models::NumericDefaults;
use wf_sim::{EngineOptions, FailurePolicy, ObservationPoint};
use wf_solver::{InversionConfig, QuadratureConfig};

/// Caller-side numeric settings. Unset configs fall back to the model's
/// own defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationConfig {
    pub inversion: Option<InversionConfig>,
    pub quadrature: Option<QuadratureConfig>,
    pub failure_policy: FailurePolicy,
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            inversion: None,
            quadrature: None,
            failure_policy: FailurePolicy::Nan,
            parallel: true,
        }
    }
}

impl EvaluationConfig {
    pub fn raising() -> Self {
        Self {
            failure_policy: FailurePolicy::Raise,
            ..Self::default()
        }
    }

    /// Engine options after applying overrides to `defaults`.
    pub fn resolve(&self, defaults: NumericDefaults) -> EngineOptions {
        let mut options = EngineOptions::from_defaults(defaults);
        if let Some(inversion) = &self.inversion {
            options.inversion = inversion.clone();
        }
        if let Some(quadrature) = &self.quadrature {
            options.quadrature = quadrature.clone();
        }
        options.failure_policy = self.failure_policy;
        options.parallel = self.parallel;
        options
    }
}

/// Radius × time cross product around a well at the origin.
///
/// Points are laid out radius-major: all times of the first radius, then
/// all times of the second, and so on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationGrid {
    radii: Vec<f64>,
    times: Vec<f64>,
}

impl ObservationGrid {
    pub fn new(radii: Vec<f64>, times: Vec<f64>) -> ParamResult<Self> {
        for &r in &radii {
            ensure_positive(r, "grid radius")?;
        }
        for &t in &times {
            ensure_positive(t, "grid time")?;
        }
        Ok(Self { radii, times })
    }

    /// `count` logarithmically spaced times from `first` to `last`.
    pub fn log_times(first: f64, last: f64, count: usize) -> ParamResult<Vec<f64>> {
        ensure_positive(first, "first time")?;
        ensure_positive(last, "last time")?;
        Ok(match count {
            0 => Vec::new(),
            1 => vec![first],
            _ => {
                let step = (last / first).ln() / (count - 1) as f64;
                (0..count).map(|i| first * (step * i as f64).exp()).collect()
            }
        })
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.radii.len() * self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Vec<ObservationPoint> {
        self.radii
            .iter()
            .flat_map(|&r| self.times.iter().map(move |&t| ObservationPoint::radial(r, t)))
            .collect()
    }

    /// Split a flat, radius-major value list into one row per radius.
    pub fn reshape(&self, values: &[f64]) -> AppResult<Vec<Vec<f64>>> {
        if values.len() != self.len() {
            return Err(AppError::InvalidConfig(format!(
                "grid of {} points cannot hold {} values",
                self.len(),
                values.len()
            )));
        }
        if self.times.is_empty() {
            return Ok(vec![Vec::new(); self.radii.len()]);
        }
        Ok(values.chunks(self.times.len()).map(<[f64]>::to_vec).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_layout_is_radius_major() {
        let grid = ObservationGrid::new(vec![1.0, 2.0], vec![10.0, 20.0, 30.0]).unwrap();
        let points = grid.points();
        assert_eq!(points.len(), 6);
        assert_eq!(points[1], ObservationPoint::radial(1.0, 20.0));
        assert_eq!(points[3], ObservationPoint::radial(2.0, 10.0));

        let rows = grid.reshape(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(rows, vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]);
        assert!(grid.reshape(&[1.0]).is_err());
    }

    #[test]
    fn grid_rejects_non_positive_entries() {
        assert!(ObservationGrid::new(vec![0.0], vec![1.0]).is_err());
        assert!(ObservationGrid::new(vec![1.0], vec![-1.0]).is_err());
    }

    #[test]
    fn log_times_span_the_range() {
        let times = ObservationGrid::log_times(1e-2, 1e4, 7).unwrap();
        assert_eq!(times.len(), 7);
        assert!((times[0] - 1e-2).abs() < 1e-15);
        assert!((times[6] - 1e4).abs() < 1e-8);
        assert!((times[3] - 10.0).abs() < 1e-10);
    }

    #[test]
    fn overrides_replace_model_defaults() {
        let defaults = NumericDefaults {
            inversion: InversionConfig {
                max_order: 32,
                ..InversionConfig::default()
            },
            ..NumericDefaults::default()
        };
        let kept = EvaluationConfig::default().resolve(defaults.clone());
        assert_eq!(kept.inversion.max_order, 32);
        assert_eq!(kept.failure_policy, FailurePolicy::Nan);

        let config = EvaluationConfig {
            inversion: Some(InversionConfig::default()),
            parallel: false,
            ..EvaluationConfig::raising()
        };
        let options = config.resolve(defaults);
        assert_eq!(options.inversion, InversionConfig::default());
        assert_eq!(options.failure_policy, FailurePolicy::Raise);
        assert!(!options.parallel);
    }
}
