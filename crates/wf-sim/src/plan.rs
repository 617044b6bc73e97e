//! Evaluation plan: the explicit index set behind a superposition run.
//!
//! Every observed drawdown is a weighted sum of unit step responses
//! ```text
//! s(x, t) = Σ_sources Σ_changes sign · ΔQ · U(|x - x_w|, t - t_change)
//! ```
//! The plan enumerates the distinct `(well, r, t - t_change)` responses once
//! (tasks) and records, per observation point, which tasks it sums and with
//! what weight (terms). Terms with `t - t_change <= 0` are dropped.

use std::collections::HashMap;
use tracing::debug;
use wf_core::{Position, PumpingSchedule, WellConfiguration, WellId};

/// Observation location and time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationPoint {
    pub position: Position,
    pub time: f64,
}

impl ObservationPoint {
    pub fn new(x: f64, y: f64, time: f64) -> Self {
        Self {
            position: Position::new(x, y),
            time,
        }
    }

    /// Point at distance `r` east of the origin.
    pub fn radial(r: f64, time: f64) -> Self {
        Self::new(r, 0.0, time)
    }
}

/// A pumping well as seen by the engine: a real well or one of its images.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    /// Real well this source derives from; images share their well's id.
    pub origin: WellId,
    pub well: WellConfiguration,
    /// `(time, rate increment)` pairs, already multiplied by the sign.
    pub rate_changes: Vec<(f64, f64)>,
}

impl Source {
    pub fn real(origin: WellId, well: WellConfiguration, schedule: &PumpingSchedule) -> Self {
        Self::image(origin, well, schedule, 1.0)
    }

    /// `well` relocated to the image position, `sign` = ±1.
    pub fn image(origin: WellId, well: WellConfiguration, schedule: &PumpingSchedule, sign: f64) -> Self {
        Self {
            origin,
            well,
            rate_changes: schedule
                .rate_changes()
                .into_iter()
                .map(|(time, delta)| (time, sign * delta))
                .collect(),
        }
    }
}

/// One distinct unit step response to compute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Task {
    pub origin: WellId,
    pub well: WellConfiguration,
    pub r: f64,
    pub elapsed: f64,
}

/// Contribution of one task to one observation point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub task: usize,
    pub weight: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EvaluationPlan {
    points: Vec<ObservationPoint>,
    tasks: Vec<Task>,
    terms: Vec<Vec<Term>>,
}

type TaskKey = (WellId, u64, u64);

impl EvaluationPlan {
    pub fn build(sources: &[Source], points: &[ObservationPoint]) -> Self {
        let mut index: HashMap<TaskKey, usize> = HashMap::new();
        let mut tasks = Vec::new();
        let mut terms = Vec::with_capacity(points.len());

        for point in points {
            let mut point_terms = Vec::new();
            for source in sources {
                let r = source.well.position().distance_to(&point.position);
                for &(start, delta) in &source.rate_changes {
                    let elapsed = point.time - start;
                    if elapsed <= 0.0 {
                        continue;
                    }
                    let key = (source.origin, r.to_bits(), elapsed.to_bits());
                    let task = *index.entry(key).or_insert_with(|| {
                        tasks.push(Task {
                            origin: source.origin,
                            well: source.well,
                            r,
                            elapsed,
                        });
                        tasks.len() - 1
                    });
                    point_terms.push(Term { task, weight: delta });
                }
            }
            terms.push(point_terms);
        }

        let term_count: usize = terms.iter().map(Vec::len).sum();
        debug!(
            sources = sources.len(),
            points = points.len(),
            terms = term_count,
            tasks = tasks.len(),
            "evaluation plan built"
        );
        Self {
            points: points.to_vec(),
            tasks,
            terms,
        }
    }

    pub fn points(&self) -> &[ObservationPoint] {
        &self.points
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Terms summed into observation point `point`.
    pub fn terms(&self, point: usize) -> &[Term] {
        &self.terms[point]
    }

    pub fn term_count(&self) -> usize {
        self.terms.iter().map(Vec::len).sum()
    }
}
