//! Temporal and spatial superposition of unit step responses.

use crate::config::{EngineOptions, FailurePolicy};
use crate::error::{SimError, SimResult};
use crate::plan::EvaluationPlan;
use crate::step::StepResponseEvaluator;
use rayon::prelude::*;
use tracing::{debug, warn};
use wf_core::PointId;

/// Observation point that could not be evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct PointFailure {
    pub point: PointId,
    pub error: SimError,
}

/// Drawdown per observation point, in plan order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Superposed {
    /// NaN where the point failed.
    pub values: Vec<f64>,
    pub failures: Vec<PointFailure>,
    /// Distinct step responses computed.
    pub responses: usize,
}

pub struct SuperpositionEngine<'a> {
    evaluator: StepResponseEvaluator<'a>,
    failure_policy: FailurePolicy,
    parallel: bool,
}

impl<'a> SuperpositionEngine<'a> {
    pub fn new(evaluator: StepResponseEvaluator<'a>, options: &EngineOptions) -> Self {
        Self {
            evaluator,
            failure_policy: options.failure_policy,
            parallel: options.parallel,
        }
    }

    pub fn evaluator(&self) -> &StepResponseEvaluator<'a> {
        &self.evaluator
    }

    /// Evaluate every task of `plan` once and sum the terms per point.
    ///
    /// Parameter errors always abort. Numeric failures abort under
    /// `FailurePolicy::Raise` (first failing point in plan order) and turn the
    /// point into NaN under `FailurePolicy::Nan`.
    pub fn run(&self, plan: &EvaluationPlan) -> SimResult<Superposed> {
        let eval = &self.evaluator;
        let responses: Vec<SimResult<f64>> = if self.parallel {
            plan.tasks()
                .par_iter()
                .map(|task| eval.unit_response(&task.well, task.r, task.elapsed))
                .collect()
        } else {
            plan.tasks()
                .iter()
                .map(|task| eval.unit_response(&task.well, task.r, task.elapsed))
                .collect()
        };

        let mut values = Vec::with_capacity(plan.points().len());
        let mut failures = Vec::new();
        for point in 0..plan.points().len() {
            match sum_terms(plan, point, &responses) {
                Ok(value) => values.push(value),
                Err(error) if error.is_point_failure() && self.failure_policy == FailurePolicy::Nan => {
                    let observed = plan.points()[point];
                    warn!(
                        point,
                        x = observed.position.x,
                        y = observed.position.y,
                        t = observed.time,
                        %error,
                        "drawdown resolved to NaN"
                    );
                    values.push(f64::NAN);
                    failures.push(PointFailure {
                        point: PointId::from_index(point as u32),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        debug!(
            points = values.len(),
            responses = responses.len(),
            failures = failures.len(),
            "superposition finished"
        );
        Ok(Superposed {
            values,
            failures,
            responses: responses.len(),
        })
    }
}

/// Weighted sum in term order; the first failed task fails the point.
fn sum_terms(plan: &EvaluationPlan, point: usize, responses: &[SimResult<f64>]) -> SimResult<f64> {
    plan.terms(point).iter().try_fold(0.0, |acc, term| {
        let response = responses[term.task].as_ref().map_err(Clone::clone)?;
        Ok(acc + term.weight * response)
    })
}
