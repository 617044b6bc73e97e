//! Top-level entry point: resolve a model, validate, plan and superpose.

use crate::error::AppResult;
use crate::request::EvaluationConfig;
use crate::result::{DrawdownResult, FailedPoint};
use tracing::info;
use wf_core::timing::Timer;
use wf_core::{
    AquiferParameters, ParameterError, PumpingSchedule, WellConfiguration, WellId, ensure_positive,
};
use wf_models::{ModelInfo, Solution, SolutionCatalog};
use wf_sim::{EvaluationPlan, ObservationPoint, Source, StepResponseEvaluator, SuperpositionEngine};

/// Holds the model catalog; one driver serves any number of calls.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    catalog: SolutionCatalog,
}

impl Driver {
    /// Driver over the standard catalog.
    pub fn new() -> Self {
        Self::with_catalog(SolutionCatalog::standard())
    }

    pub fn with_catalog(catalog: SolutionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SolutionCatalog {
        &self.catalog
    }

    /// Registered models with their required parameters.
    pub fn list_models(&self) -> Vec<ModelInfo> {
        self.catalog.list()
    }

    /// Drawdown at every observation point.
    ///
    /// `schedules[i]` drives `wells[i]`. Input problems fail the whole call
    /// before any numeric work; numeric failures follow
    /// `config.failure_policy`.
    #[tracing::instrument(skip_all, fields(model = model_id, wells = wells.len(), points = points.len()))]
    pub fn evaluate(
        &self,
        model_id: &str,
        aquifer: &AquiferParameters,
        wells: &[WellConfiguration],
        schedules: &[PumpingSchedule],
        points: &[ObservationPoint],
        config: &EvaluationConfig,
    ) -> AppResult<DrawdownResult> {
        let timer = Timer::start("evaluate");
        let solution = self.catalog.get(model_id)?;
        validate_request(solution.as_ref(), aquifer, wells, schedules, points)?;

        let mut sources = Vec::with_capacity(wells.len());
        for (i, (well, schedule)) in wells.iter().zip(schedules).enumerate() {
            let id = WellId::from_index(i as u32);
            sources.push(Source::real(id, *well, schedule));
            for image in solution.image_wells(aquifer, well) {
                sources.push(Source::image(id, well.relocated(image.position), schedule, image.sign));
            }
        }

        let options = config.resolve(solution.defaults());
        let evaluator = StepResponseEvaluator::new(solution.as_ref(), aquifer, &options)?;
        let engine = SuperpositionEngine::new(evaluator, &options);
        let plan = EvaluationPlan::build(&sources, points);
        let superposed = engine.run(&plan)?;

        let result = DrawdownResult {
            model: solution.id().to_string(),
            points: points.to_vec(),
            drawdown: superposed.values,
            failures: superposed.failures.into_iter().map(FailedPoint::from).collect(),
            step_responses: superposed.responses,
        };
        info!(
            model = solution.id(),
            sources = sources.len(),
            points = result.len(),
            step_responses = result.step_responses,
            failures = result.failures.len(),
            elapsed_s = timer.stop(),
            "drawdown evaluated"
        );
        Ok(result)
    }
}

fn validate_request(
    solution: &dyn Solution,
    aquifer: &AquiferParameters,
    wells: &[WellConfiguration],
    schedules: &[PumpingSchedule],
    points: &[ObservationPoint],
) -> AppResult<()> {
    if wells.is_empty() {
        return Err(ParameterError::Missing {
            what: "pumping well",
        }
        .into());
    }
    if schedules.len() != wells.len() {
        return Err(ParameterError::Inconsistent {
            what: format!("{} wells but {} pumping schedules", wells.len(), schedules.len()),
        }
        .into());
    }
    solution.validate(aquifer, wells)?;

    for point in points {
        ensure_positive(point.time, "observation time")?;
        for well in wells {
            solution.validate_point(aquifer, well, &point.position)?;
        }
    }
    Ok(())
}
