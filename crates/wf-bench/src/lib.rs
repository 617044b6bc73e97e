//! Benchmark framework for wellflow drawdown evaluations.
//!
//! Each scenario runs through the public `Driver` several times. Wall time and
//! step-response counts are recorded per run; scenarios with a closed form
//! also report the worst relative error against it.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;
use wf_app::{
    AppError, AquiferParameters, Boundary, BoundaryAxis, BoundaryKind, Driver, DualPorosity,
    EvaluationConfig, ObservationGrid, ObservationPoint, ParameterError, PumpingSchedule,
    RadialZone, WellConfiguration,
};
use wf_core::special::theis_well_function;
use wf_core::timing::Timer;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("scenario setup: {0}")]
    Setup(#[from] ParameterError),
    #[error("evaluation: {0}")]
    Evaluation(#[from] AppError),
}

pub type BenchResult<T> = Result<T, BenchError>;

/// A benchmark scenario definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkScenario {
    /// Unique identifier for this benchmark.
    pub id: String,
    pub name: String,
    /// Catalog id or alias passed to the driver.
    pub model: String,
    pub setup: AquiferSetup,
    /// `(start time, rate)` pairs for the single well at the origin.
    pub schedule: Vec<(f64, f64)>,
    pub radii: Vec<f64>,
    /// Log-spaced observation times: first, last, count.
    pub times: (f64, f64, usize),
    pub notes: Option<String>,
}

/// Aquifer layout for a scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum AquiferSetup {
    Confined,
    Leaky { leakage: f64 },
    DualPorosity { matrix_storativity: f64, exchange_coefficient: f64 },
    /// No-flow barrier along `x = offset`.
    Barrier { offset: f64 },
    /// Transmissivity changes at `zone_radius`; constant head at `outer_radius`.
    Composite { zone_radius: f64, zone_transmissivity: f64, outer_radius: f64 },
    WellboreStorage { well_radius: f64, storage: f64, skin: f64 },
}

const TRANSMISSIVITY: f64 = 100.0;
const STORATIVITY: f64 = 1e-4;

impl AquiferSetup {
    fn aquifer(&self) -> BenchResult<AquiferParameters> {
        let base = AquiferParameters::new(TRANSMISSIVITY, STORATIVITY)?;
        let aquifer = match *self {
            AquiferSetup::Confined | AquiferSetup::WellboreStorage { .. } => base,
            AquiferSetup::Leaky { leakage } => base.with_leakage(leakage)?,
            AquiferSetup::DualPorosity {
                matrix_storativity,
                exchange_coefficient,
            } => base.with_dual_porosity(DualPorosity {
                matrix_storativity,
                exchange_coefficient,
            })?,
            AquiferSetup::Barrier { offset } => {
                base.with_boundary(Boundary::new(BoundaryAxis::X, offset, BoundaryKind::NoFlow)?)?
            }
            AquiferSetup::Composite {
                zone_radius,
                zone_transmissivity,
                outer_radius,
            } => base
                .with_zones(vec![RadialZone {
                    inner_radius: zone_radius,
                    transmissivity: zone_transmissivity,
                    storativity: STORATIVITY,
                }])?
                .with_outer_radius(outer_radius)?,
        };
        Ok(aquifer)
    }

    fn well(&self) -> BenchResult<WellConfiguration> {
        let well = WellConfiguration::new();
        Ok(match *self {
            AquiferSetup::WellboreStorage {
                well_radius,
                storage,
                skin,
            } => well
                .with_radius(well_radius)?
                .with_wellbore_storage(storage)?
                .with_skin(skin)?,
            AquiferSetup::Composite { .. } => well.with_radius(0.1)?,
            _ => well,
        })
    }

    /// Distances to every line source the closed form needs, with their signs.
    fn closed_form_sources(&self, r: f64) -> Option<Vec<(f64, f64)>> {
        match *self {
            AquiferSetup::Confined => Some(vec![(r, 1.0)]),
            AquiferSetup::Barrier { offset } => {
                Some(vec![(r, 1.0), ((2.0 * offset - r).abs(), 1.0)])
            }
            _ => None,
        }
    }
}

/// A single run's measurements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub total_time_s: f64,
    pub points: usize,
    pub step_responses: usize,
    pub failed_points: usize,
}

/// Aggregate metrics across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_time_median_s: f64,
    pub total_time_min_s: f64,
    pub total_time_max_s: f64,
    /// Median cost per observation point.
    pub time_per_point_median_s: f64,
    pub step_responses: usize,
    pub failed_points: usize,
    /// Worst relative error against the closed form, when one exists.
    pub max_relative_error: Option<f64>,
}

/// Result of running a benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub scenario: BenchmarkScenario,
    pub runs: Vec<RunMetrics>,
    pub aggregate: AggregateMetrics,
}

/// Full benchmark suite results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Run a single benchmark scenario `times` times.
pub fn run_scenario(
    driver: &Driver,
    scenario: &BenchmarkScenario,
    times: usize,
) -> BenchResult<BenchmarkResult> {
    let aquifer = scenario.setup.aquifer()?;
    let well = scenario.setup.well()?;
    let schedule = PumpingSchedule::new(scenario.schedule.clone())?;
    let (first, last, count) = scenario.times;
    let grid = ObservationGrid::new(
        scenario.radii.clone(),
        ObservationGrid::log_times(first, last, count)?,
    )?;
    let points = grid.points();
    let config = EvaluationConfig::default();

    let mut runs = Vec::with_capacity(times);
    let mut max_relative_error = None;
    for _ in 0..times {
        let timer = Timer::start("scenario");
        let result = driver.evaluate(
            &scenario.model,
            &aquifer,
            std::slice::from_ref(&well),
            std::slice::from_ref(&schedule),
            &points,
            &config,
        )?;
        runs.push(RunMetrics {
            total_time_s: timer.stop(),
            points: result.len(),
            step_responses: result.step_responses,
            failed_points: result.failures.len(),
        });
        if max_relative_error.is_none() {
            max_relative_error =
                closed_form_error(&scenario.setup, &schedule, &aquifer, &points, &result.drawdown);
        }
    }

    let mut aggregate = compute_aggregates(&runs);
    aggregate.max_relative_error = max_relative_error;
    tracing::debug!(
        scenario = %scenario.id,
        median_s = aggregate.total_time_median_s,
        "scenario complete"
    );

    Ok(BenchmarkResult {
        scenario: scenario.clone(),
        runs,
        aggregate,
    })
}

fn compute_aggregates(runs: &[RunMetrics]) -> AggregateMetrics {
    if runs.is_empty() {
        return AggregateMetrics::default();
    }

    let mut total_times: Vec<_> = runs.iter().map(|r| r.total_time_s).collect();
    total_times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let total_time_median = total_times[total_times.len() / 2];

    let mut per_point: Vec<_> = runs
        .iter()
        .filter(|r| r.points > 0)
        .map(|r| r.total_time_s / r.points as f64)
        .collect();
    per_point.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    AggregateMetrics {
        total_time_median_s: total_time_median,
        total_time_min_s: total_times[0],
        total_time_max_s: total_times[total_times.len() - 1],
        time_per_point_median_s: per_point.get(per_point.len() / 2).copied().unwrap_or(0.0),
        step_responses: runs[0].step_responses,
        failed_points: runs.iter().map(|r| r.failed_points).max().unwrap_or(0),
        max_relative_error: None,
    }
}

/// Superposed Theis drawdown from the well and its images.
fn closed_form(
    setup: &AquiferSetup,
    schedule: &PumpingSchedule,
    aquifer: &AquiferParameters,
    point: &ObservationPoint,
) -> Option<f64> {
    let r = point.position.x.hypot(point.position.y);
    let sources = setup.closed_form_sources(r)?;
    let t_coef = 4.0 * aquifer.transmissivity();
    let mut s = 0.0;
    for (start, delta) in schedule.rate_changes() {
        let elapsed = point.time - start;
        if elapsed <= 0.0 {
            continue;
        }
        for &(distance, sign) in &sources {
            let u = distance * distance * aquifer.storativity() / (t_coef * elapsed);
            s += sign * delta * theis_well_function(u) / (4.0 * PI * aquifer.transmissivity());
        }
    }
    Some(s)
}

fn closed_form_error(
    setup: &AquiferSetup,
    schedule: &PumpingSchedule,
    aquifer: &AquiferParameters,
    points: &[ObservationPoint],
    drawdown: &[f64],
) -> Option<f64> {
    let mut worst: f64 = 0.0;
    for (point, &value) in points.iter().zip(drawdown) {
        let exact = closed_form(setup, schedule, aquifer, point)?;
        if exact.abs() > 1e-12 {
            worst = worst.max(((value - exact) / exact).abs());
        }
    }
    Some(worst)
}

/// Default set of benchmark scenarios.
pub fn default_benchmarks() -> Vec<BenchmarkScenario> {
    let radii = vec![1.0, 10.0, 100.0, 300.0];
    vec![
        BenchmarkScenario {
            id: "01_theis".to_string(),
            name: "Confined Constant Rate".to_string(),
            model: "theis".to_string(),
            setup: AquiferSetup::Confined,
            schedule: vec![(0.0, 50.0)],
            radii: radii.clone(),
            times: (1.0, 1e5, 40),
            notes: Some("Laplace inversion against the exponential integral".to_string()),
        },
        BenchmarkScenario {
            id: "02_stepped".to_string(),
            name: "Confined Step Test".to_string(),
            model: "theis".to_string(),
            setup: AquiferSetup::Confined,
            schedule: vec![(0.0, 20.0), (3600.0, 40.0), (7200.0, 60.0), (10800.0, 0.0)],
            radii: radii.clone(),
            times: (60.0, 2e4, 40),
            notes: Some("Temporal superposition with recovery".to_string()),
        },
        BenchmarkScenario {
            id: "03_barrier".to_string(),
            name: "No-Flow Barrier".to_string(),
            model: "bounded".to_string(),
            setup: AquiferSetup::Barrier { offset: 500.0 },
            schedule: vec![(0.0, 50.0)],
            radii: radii.clone(),
            times: (1.0, 1e5, 40),
            notes: Some("One image well".to_string()),
        },
        BenchmarkScenario {
            id: "04_leaky_laplace".to_string(),
            name: "Leaky Aquifer (Laplace)".to_string(),
            model: "hantush".to_string(),
            setup: AquiferSetup::Leaky { leakage: 1e-6 },
            schedule: vec![(0.0, 50.0)],
            radii: radii.clone(),
            times: (1.0, 1e5, 40),
            notes: None,
        },
        BenchmarkScenario {
            id: "05_leaky_integral".to_string(),
            name: "Leaky Aquifer (radial quadrature)".to_string(),
            model: "hantush_integral".to_string(),
            setup: AquiferSetup::Leaky { leakage: 1e-6 },
            schedule: vec![(0.0, 50.0)],
            radii: radii.clone(),
            times: (1.0, 1e5, 40),
            notes: Some("Same physics as 04 through the quadrature path".to_string()),
        },
        BenchmarkScenario {
            id: "06_double_porosity".to_string(),
            name: "Fractured Aquifer".to_string(),
            model: "double_porosity".to_string(),
            setup: AquiferSetup::DualPorosity {
                matrix_storativity: 1e-3,
                exchange_coefficient: 1e-4,
            },
            schedule: vec![(0.0, 50.0)],
            radii: radii.clone(),
            times: (1.0, 1e6, 40),
            notes: None,
        },
        BenchmarkScenario {
            id: "07_composite".to_string(),
            name: "Two-Zone Aquifer With Constant-Head Circle".to_string(),
            model: "zoned".to_string(),
            setup: AquiferSetup::Composite {
                zone_radius: 5.0,
                zone_transmissivity: 20.0,
                outer_radius: 2000.0,
            },
            schedule: vec![(0.0, 50.0)],
            radii: radii.clone(),
            times: (1.0, 1e6, 40),
            notes: Some("Complex linear solve per Laplace sample".to_string()),
        },
        BenchmarkScenario {
            id: "08_wellbore_storage".to_string(),
            name: "Large-Diameter Well".to_string(),
            model: "wellbore_storage".to_string(),
            setup: AquiferSetup::WellboreStorage {
                well_radius: 0.5,
                storage: PI * 0.25,
                skin: 2.0,
            },
            schedule: vec![(0.0, 50.0)],
            radii,
            times: (1.0, 1e5, 40),
            notes: None,
        },
    ]
}
