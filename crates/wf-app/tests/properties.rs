//! End-to-end behaviour of the driver.

use proptest::prelude::*;
use wf_app::{
    AppError, AquiferParameters, Boundary, BoundaryAxis, BoundaryKind, Driver, DualPorosity,
    EvaluationConfig, FailureKind, LogNormalField, ObservationGrid, ObservationPoint,
    ParameterError, PumpingSchedule, WellConfiguration,
};
use wf_core::special::exp1;
use wf_solver::QuadratureConfig;

fn confined() -> AquiferParameters {
    AquiferParameters::new(100.0, 1e-4).unwrap()
}

fn pump(rate: f64) -> Vec<PumpingSchedule> {
    vec![PumpingSchedule::constant(rate).unwrap()]
}

fn line_source() -> Vec<WellConfiguration> {
    vec![WellConfiguration::new()]
}

fn theis(rate: f64, r: f64, t: f64) -> f64 {
    rate / (4.0 * std::f64::consts::PI * 100.0) * exp1(r * r * 1e-4 / (400.0 * t))
}

#[test]
fn confined_reference_value() {
    let driver = Driver::new();
    let result = driver
        .evaluate(
            "theis",
            &confined(),
            &line_source(),
            &pump(1000.0),
            &[ObservationPoint::radial(10.0, 1000.0)],
            &EvaluationConfig::default(),
        )
        .unwrap();
    let s = result.get(0).unwrap();
    let reference = 13.470_217_369_551_841;
    assert!((s - reference).abs() <= 1e-6 * reference, "{s}");
    assert!(result.is_complete());
    assert_eq!(result.model, "theis");
}

/// Carries every optional block so each catalog model accepts it.
fn full_aquifer(transmissivity: f64, storativity: f64) -> AquiferParameters {
    AquiferParameters::new(transmissivity, storativity)
        .unwrap()
        .with_leakage(1e-6 * transmissivity / 100.0)
        .unwrap()
        .with_dual_porosity(DualPorosity {
            matrix_storativity: 10.0 * storativity,
            exchange_coefficient: 1e-7,
        })
        .unwrap()
        .with_boundary(Boundary::new(BoundaryAxis::X, 5000.0, BoundaryKind::NoFlow).unwrap())
        .unwrap()
        .with_field(LogNormalField::new(1.0, 10.0))
        .unwrap()
}

#[test]
fn every_model_is_causal() {
    // rates switch on at t = 100; every point observes before that
    let driver = Driver::new();
    let aquifer = full_aquifer(100.0, 1e-4);
    let wells = vec![WellConfiguration::new().with_radius(0.1).unwrap()];
    let schedules = vec![PumpingSchedule::new(vec![(100.0, 50.0)]).unwrap()];
    let points: Vec<_> = [1.0, 50.0, 100.0]
        .iter()
        .map(|&t| ObservationPoint::radial(20.0, t))
        .collect();

    for info in driver.list_models() {
        let result = driver
            .evaluate(info.id, &aquifer, &wells, &schedules, &points, &EvaluationConfig::raising())
            .unwrap();
        assert!(result.drawdown.iter().all(|&s| s == 0.0), "{}: {:?}", info.id, result.drawdown);
        assert_eq!(result.step_responses, 0);
    }
}

#[test]
fn every_model_handles_early_log_time_grid() {
    // u = r²S/(4Tt) runs from 25000 down to 0.025
    let driver = Driver::new();
    let aquifer = full_aquifer(1.0, 1e-3);
    let wells = vec![WellConfiguration::new()
        .with_radius(0.1)
        .and_then(|w| w.with_casing_radius(0.1))
        .unwrap()];
    let times = [0.01, 0.1, 0.3, 1.0, 3.0, 10.0, 100.0, 1e3, 1e4];
    let points: Vec<_> = times.iter().map(|&t| ObservationPoint::radial(1000.0, t)).collect();

    for info in driver.list_models() {
        let result = driver
            .evaluate(info.id, &aquifer, &wells, &pump(1.0), &points, &EvaluationConfig::default())
            .unwrap();
        let s = &result.drawdown;
        assert!(result.is_complete(), "{}: {:?}", info.id, result.failures);
        assert!(s.iter().all(|v| v.is_finite() && *v >= -1e-10), "{}: {s:?}", info.id);
        assert!(s.windows(2).all(|w| w[1] >= w[0] - 1e-10), "{}: {s:?}", info.id);
        assert!(s[0].abs() <= 1e-10, "{}: {s:?}", info.id);
        assert!(s[times.len() - 1] > 1e-3, "{}: {s:?}", info.id);
    }
}

#[test]
fn single_rate_is_linear_in_rate() {
    let driver = Driver::new();
    let points = [ObservationPoint::radial(25.0, 600.0)];
    let unit = driver
        .evaluate("theis", &confined(), &line_source(), &pump(1.0), &points, &EvaluationConfig::default())
        .unwrap();
    let scaled = driver
        .evaluate("theis", &confined(), &line_source(), &pump(750.0), &points, &EvaluationConfig::default())
        .unwrap();
    assert!((scaled.drawdown[0] - 750.0 * unit.drawdown[0]).abs() <= 1e-12 * scaled.drawdown[0]);
}

#[test]
fn two_wells_superpose() {
    let driver = Driver::new();
    let a = WellConfiguration::at(-30.0, 0.0).unwrap();
    let b = WellConfiguration::at(40.0, 25.0).unwrap();
    let qa = PumpingSchedule::constant(400.0).unwrap();
    let qb = PumpingSchedule::new(vec![(60.0, 900.0), (500.0, 200.0)]).unwrap();
    let points = [ObservationPoint::new(5.0, 5.0, 900.0), ObservationPoint::new(-10.0, 60.0, 300.0)];
    let config = EvaluationConfig::default();

    let both = driver
        .evaluate("theis", &confined(), &[a, b], &[qa.clone(), qb.clone()], &points, &config)
        .unwrap();
    let only_a = driver.evaluate("theis", &confined(), &[a], &[qa], &points, &config).unwrap();
    let only_b = driver.evaluate("theis", &confined(), &[b], &[qb], &points, &config).unwrap();
    for i in 0..points.len() {
        let sum = only_a.drawdown[i] + only_b.drawdown[i];
        assert!((both.drawdown[i] - sum).abs() <= 1e-12 * sum);
    }
}

#[test]
fn no_flow_boundary_raises_drawdown() {
    let driver = Driver::new();
    let bounded = confined()
        .with_boundary(Boundary::new(BoundaryAxis::X, 100.0, BoundaryKind::NoFlow).unwrap())
        .unwrap();
    let config = EvaluationConfig::default();

    // early: boundary not yet felt; late: clearly above the unbounded case
    let points = [
        ObservationPoint::new(-20.0, 0.0, 1e-4),
        ObservationPoint::new(-20.0, 0.0, 1e4),
        ObservationPoint::new(100.0, 30.0, 1e4),
    ];
    let with = driver.evaluate("bounded", &bounded, &line_source(), &pump(500.0), &points, &config).unwrap();
    let without = driver.evaluate("theis", &confined(), &line_source(), &pump(500.0), &points, &config).unwrap();

    assert!((with.drawdown[0] - without.drawdown[0]).abs() <= 1e-6 * without.drawdown[0]);
    assert!(with.drawdown[1] > without.drawdown[1] * 1.05);
    // on the boundary the image doubles the unbounded drawdown
    assert!((with.drawdown[2] - 2.0 * without.drawdown[2]).abs() <= 1e-12 * with.drawdown[2]);
}

#[test]
fn constant_head_boundary_caps_drawdown() {
    let driver = Driver::new();
    let river = confined()
        .with_boundary(Boundary::new(BoundaryAxis::Y, 50.0, BoundaryKind::ConstantHead).unwrap())
        .unwrap();
    let config = EvaluationConfig::default();
    let points = [ObservationPoint::new(0.0, 10.0, 1e5), ObservationPoint::new(20.0, 50.0, 1e5)];
    let result = driver.evaluate("bounded", &river, &line_source(), &pump(500.0), &points, &config).unwrap();
    let unbounded = theis(500.0, 10.0, 1e5);
    assert!(result.drawdown[0] < unbounded);
    // image steady state: Q/(2πT) ln(r_image / r)
    let steady = 500.0 / (2.0 * std::f64::consts::PI * 100.0) * (90.0f64 / 10.0).ln();
    assert!((result.drawdown[0] - steady).abs() <= 1e-3 * steady);
    assert!(result.drawdown[1].abs() <= 1e-12);
}

#[test]
fn zero_time_or_distance_is_a_parameter_error() {
    let driver = Driver::new();
    let cases = [
        ObservationPoint::radial(10.0, 0.0),
        ObservationPoint::radial(0.0, 10.0),
        ObservationPoint::radial(10.0, -5.0),
        ObservationPoint::radial(10.0, f64::NAN),
    ];
    for point in cases {
        let err = driver
            .evaluate("theis", &confined(), &line_source(), &pump(1.0), &[point], &EvaluationConfig::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Parameter(_)), "{point:?}: {err}");
    }
}

#[test]
fn invalid_requests_fail_before_numeric_work() {
    let driver = Driver::new();
    let point = [ObservationPoint::radial(10.0, 10.0)];
    let config = EvaluationConfig::default();

    let err = driver.evaluate("hantush", &confined(), &line_source(), &pump(1.0), &point, &config).unwrap_err();
    assert_eq!(err, AppError::Parameter(ParameterError::Missing { what: "leakage coefficient" }));

    let err = driver.evaluate("theis", &confined(), &[], &[], &point, &config).unwrap_err();
    assert!(matches!(err, AppError::Parameter(ParameterError::Missing { .. })));

    let err = driver.evaluate("theis", &confined(), &line_source(), &[], &point, &config).unwrap_err();
    assert!(matches!(err, AppError::Parameter(ParameterError::Inconsistent { .. })));

    let err = driver.evaluate("moench", &confined(), &line_source(), &pump(1.0), &point, &config).unwrap_err();
    assert_eq!(err, AppError::UnknownModel("moench".to_string()));

    let inside_screen = [WellConfiguration::new().with_radius(0.5).unwrap()];
    let err = driver
        .evaluate("theis", &confined(), &inside_screen, &pump(1.0), &[ObservationPoint::radial(0.2, 1.0)], &config)
        .unwrap_err();
    assert!(matches!(err, AppError::Parameter(ParameterError::Inconsistent { .. })));

    let broken = EvaluationConfig {
        quadrature: Some(QuadratureConfig {
            max_subdivisions: 0,
            ..QuadratureConfig::default()
        }),
        ..EvaluationConfig::default()
    };
    let err = driver.evaluate("theis", &confined(), &line_source(), &pump(1.0), &point, &broken).unwrap_err();
    assert!(matches!(err, AppError::InvalidConfig(_)));
}

fn starved_quadrature() -> EvaluationConfig {
    // too few tail segments for small u = r²S/(4Tt)
    EvaluationConfig {
        quadrature: Some(QuadratureConfig {
            max_extensions: 4,
            ..QuadratureConfig::default()
        }),
        ..EvaluationConfig::default()
    }
}

#[test]
fn non_convergent_point_becomes_nan_alone() {
    let driver = Driver::new();
    let leaky = AquiferParameters::new(100.0, 1e-2).unwrap().with_leakage(1e-6).unwrap();
    let points = [
        ObservationPoint::radial(200.0, 1.0),
        ObservationPoint::radial(1.0, 1e4),
        ObservationPoint::radial(300.0, 1.0),
    ];
    let result = driver
        .evaluate("hantush_integral", &leaky, &line_source(), &pump(10.0), &points, &starved_quadrature())
        .unwrap();
    assert!(result.drawdown[0].is_finite() && result.drawdown[0] > 0.0);
    assert!(result.drawdown[1].is_nan());
    assert!(result.drawdown[2].is_finite());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].index, 1);
    assert_eq!(result.failures[0].kind, FailureKind::Convergence);
    assert!(!result.is_complete());

    let raised = EvaluationConfig {
        failure_policy: wf_app::FailurePolicy::Raise,
        ..starved_quadrature()
    };
    let err = driver
        .evaluate("hantush_integral", &leaky, &line_source(), &pump(10.0), &points, &raised)
        .unwrap_err();
    assert!(matches!(err, AppError::ConvergenceFailed(_)));
}

#[test]
fn grid_round_trip() {
    let driver = Driver::new();
    let grid = ObservationGrid::new(
        vec![5.0, 50.0],
        ObservationGrid::log_times(1.0, 1e4, 5).unwrap(),
    )
    .unwrap();
    let result = driver
        .evaluate("confined", &confined(), &line_source(), &pump(100.0), &grid.points(), &EvaluationConfig::default())
        .unwrap();
    let rows = result.to_grid(&grid).unwrap();
    assert_eq!(rows.len(), 2);
    for (r, row) in grid.radii().iter().zip(&rows) {
        for (t, s) in grid.times().iter().zip(row) {
            let exact = theis(100.0, *r, *t);
            assert!((s - exact).abs() <= 1e-6 * exact, "r={r} t={t}");
        }
    }
}

#[test]
fn list_models_documents_parameters() {
    let models = Driver::new().list_models();
    assert_eq!(models.len(), 9);
    assert!(models.iter().all(|m| !m.required_parameters.is_empty()));
    assert!(models.iter().any(|m| m.id == "zoned" && m.aliases.contains(&"disk")));
    assert!(models.iter().any(|m| m.id == "ext_theis_2d"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn confined_drawdown_is_monotone(
        r in 1.0f64..500.0,
        dr in 0.5f64..100.0,
        t in 1.0f64..1e5,
        factor in 1.1f64..20.0,
    ) {
        let driver = Driver::new();
        let points = [
            ObservationPoint::radial(r, t),
            ObservationPoint::radial(r, t * factor),
            ObservationPoint::radial(r + dr, t),
        ];
        let result = driver
            .evaluate("theis", &confined(), &line_source(), &pump(100.0), &points, &EvaluationConfig::default())
            .unwrap();
        let s = &result.drawdown;
        prop_assert!(s[1] >= s[0], "time: {} then {}", s[0], s[1]);
        prop_assert!(s[2] <= s[0], "space: {} then {}", s[0], s[2]);
    }
}
