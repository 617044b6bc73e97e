//! Core traits for drawdown models.

use crate::error::ModelResult;
use wf_core::{AquiferParameters, Complex, ParamResult, Position, WellConfiguration};
use wf_solver::{InversionConfig, QuadratureConfig, RadialQuadrature};

/// Laplace-domain unit step response.
///
/// `evaluate` returns the transformed drawdown `s̄(r, p)` caused by a unit
/// pumping rate switched on at `t = 0`. Implementations are pure functions of
/// their arguments and must handle any `p` with `Re(p) > 0`.
pub trait LaplaceKernel: Send + Sync {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex>;
}

/// Time-domain unit step response given as an improper integral.
pub trait RadialIntegral: Send + Sync {
    /// Drawdown at distance `r` and time `t > 0` for a unit rate.
    fn drawdown(
        &self,
        quadrature: &RadialQuadrature,
        r: f64,
        t: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<f64>;
}

/// How a model produces its step response.
#[derive(Clone, Copy)]
pub enum Representation<'a> {
    Laplace(&'a dyn LaplaceKernel),
    Integral(&'a dyn RadialIntegral),
}

impl Representation<'_> {
    pub fn kind(&self) -> RepresentationKind {
        match self {
            Representation::Laplace(_) => RepresentationKind::Laplace,
            Representation::Integral(_) => RepresentationKind::Integral,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepresentationKind {
    Laplace,
    Integral,
}

/// Numeric settings a model is known to work well with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericDefaults {
    pub inversion: InversionConfig,
    pub quadrature: QuadratureConfig,
}

/// Fictitious well mirroring a real one across a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageWell {
    pub position: Position,
    /// +1 repeats the real well's rate, -1 reverses it.
    pub sign: f64,
}

/// One catalog entry: identity, validation, evaluation and numeric defaults.
pub trait Solution: Send + Sync {
    /// Canonical identifier.
    fn id(&self) -> &'static str;

    /// Alternative identifiers accepted by the catalog.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    /// Human-readable list of the parameters the model reads.
    fn required_parameters(&self) -> &'static [&'static str];

    /// Check aquifer and wells before any numeric work.
    fn validate(&self, aquifer: &AquiferParameters, wells: &[WellConfiguration]) -> ParamResult<()>;

    /// Check one observation location against one pumping well.
    fn validate_point(
        &self,
        _aquifer: &AquiferParameters,
        well: &WellConfiguration,
        point: &Position,
    ) -> ParamResult<()> {
        crate::common::check_observation_distance(well, point)
    }

    fn representation(&self) -> Representation<'_>;

    fn defaults(&self) -> NumericDefaults {
        NumericDefaults::default()
    }

    /// Image wells the model adds for `well`; empty for unbounded models.
    fn image_wells(&self, _aquifer: &AquiferParameters, _well: &WellConfiguration) -> Vec<ImageWell> {
        Vec::new()
    }
}
