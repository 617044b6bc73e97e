//! Aquifer parameters.
//!
//! `AquiferParameters` carries the base transmissivity and storativity plus the
//! optional blocks individual models need (leakage, dual porosity, straight
//! boundaries, radial zones). Construction validates every quantity; models
//! only check which optional blocks they require and whether those blocks are
//! consistent with the well layout.

use crate::error::{ParamResult, ParameterError};
use crate::numeric::{ensure_finite, ensure_positive};
use crate::well::Position;

/// Condition imposed along a straight boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryKind {
    /// Impermeable barrier, mirrored by a pumping image well.
    NoFlow,
    /// Fixed head (e.g. a river), mirrored by an injecting image well.
    ConstantHead,
}

impl BoundaryKind {
    /// Sign applied to the image well rate.
    pub fn image_sign(self) -> f64 {
        match self {
            BoundaryKind::NoFlow => 1.0,
            BoundaryKind::ConstantHead => -1.0,
        }
    }
}

/// Axis a straight boundary is perpendicular to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryAxis {
    /// The line `x = offset`.
    X,
    /// The line `y = offset`.
    Y,
}

/// Infinite straight boundary. The aquifer is the half-plane containing the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBoundary")
)]
pub struct Boundary {
    axis: BoundaryAxis,
    offset: f64,
    kind: BoundaryKind,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBoundary {
    axis: BoundaryAxis,
    offset: f64,
    kind: BoundaryKind,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBoundary> for Boundary {
    type Error = ParameterError;

    fn try_from(raw: RawBoundary) -> ParamResult<Self> {
        Boundary::new(raw.axis, raw.offset, raw.kind)
    }
}

impl Boundary {
    /// Boundary line at signed coordinate `offset` along `axis`.
    pub fn new(axis: BoundaryAxis, offset: f64, kind: BoundaryKind) -> ParamResult<Self> {
        ensure_finite(offset, "boundary offset")?;
        if offset == 0.0 {
            return Err(ParameterError::NonPositive {
                what: "boundary distance from origin",
                value: offset,
            });
        }
        Ok(Self { axis, offset, kind })
    }

    pub fn axis(&self) -> BoundaryAxis {
        self.axis
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    fn coordinate(&self, p: &Position) -> f64 {
        match self.axis {
            BoundaryAxis::X => p.x,
            BoundaryAxis::Y => p.y,
        }
    }

    /// Signed distance from the boundary, positive on the aquifer side.
    pub fn clearance(&self, p: &Position) -> f64 {
        (self.offset - self.coordinate(p)) * self.offset.signum()
    }

    /// Mirror image of `p` across the boundary line.
    pub fn mirror(&self, p: &Position) -> Position {
        match self.axis {
            BoundaryAxis::X => Position::new(2.0 * self.offset - p.x, p.y),
            BoundaryAxis::Y => Position::new(p.x, 2.0 * self.offset - p.y),
        }
    }
}

/// Fracture/matrix exchange parameters (pseudo-steady interporosity flow).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DualPorosity {
    /// Storativity of the matrix blocks.
    pub matrix_storativity: f64,
    /// Exchange coefficient between fracture and matrix heads (1/time).
    pub exchange_coefficient: f64,
}

/// Concentric zone starting at `inner_radius` and extending to the next zone.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialZone {
    pub inner_radius: f64,
    pub transmissivity: f64,
    pub storativity: f64,
}

/// Transmissivity assumed at the well by the upscaled field models.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WellTransmissivity {
    /// Harmonic mean of the field.
    Harmonic,
    /// Arithmetic mean of the field.
    Arithmetic,
    /// Explicit value (same unit as the aquifer transmissivity).
    Value(f64),
}

/// Statistics of a log-normal conductivity field with Gaussian correlation.
///
/// The aquifer transmissivity is read as the geometric mean. Radial
/// coarse-graining turns the field into `partitions` concentric zones; the
/// zones stop at the radius where the upscaled value is within
/// `relative_error` of its far-field value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogNormalField {
    /// Variance of the log-conductivity.
    pub variance: f64,
    pub correlation_length: f64,
    /// Vertical over horizontal correlation length, in `(0, 1]`. 3D only.
    pub anisotropy: f64,
    pub well_transmissivity: WellTransmissivity,
    pub relative_error: f64,
    /// Proportionality factor of the upscaling radius.
    pub proportionality: f64,
    pub partitions: usize,
}

impl LogNormalField {
    /// Isotropic field; harmonic mean at the well, 30 partitions.
    pub fn new(variance: f64, correlation_length: f64) -> Self {
        Self {
            variance,
            correlation_length,
            anisotropy: 1.0,
            well_transmissivity: WellTransmissivity::Harmonic,
            relative_error: 0.01,
            proportionality: 1.6,
            partitions: 30,
        }
    }

    fn validate(&self) -> ParamResult<()> {
        ensure_positive(self.variance, "log-conductivity variance")?;
        ensure_positive(self.correlation_length, "correlation length")?;
        ensure_positive(self.proportionality, "upscaling proportionality factor")?;
        ensure_positive(self.anisotropy, "anisotropy ratio")?;
        if self.anisotropy > 1.0 {
            return Err(ParameterError::Inconsistent {
                what: format!("anisotropy ratio must not exceed 1, got {}", self.anisotropy),
            });
        }
        if !(self.relative_error > 0.0 && self.relative_error < 1.0) {
            return Err(ParameterError::Inconsistent {
                what: format!("relative error must lie in (0, 1), got {}", self.relative_error),
            });
        }
        if self.partitions < 2 {
            return Err(ParameterError::Inconsistent {
                what: format!("at least 2 partitions are needed, got {}", self.partitions),
            });
        }
        if let WellTransmissivity::Value(value) = self.well_transmissivity {
            ensure_positive(value, "transmissivity at the well")?;
        }
        Ok(())
    }
}

/// Validated, immutable aquifer description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawAquifer")
)]
pub struct AquiferParameters {
    transmissivity: f64,
    storativity: f64,
    leakage: Option<f64>,
    dual_porosity: Option<DualPorosity>,
    boundaries: Vec<Boundary>,
    zones: Vec<RadialZone>,
    outer_radius: Option<f64>,
    field: Option<LogNormalField>,
}

/// Wire form; every block goes back through its builder.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawAquifer {
    transmissivity: f64,
    storativity: f64,
    #[serde(default)]
    leakage: Option<f64>,
    #[serde(default)]
    dual_porosity: Option<DualPorosity>,
    #[serde(default)]
    boundaries: Vec<Boundary>,
    #[serde(default)]
    zones: Vec<RadialZone>,
    #[serde(default)]
    outer_radius: Option<f64>,
    #[serde(default)]
    field: Option<LogNormalField>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawAquifer> for AquiferParameters {
    type Error = ParameterError;

    fn try_from(raw: RawAquifer) -> ParamResult<Self> {
        let mut aquifer = Self::new(raw.transmissivity, raw.storativity)?;
        if let Some(leakage) = raw.leakage {
            aquifer = aquifer.with_leakage(leakage)?;
        }
        if let Some(dual) = raw.dual_porosity {
            aquifer = aquifer.with_dual_porosity(dual)?;
        }
        for boundary in raw.boundaries {
            aquifer = aquifer.with_boundary(boundary)?;
        }
        aquifer = aquifer.with_zones(raw.zones)?;
        if let Some(outer) = raw.outer_radius {
            aquifer = aquifer.with_outer_radius(outer)?;
        }
        if let Some(field) = raw.field {
            aquifer = aquifer.with_field(field)?;
        }
        Ok(aquifer)
    }
}

impl AquiferParameters {
    pub fn new(transmissivity: f64, storativity: f64) -> ParamResult<Self> {
        Ok(Self {
            transmissivity: ensure_positive(transmissivity, "transmissivity")?,
            storativity: ensure_positive(storativity, "storativity")?,
            leakage: None,
            dual_porosity: None,
            boundaries: Vec::new(),
            zones: Vec::new(),
            outer_radius: None,
            field: None,
        })
    }

    /// Leakage coefficient `K'/b'` of the aquitard (1/time).
    pub fn with_leakage(mut self, leakage: f64) -> ParamResult<Self> {
        self.leakage = Some(ensure_positive(leakage, "leakage coefficient")?);
        Ok(self)
    }

    pub fn with_dual_porosity(mut self, dual: DualPorosity) -> ParamResult<Self> {
        ensure_positive(dual.matrix_storativity, "matrix storativity")?;
        ensure_positive(dual.exchange_coefficient, "exchange coefficient")?;
        self.dual_porosity = Some(dual);
        Ok(self)
    }

    /// Add a straight boundary. At most one boundary per axis.
    pub fn with_boundary(mut self, boundary: Boundary) -> ParamResult<Self> {
        if self.boundaries.iter().any(|b| b.axis == boundary.axis) {
            return Err(ParameterError::Inconsistent {
                what: format!("more than one boundary along axis {:?}", boundary.axis),
            });
        }
        self.boundaries.push(boundary);
        Ok(self)
    }

    /// Outer zones, ordered by strictly increasing inner radius.
    pub fn with_zones(mut self, zones: Vec<RadialZone>) -> ParamResult<Self> {
        let mut previous = 0.0;
        for zone in &zones {
            ensure_positive(zone.inner_radius, "zone radius")?;
            ensure_positive(zone.transmissivity, "zone transmissivity")?;
            ensure_positive(zone.storativity, "zone storativity")?;
            if zone.inner_radius <= previous {
                return Err(ParameterError::Inconsistent {
                    what: format!(
                        "zone radii must be strictly increasing ({} after {})",
                        zone.inner_radius, previous
                    ),
                });
            }
            previous = zone.inner_radius;
        }
        if let Some(outer) = self.outer_radius {
            check_outer_radius(outer, &zones)?;
        }
        self.zones = zones;
        Ok(self)
    }

    /// Circular constant-head boundary at radius `outer_radius`.
    pub fn with_outer_radius(mut self, outer_radius: f64) -> ParamResult<Self> {
        ensure_positive(outer_radius, "outer radius")?;
        check_outer_radius(outer_radius, &self.zones)?;
        self.outer_radius = Some(outer_radius);
        Ok(self)
    }

    /// Heterogeneous field read by the upscaled models; `transmissivity`
    /// becomes its geometric mean.
    pub fn with_field(mut self, field: LogNormalField) -> ParamResult<Self> {
        field.validate()?;
        self.field = Some(field);
        Ok(self)
    }

    pub fn transmissivity(&self) -> f64 {
        self.transmissivity
    }

    pub fn storativity(&self) -> f64 {
        self.storativity
    }

    /// Hydraulic diffusivity `T / S`.
    pub fn diffusivity(&self) -> f64 {
        self.transmissivity / self.storativity
    }

    pub fn leakage(&self) -> Option<f64> {
        self.leakage
    }

    /// Leakage factor `B = sqrt(T / c)`.
    pub fn leakage_factor(&self) -> Option<f64> {
        self.leakage.map(|c| (self.transmissivity / c).sqrt())
    }

    pub fn dual_porosity(&self) -> Option<DualPorosity> {
        self.dual_porosity
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn zones(&self) -> &[RadialZone] {
        &self.zones
    }

    pub fn outer_radius(&self) -> Option<f64> {
        self.outer_radius
    }

    pub fn field(&self) -> Option<&LogNormalField> {
        self.field.as_ref()
    }
}

fn check_outer_radius(outer: f64, zones: &[RadialZone]) -> ParamResult<()> {
    if let Some(last) = zones.last() {
        if outer <= last.inner_radius {
            return Err(ParameterError::Inconsistent {
                what: format!(
                    "outer radius {} must exceed the last zone radius {}",
                    outer, last.inner_radius
                ),
            });
        }
    }
    Ok(())
}
