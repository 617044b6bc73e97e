//! Radially composite aquifer: concentric zones around a single well,
//! optionally closed by a constant-head circle.
//!
//! In zone `k`, spanning `[R_k, R_{k+1})`, the transformed drawdown is
//! `A_k I0(q_k r) + B_k K0(q_k r)` with `q_k = sqrt(p S_k / T_k)`. The
//! unknowns are carried scaled so that no Bessel factor overflows:
//! ```text
//! A_k I0(q r) = a_k · i0e(q r) · exp(q (r - R_{k+1}))
//! B_k K0(q r) = b_k · k0e(q r) · exp(-q (r - R_k))
//! ```
//! Both exponentials have non-positive real part inside the zone.

use crate::common::{TWO_PI, check_observation_distance, ensure_kernel_value};
use crate::error::{ModelError, ModelResult};
use crate::traits::{LaplaceKernel, Representation, Solution};
use nalgebra::{DMatrix, DVector};
use tracing::debug;
use wf_core::special::scaled_bessel;
use wf_core::{
    AquiferParameters, Complex, ParamResult, ParameterError, Position, RadialZone, WellConfiguration,
};
use wf_solver::solve_complex;

#[derive(Clone, Copy, Debug, Default)]
pub struct Zoned;

struct Zone {
    inner: f64,
    outer: Option<f64>,
    transmissivity: f64,
    q: Complex,
}

/// Scaled head and radial derivative of the two basis functions at `r`.
struct Basis {
    head_a: Complex,
    slope_a: Complex,
    head_b: Complex,
    slope_b: Complex,
}

impl Zone {
    fn basis(&self, r: f64) -> Basis {
        let q = self.q;
        let b = scaled_bessel(q * r);
        let grow = match self.outer {
            Some(outer) => (q * (r - outer)).exp(),
            None => Complex::new(0.0, 0.0),
        };
        let decay = (-(q * (r - self.inner))).exp();
        Basis {
            head_a: b.i0e * grow,
            slope_a: q * b.i1e * grow,
            head_b: b.k0e * decay,
            slope_b: -q * b.k1e * decay,
        }
    }
}

/// Inner zone properties, outer zones and optional constant-head radius.
pub(crate) struct Layout<'a> {
    pub inner: (f64, f64),
    pub zones: &'a [RadialZone],
    pub outer_radius: Option<f64>,
}

impl<'a> Layout<'a> {
    pub(crate) fn of(aquifer: &'a AquiferParameters) -> Self {
        Self {
            inner: (aquifer.transmissivity(), aquifer.storativity()),
            zones: aquifer.zones(),
            outer_radius: aquifer.outer_radius(),
        }
    }

    fn zones(&self, p: Complex, well: &WellConfiguration) -> Vec<Zone> {
        let mut radii = vec![well.radius()];
        let mut props = vec![self.inner];
        for z in self.zones {
            radii.push(z.inner_radius);
            props.push((z.transmissivity, z.storativity));
        }
        (0..props.len())
            .map(|k| {
                let (transmissivity, storativity) = props[k];
                Zone {
                    inner: radii[k],
                    outer: radii.get(k + 1).copied().or(self.outer_radius),
                    transmissivity,
                    q: (p * storativity / transmissivity).sqrt(),
                }
            })
            .collect()
    }

    /// Unit step response at distance `r` from the central well.
    pub(crate) fn response(
        &self,
        model: &'static str,
        p: Complex,
        r: f64,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let zones = self.zones(p, well);
        let n = zones.len();
        let zero = Complex::new(0.0, 0.0);
        let mut matrix = DMatrix::from_element(2 * n, 2 * n, zero);
        let mut rhs = DVector::from_element(2 * n, zero);

        // well condition
        let rw = well.radius();
        if rw > 0.0 {
            let at_well = zones[0].basis(rw);
            let factor = -TWO_PI * zones[0].transmissivity * rw;
            matrix[(0, 0)] = at_well.slope_a * factor;
            matrix[(0, 1)] = at_well.slope_b * factor;
            rhs[0] = p.inv();
        } else {
            matrix[(0, 1)] = Complex::new(1.0, 0.0);
            rhs[0] = (p * (TWO_PI * zones[0].transmissivity)).inv();
        }

        // head and flux continuity at each interface
        for k in 1..n {
            let (inner, outer) = (&zones[k - 1], &zones[k]);
            let left = inner.basis(outer.inner);
            let right = outer.basis(outer.inner);
            let (row, col) = (2 * k - 1, 2 * k - 2);
            matrix[(row, col)] = left.head_a;
            matrix[(row, col + 1)] = left.head_b;
            matrix[(row, col + 2)] = -right.head_a;
            matrix[(row, col + 3)] = -right.head_b;
            matrix[(row + 1, col)] = left.slope_a * inner.transmissivity;
            matrix[(row + 1, col + 1)] = left.slope_b * inner.transmissivity;
            matrix[(row + 1, col + 2)] = -right.slope_a * outer.transmissivity;
            matrix[(row + 1, col + 3)] = -right.slope_b * outer.transmissivity;
        }

        // outer condition: zero drawdown on the circle, or no growing part
        let last = &zones[n - 1];
        let row = 2 * n - 1;
        match last.outer {
            Some(outer) => {
                let at_outer = last.basis(outer);
                matrix[(row, 2 * n - 2)] = at_outer.head_a;
                matrix[(row, 2 * n - 1)] = at_outer.head_b;
            }
            None => matrix[(row, 2 * n - 2)] = Complex::new(1.0, 0.0),
        }

        let coeffs = solve_complex(matrix, &rhs).map_err(|e| {
            debug!(%p, zones = n, model, "zoned system solve failed: {e}");
            ModelError::KernelEvaluation {
                what: format!("{model}: {e} at p = {p}"),
            }
        })?;

        let k = zones.iter().rposition(|z| z.inner <= r).unwrap_or(0);
        let at_r = zones[k].basis(r);
        let value = coeffs[2 * k] * at_r.head_a + coeffs[2 * k + 1] * at_r.head_b;
        ensure_kernel_value(model, p, value)
    }
}

/// One well at the centre, inside the outer circle if there is one.
pub(crate) fn check_central_well(
    model: &str,
    aquifer: &AquiferParameters,
    wells: &[WellConfiguration],
) -> ParamResult<()> {
    let [well] = wells else {
        return Err(ParameterError::Inconsistent {
            what: format!("{model} aquifer needs exactly one well at its centre, got {}", wells.len()),
        });
    };
    if let Some(outer) = aquifer.outer_radius() {
        if outer <= well.radius() {
            return Err(ParameterError::Inconsistent {
                what: format!("outer radius {outer} does not exceed the well radius"),
            });
        }
    }
    Ok(())
}

/// Observation points must lie inside the outer circle.
pub(crate) fn check_inside_outer_radius(
    aquifer: &AquiferParameters,
    well: &WellConfiguration,
    point: &Position,
) -> ParamResult<()> {
    check_observation_distance(well, point)?;
    let r = well.position().distance_to(point);
    match aquifer.outer_radius() {
        Some(outer) if r > outer => Err(ParameterError::Inconsistent {
            what: format!("observation distance {r} lies beyond the outer radius {outer}"),
        }),
        _ => Ok(()),
    }
}

impl LaplaceKernel for Zoned {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        Layout::of(aquifer).response("zoned", p, r, well)
    }
}

impl Solution for Zoned {
    fn id(&self) -> &'static str {
        "zoned"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["composite", "disk"]
    }

    fn description(&self) -> &'static str {
        "Radially composite aquifer with concentric zones and optional constant-head outer circle"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &[
            "transmissivity and storativity of the inner zone",
            "outer zones (inner radius, transmissivity, storativity)",
            "outer radius (optional)",
            "well radius (optional)",
        ]
    }

    fn validate(&self, aquifer: &AquiferParameters, wells: &[WellConfiguration]) -> ParamResult<()> {
        check_central_well("zoned", aquifer, wells)?;
        if let Some(first) = aquifer.zones().first() {
            if first.inner_radius <= wells[0].radius() {
                return Err(ParameterError::Inconsistent {
                    what: format!(
                        "first zone radius {} does not exceed the well radius {}",
                        first.inner_radius,
                        wells[0].radius()
                    ),
                });
            }
        }
        Ok(())
    }

    fn validate_point(
        &self,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
        point: &Position,
    ) -> ParamResult<()> {
        check_inside_outer_radius(aquifer, well, point)
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Laplace(self)
    }
}
