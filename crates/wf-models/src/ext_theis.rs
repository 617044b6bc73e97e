//! Extended Theis models: pumping in a log-normal conductivity field.
//!
//! The field is coarse-grained radially around the well. The upscaled
//! transmissivity relative to the geometric mean `T_G` is
//! ```text
//! 2D:  T(r) / T_G = exp(χ / (1 + (r / ℓ_p)²))
//! 3D:  T(r) / T_G = F · exp(χ / (1 + (r / ℓ_p)²)^{3/2}),   F = exp(σ² (1/2 - A(e)))
//! ```
//! with `ℓ_p = ℓ / prop` (3D: `ℓ e^{1/3} / prop`) and `χ` set by the value
//! assumed at the well. The profile is sampled on `partitions` concentric
//! zones out to the radius where it is within the relative error of its
//! far-field value, and the zoned aquifer solves the flow.

use crate::error::ModelResult;
use crate::traits::{LaplaceKernel, Representation, Solution};
use crate::zoned::{Layout, check_central_well, check_inside_outer_radius};
use wf_core::{
    AquiferParameters, Complex, LogNormalField, ParamResult, ParameterError, Position, RadialZone,
    WellConfiguration, WellTransmissivity,
};

/// Two-dimensional field (depth-averaged transmissivity).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtTheis2d;

/// Three-dimensional field, optionally anisotropic. The aquifer
/// transmissivity is the geometric-mean conductivity times the thickness.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtTheis3d;

/// Anisotropy function `A(e)` of a 3D Gaussian-correlated field.
pub fn anisotropy_function(e: f64) -> f64 {
    if e >= 1.0 {
        return 1.0 / 3.0;
    }
    if e <= 0.0 {
        return 0.0;
    }
    let x = 1.0 - e * e;
    e / (2.0 * x) * ((1.0 / e / e - 1.0).sqrt().atan() / x.sqrt() - e)
}

/// Upscaled transmissivity profile relative to the geometric mean.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Upscaling {
    far_field: f64,
    chi: f64,
    length: f64,
    exponent: f64,
}

impl Upscaling {
    pub fn two_dimensional(field: &LogNormalField, geometric_mean: f64) -> Self {
        let chi = match field.well_transmissivity {
            WellTransmissivity::Harmonic => -0.5 * field.variance,
            WellTransmissivity::Arithmetic => 0.5 * field.variance,
            WellTransmissivity::Value(value) => (value / geometric_mean).ln(),
        };
        Self {
            far_field: 1.0,
            chi,
            length: field.correlation_length / field.proportionality,
            exponent: 1.0,
        }
    }

    pub fn three_dimensional(field: &LogNormalField, geometric_mean: f64) -> Self {
        let a = anisotropy_function(field.anisotropy);
        let far_field = (field.variance * (0.5 - a)).exp();
        let chi = match field.well_transmissivity {
            WellTransmissivity::Harmonic => field.variance * (a - 1.0),
            WellTransmissivity::Arithmetic => field.variance * a,
            WellTransmissivity::Value(value) => (value / (geometric_mean * far_field)).ln(),
        };
        Self {
            far_field,
            chi,
            length: field.correlation_length * field.anisotropy.cbrt() / field.proportionality,
            exponent: 1.5,
        }
    }

    /// `T(r) / T_G`.
    pub fn ratio(&self, r: f64) -> f64 {
        let x = r / self.length;
        self.far_field * (self.chi / (1.0 + x * x).powf(self.exponent)).exp()
    }

    /// `T(∞) / T_G`.
    pub fn far_field(&self) -> f64 {
        self.far_field
    }

    /// Radius beyond which `T(r)` is within `relative_error` of `T(∞)`;
    /// zero when the whole profile already is.
    pub fn cutoff(&self, relative_error: f64) -> f64 {
        let log_bound = if self.chi > 0.0 {
            relative_error.ln_1p()
        } else {
            (-relative_error).ln_1p()
        };
        let excess = self.chi / log_bound;
        if excess >= 1.0 {
            self.length * (excess.powf(1.0 / self.exponent) - 1.0).sqrt()
        } else {
            0.0
        }
    }

    /// Inner-zone transmissivity and the outer zones for a well of radius
    /// `well_radius`. Zone edges are evenly spaced in `ln(1 + r)`; each
    /// zone takes the profile value at its centre in that variable.
    pub fn zones(
        &self,
        field: &LogNormalField,
        aquifer: &AquiferParameters,
        well_radius: f64,
    ) -> (f64, Vec<RadialZone>) {
        let tg = aquifer.transmissivity();
        let storativity = aquifer.storativity();
        let cutoff = self.cutoff(field.relative_error);
        let outer = aquifer.outer_radius();
        let (top, closed) = match outer {
            Some(radius) if radius <= cutoff => (radius, true),
            _ => (cutoff, false),
        };
        if top <= well_radius {
            return (tg * self.far_field, Vec::new());
        }

        let n = field.partitions;
        let edges_count = if closed { n + 1 } else { n };
        let (lo, hi) = (well_radius.ln_1p(), top.ln_1p());
        let step = (hi - lo) / (edges_count - 1) as f64;
        let mut edges: Vec<f64> = (0..edges_count)
            .map(|k| (lo + step * k as f64).exp_m1())
            .collect();
        edges[0] = well_radius;
        edges[edges_count - 1] = top;

        let centre = |inner: f64, outer: f64| 0.5 * (inner.ln_1p() + outer.ln_1p());
        let mut values: Vec<f64> = edges
            .windows(2)
            .map(|w| tg * self.ratio(centre(w[0], w[1]).exp_m1()))
            .collect();
        if !closed {
            let last = match outer {
                Some(radius) => tg * self.ratio(centre(top, radius).exp_m1()),
                None => tg * self.far_field,
            };
            values.push(last);
        }

        let zones = edges[1..]
            .iter()
            .take(n - 1)
            .zip(&values[1..])
            .map(|(&inner_radius, &transmissivity)| RadialZone {
                inner_radius,
                transmissivity,
                storativity,
            })
            .collect();
        (values[0], zones)
    }
}

fn field(aquifer: &AquiferParameters) -> ParamResult<&LogNormalField> {
    aquifer.field().ok_or(ParameterError::Missing {
        what: "log-normal field statistics",
    })
}

fn validate_field_model(
    model: &str,
    aquifer: &AquiferParameters,
    wells: &[WellConfiguration],
) -> ParamResult<()> {
    field(aquifer)?;
    check_central_well(model, aquifer, wells)?;
    if !aquifer.zones().is_empty() {
        return Err(ParameterError::Inconsistent {
            what: format!("{model} derives its zones from the field; explicit zones are not allowed"),
        });
    }
    Ok(())
}

fn field_response(
    model: &'static str,
    upscaling: Upscaling,
    p: Complex,
    r: f64,
    aquifer: &AquiferParameters,
    well: &WellConfiguration,
) -> ModelResult<Complex> {
    let field = field(aquifer)?;
    let (inner, zones) = upscaling.zones(field, aquifer, well.radius());
    Layout {
        inner: (inner, aquifer.storativity()),
        zones: &zones,
        outer_radius: aquifer.outer_radius(),
    }
    .response(model, p, r, well)
}

impl LaplaceKernel for ExtTheis2d {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let upscaling = Upscaling::two_dimensional(field(aquifer)?, aquifer.transmissivity());
        field_response("ext_theis_2d", upscaling, p, r, aquifer, well)
    }
}

impl LaplaceKernel for ExtTheis3d {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        let upscaling = Upscaling::three_dimensional(field(aquifer)?, aquifer.transmissivity());
        field_response("ext_theis_3d", upscaling, p, r, aquifer, well)
    }
}

const FIELD_PARAMETERS: &[&str] = &[
    "geometric-mean transmissivity and storativity",
    "log-conductivity variance and correlation length",
    "transmissivity at the well (harmonic, arithmetic or explicit)",
    "relative error, proportionality factor, partitions",
    "outer radius (optional)",
    "well radius (optional)",
];

impl Solution for ExtTheis2d {
    fn id(&self) -> &'static str {
        "ext_theis_2d"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["extended_theis"]
    }

    fn description(&self) -> &'static str {
        "Effective drawdown in a 2D log-normal transmissivity field, upscaled into radial zones"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        FIELD_PARAMETERS
    }

    fn validate(&self, aquifer: &AquiferParameters, wells: &[WellConfiguration]) -> ParamResult<()> {
        validate_field_model(self.id(), aquifer, wells)
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

impl Solution for ExtTheis3d {
    fn id(&self) -> &'static str {
        "ext_theis_3d"
    }

    fn description(&self) -> &'static str {
        "Effective drawdown in a 3D anisotropic log-normal conductivity field, upscaled into radial zones"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &[
            "transmissivity (geometric-mean conductivity times thickness) and storativity",
            "log-conductivity variance, horizontal correlation length, anisotropy ratio",
            "transmissivity at the well (harmonic, arithmetic or explicit)",
            "relative error, proportionality factor, partitions",
            "outer radius (optional)",
            "well radius (optional)",
        ]
    }

    fn validate(&self, aquifer: &AquiferParameters, wells: &[WellConfiguration]) -> ParamResult<()> {
        validate_field_model(self.id(), aquifer, wells)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theis::Theis;
    use std::f64::consts::PI;

    fn field_aquifer(field: LogNormalField) -> AquiferParameters {
        AquiferParameters::new(1e-3, 1e-4)
            .unwrap()
            .with_field(field)
            .unwrap()
    }

    #[test]
    fn anisotropy_function_limits() {
        assert_eq!(anisotropy_function(1.0), 1.0 / 3.0);
        assert!((anisotropy_function(0.999_999) - 1.0 / 3.0).abs() < 1e-5);
        let half = anisotropy_function(0.5);
        assert!(half > 0.0 && half < 1.0 / 3.0, "{half}");
        assert!(anisotropy_function(1e-6) < 1e-5);
    }

    #[test]
    fn profile_runs_from_well_value_to_far_field() {
        let field = LogNormalField::new(1.0, 10.0);
        let up = Upscaling::two_dimensional(&field, 1e-3);
        assert!((up.ratio(0.0) - (-0.5f64).exp()).abs() < 1e-15);
        assert!((up.ratio(1e6) - 1.0).abs() < 1e-9);

        let cutoff = up.cutoff(field.relative_error);
        assert!(cutoff > 0.0);
        assert!((1.0 - up.ratio(cutoff) - 0.01).abs() < 1e-12);

        let explicit = LogNormalField {
            well_transmissivity: WellTransmissivity::Value(5e-3),
            ..field
        };
        let up = Upscaling::two_dimensional(&explicit, 1e-3);
        assert!((up.ratio(0.0) - 5.0).abs() < 1e-12);
        assert!((up.ratio(up.cutoff(0.01)) - 1.01).abs() < 1e-12);
    }

    #[test]
    fn three_dimensional_profile_hits_the_means() {
        let field = LogNormalField {
            anisotropy: 0.4,
            ..LogNormalField::new(2.0, 5.0)
        };
        let up = Upscaling::three_dimensional(&field, 1.0);
        assert!((up.ratio(0.0) - (-1.0f64).exp()).abs() < 1e-12);
        let a = anisotropy_function(0.4);
        assert!((up.far_field() - (2.0 * (0.5 - a)).exp()).abs() < 1e-12);

        let arithmetic = LogNormalField {
            well_transmissivity: WellTransmissivity::Arithmetic,
            ..field
        };
        let up = Upscaling::three_dimensional(&arithmetic, 1.0);
        assert!((up.ratio(0.0) - 1.0f64.exp()).abs() < 1e-12);
        let cutoff = up.cutoff(0.05);
        assert!((up.ratio(cutoff) / up.far_field() - 1.05).abs() < 1e-12);
    }

    #[test]
    fn zones_partition_the_profile() {
        let field = LogNormalField::new(1.0, 10.0);
        let aquifer = field_aquifer(field);
        let up = Upscaling::two_dimensional(&field, aquifer.transmissivity());
        let (inner, zones) = up.zones(&field, &aquifer, 0.1);

        assert_eq!(zones.len(), field.partitions - 1);
        assert!(inner > 1e-3 * (-0.5f64).exp() && inner < 1e-3);
        assert!(zones.windows(2).all(|w| w[0].inner_radius < w[1].inner_radius));
        assert!(zones.windows(2).all(|w| w[0].transmissivity <= w[1].transmissivity));
        let last = zones.last().unwrap();
        assert!((last.inner_radius - up.cutoff(0.01)).abs() < 1e-9);
        assert_eq!(last.transmissivity, 1e-3);
        assert!(zones.iter().all(|z| z.storativity == 1e-4));

        // a closed circle inside the cutoff gets every partition
        let closed = aquifer.with_outer_radius(20.0).unwrap();
        let (_, zones) = up.zones(&field, &closed, 0.1);
        assert_eq!(zones.len(), field.partitions - 1);
        assert!(zones.last().unwrap().inner_radius < 20.0);
    }

    #[test]
    fn weak_variance_is_homogeneous() {
        let aquifer = field_aquifer(LogNormalField::new(1e-6, 10.0));
        let well = WellConfiguration::new().with_radius(0.1).unwrap();
        let p = Complex::new(1e-2, 5e-3);
        let a = ExtTheis2d.evaluate(p, 30.0, &aquifer, &well).unwrap();
        let b = Theis.evaluate(p, 30.0, &aquifer, &well).unwrap();
        assert!((a - b).norm() < 1e-10 * b.norm(), "{a} vs {b}");
    }

    #[test]
    fn steady_far_field_follows_thiem() {
        // beyond the cutoff the zone carries the far-field transmissivity
        let p = Complex::new(1e-12, 0.0);
        let well = WellConfiguration::new();
        let field = LogNormalField::new(1.0, 10.0);
        let aquifer = field_aquifer(field);

        let two = |r| (p * ExtTheis2d.evaluate(p, r, &aquifer, &well).unwrap()).re;
        let expected = 4.0f64.ln() / (2.0 * PI * 1e-3);
        let got = two(100.0) - two(400.0);
        assert!((got - expected).abs() < 1e-6 * expected, "{got} vs {expected}");

        let three = |r| (p * ExtTheis3d.evaluate(p, r, &aquifer, &well).unwrap()).re;
        let far = Upscaling::three_dimensional(&field, 1e-3).far_field();
        let expected = 4.0f64.ln() / (2.0 * PI * 1e-3 * far);
        let got = three(100.0) - three(400.0);
        assert!((got - expected).abs() < 1e-6 * expected, "{got} vs {expected}");
    }

    #[test]
    fn harmonic_well_value_deepens_the_cone() {
        let p = Complex::new(1e-6, 0.0);
        let aquifer = field_aquifer(LogNormalField::new(1.0, 10.0));
        let well = WellConfiguration::new().with_radius(0.1).unwrap();
        let field = ExtTheis2d.evaluate(p, 1.0, &aquifer, &well).unwrap();
        let homogeneous = Theis.evaluate(p, 1.0, &aquifer, &well).unwrap();
        assert!(field.re > homogeneous.re);
    }

    #[test]
    fn validation() {
        let well = WellConfiguration::new();
        let plain = AquiferParameters::new(1e-3, 1e-4).unwrap();
        assert!(matches!(
            ExtTheis2d.validate(&plain, &[well]),
            Err(ParameterError::Missing { .. })
        ));

        let aquifer = field_aquifer(LogNormalField::new(1.0, 10.0));
        assert!(ExtTheis2d.validate(&aquifer, &[well]).is_ok());
        assert!(ExtTheis3d.validate(&aquifer, &[well, well]).is_err());

        let zoned = aquifer
            .clone()
            .with_zones(vec![RadialZone {
                inner_radius: 5.0,
                transmissivity: 1e-3,
                storativity: 1e-4,
            }])
            .unwrap();
        assert!(matches!(
            ExtTheis3d.validate(&zoned, &[well]),
            Err(ParameterError::Inconsistent { .. })
        ));

        let closed = aquifer.with_outer_radius(50.0).unwrap();
        assert!(ExtTheis2d.validate_point(&closed, &well, &Position::new(60.0, 0.0)).is_err());
        assert!(ExtTheis2d.validate_point(&closed, &well, &Position::new(30.0, 0.0)).is_ok());
    }
}
