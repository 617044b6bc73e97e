//! Adaptive quadrature for radial integrands.
//!
//! Finite ranges use globally adaptive 7/15-point Gauss–Kronrod bisection:
//! the interval with the largest error estimate is split until the summed
//! error meets the tolerance or the subdivision budget runs out.
//!
//! Semi-infinite ranges are covered by consecutive segments of doubling
//! width. Truncation requires observed decay: the integral must have been
//! non-zero, and the latest segment contribution must be no larger than the
//! previous one and below the tolerance of the running total.
//!
//! Integrands behaving like `1/x` at a small positive lower bound are handled
//! by `integrate_log_to_infinity` with the substitution `x = e^v`.

use crate::error::{SolverError, SolverResult};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use wf_core::Tolerances;

/// Kronrod abscissae on [-1, 1] (non-negative half, descending).
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Kronrod weights matching `XGK`.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights for the odd Kronrod nodes `XGK[1], XGK[3], XGK[5], XGK[7]`.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

const RULE_POINTS: usize = 15;

/// Quadrature configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadratureConfig {
    pub tolerances: Tolerances,
    /// Maximum number of intervals on one finite range.
    pub max_subdivisions: usize,
    /// Maximum number of tail segments on a semi-infinite range.
    pub max_extensions: usize,
    /// Width of the first tail segment.
    pub initial_span: f64,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances {
                abs: 1e-14,
                rel: 1e-6,
            },
            max_subdivisions: 200,
            max_extensions: 60,
            initial_span: 1.0,
        }
    }
}

impl QuadratureConfig {
    pub fn validate(&self) -> SolverResult<()> {
        let tol = self.tolerances;
        if !(tol.abs.is_finite() && tol.abs >= 0.0 && tol.rel.is_finite() && tol.rel >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "quadrature tolerances must be finite and non-negative",
            });
        }
        if tol.abs == 0.0 && tol.rel == 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "quadrature tolerances must not both be zero",
            });
        }
        if self.max_subdivisions == 0 || self.max_extensions == 0 {
            return Err(SolverError::InvalidConfig {
                what: "quadrature budgets must be at least 1",
            });
        }
        if !(self.initial_span.is_finite() && self.initial_span > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "initial_span must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Integral estimate with its error bound and work counters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadratureEstimate {
    pub value: f64,
    pub error: f64,
    pub evaluations: usize,
    pub intervals: usize,
}

impl QuadratureEstimate {
    fn zero() -> Self {
        Self {
            value: 0.0,
            error: 0.0,
            evaluations: 0,
            intervals: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        // largest error first
        self.error
            .total_cmp(&other.error)
            .then_with(|| other.a.total_cmp(&self.a))
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stateless integrator; safe to share between threads.
#[derive(Clone, Debug, Default)]
pub struct RadialQuadrature {
    config: QuadratureConfig,
}

impl RadialQuadrature {
    pub fn new(config: QuadratureConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    /// `∫_a^b f(x) dx` over a finite range.
    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> SolverResult<QuadratureEstimate>
    where
        F: Fn(f64) -> f64,
    {
        if !(a.is_finite() && b.is_finite()) {
            return Err(SolverError::InvalidInput {
                what: format!("finite integration bounds required, got [{a}, {b}]"),
            });
        }
        if a == b {
            return Ok(QuadratureEstimate::zero());
        }
        if a > b {
            let mut est = self.integrate(f, b, a)?;
            est.value = -est.value;
            return Ok(est);
        }

        let first = gauss_kronrod(&f, a, b)?;
        let mut heap = BinaryHeap::with_capacity(self.config.max_subdivisions);
        heap.push(first);
        let mut total = first.value;
        let mut error = first.error;
        let mut evaluations = RULE_POINTS;

        while error > self.config.tolerances.bound(total) {
            if heap.len() >= self.config.max_subdivisions {
                return Err(SolverError::ConvergenceFailed {
                    what: format!(
                        "quadrature on [{a}, {b}] exceeded {} subdivisions (error {error:e})",
                        self.config.max_subdivisions
                    ),
                });
            }
            let Some(worst) = heap.pop() else {
                break;
            };
            let mid = 0.5 * (worst.a + worst.b);
            if mid <= worst.a || mid >= worst.b {
                return Err(SolverError::ConvergenceFailed {
                    what: format!("quadrature interval near {mid} cannot be bisected further"),
                });
            }
            let left = gauss_kronrod(&f, worst.a, mid)?;
            let right = gauss_kronrod(&f, mid, worst.b)?;
            evaluations += 2 * RULE_POINTS;
            total += left.value + right.value - worst.value;
            error += left.error + right.error - worst.error;
            heap.push(left);
            heap.push(right);
        }

        // re-sum to drop accumulated cancellation in the running totals
        let (value, err) = heap
            .iter()
            .fold((0.0, 0.0), |(v, e), s| (v + s.value, e + s.error));
        Ok(QuadratureEstimate {
            value,
            error: err,
            evaluations,
            intervals: heap.len(),
        })
    }

    /// `∫_a^∞ f(x) dx` by segments of doubling width.
    pub fn integrate_to_infinity<F>(&self, f: F, a: f64) -> SolverResult<QuadratureEstimate>
    where
        F: Fn(f64) -> f64,
    {
        if !a.is_finite() {
            return Err(SolverError::InvalidInput {
                what: format!("finite lower bound required, got {a}"),
            });
        }

        let tol = self.config.tolerances;
        let mut out = QuadratureEstimate::zero();
        let mut lo = a;
        let mut span = self.config.initial_span;
        let mut previous: Option<f64> = None;
        let mut peak = 0.0_f64;

        for _ in 0..self.config.max_extensions {
            let hi = lo + span;
            if !hi.is_finite() {
                break;
            }
            let seg = self.integrate(&f, lo, hi)?;
            out.value += seg.value;
            out.error += seg.error;
            out.evaluations += seg.evaluations;
            out.intervals += seg.intervals;

            let size = seg.value.abs();
            if let Some(prev) = previous {
                if peak > 0.0 && size <= prev && size <= tol.bound(out.value) {
                    out.error += size;
                    return Ok(out);
                }
            }
            peak = peak.max(size);
            previous = Some(size);
            lo = hi;
            span *= 2.0;
        }

        Err(SolverError::ConvergenceFailed {
            what: format!(
                "integrand tail from {a} showed no decay within {} extensions",
                self.config.max_extensions
            ),
        })
    }

    /// `∫_a^∞ f(x) dx` for `a > 0`, integrated in `v = ln x`.
    ///
    /// Suited to integrands like `e^{-x} / x` whose lower bound may be tiny.
    pub fn integrate_log_to_infinity<F>(&self, f: F, a: f64) -> SolverResult<QuadratureEstimate>
    where
        F: Fn(f64) -> f64,
    {
        if !(a.is_finite() && a > 0.0) {
            return Err(SolverError::InvalidInput {
                what: format!("logarithmic substitution needs a positive lower bound, got {a}"),
            });
        }
        self.integrate_to_infinity(
            |v| {
                let x = v.exp();
                if x.is_finite() { f(x) * x } else { 0.0 }
            },
            a.ln(),
        )
    }
}

fn gauss_kronrod<F>(f: &F, a: f64, b: f64) -> SolverResult<Segment>
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];
    let mut finite = fc.is_finite();
    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        finite &= pair.is_finite();
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    if !finite {
        return Err(SolverError::KernelEvaluation {
            what: format!("non-finite integrand on [{a}, {b}]"),
        });
    }

    Ok(Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}
