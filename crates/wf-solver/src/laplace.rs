//! Numerical Laplace inversion (de Hoog, Knight & Stokes).
//!
//! For a time `t` the kernel is sampled on the vertical line
//! ```text
//! p_k = γ + i k π / T,   T = scale · t,   γ = c / t
//! ```
//! and the resulting Fourier series is summed through its continued-fraction
//! representation, built with the quotient-difference algorithm and closed
//! with the improved remainder estimate. The order `M` (the series uses
//! `2M + 1` samples) is raised until two successive estimates agree.
//! Samples are reused across orders, so every kernel point is evaluated once.

use crate::error::{SolverError, SolverResult};
use std::f64::consts::PI;
use tracing::debug;
use wf_core::{Complex, Tolerances, is_finite_complex};

/// Inversion configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InversionConfig {
    /// First de Hoog order tried.
    pub min_order: usize,
    /// Highest de Hoog order before giving up.
    pub max_order: usize,
    /// Order increment between successive estimates.
    pub order_step: usize,
    /// Target discretization error; sets the abscissa `γ`.
    pub discretization_tol: f64,
    /// Period `T` as a multiple of `t` (must exceed 1).
    pub period_scale: f64,
    /// Agreement required between successive estimates.
    pub stabilization: Tolerances,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            min_order: 8,
            max_order: 24,
            order_step: 2,
            discretization_tol: 1e-9,
            period_scale: 2.0,
            stabilization: Tolerances {
                abs: 1e-12,
                rel: 1e-8,
            },
        }
    }
}

impl InversionConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.min_order == 0 {
            return Err(SolverError::InvalidConfig {
                what: "min_order must be at least 1",
            });
        }
        if self.max_order < self.min_order {
            return Err(SolverError::InvalidConfig {
                what: "max_order must not be below min_order",
            });
        }
        if self.order_step == 0 {
            return Err(SolverError::InvalidConfig {
                what: "order_step must be at least 1",
            });
        }
        if !(self.discretization_tol > 0.0 && self.discretization_tol < 1.0) {
            return Err(SolverError::InvalidConfig {
                what: "discretization_tol must lie in (0, 1)",
            });
        }
        if !(self.period_scale.is_finite() && self.period_scale > 1.0) {
            return Err(SolverError::InvalidConfig {
                what: "period_scale must be finite and greater than 1",
            });
        }
        let tol = self.stabilization;
        if !(tol.abs.is_finite() && tol.abs >= 0.0 && tol.rel.is_finite() && tol.rel >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "stabilization tolerances must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Constant `c` of the abscissa `γ = c / t`.
    pub fn abscissa_constant(&self) -> f64 {
        -self.discretization_tol.ln() / (2.0 * self.period_scale)
    }
}

/// One inverted value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inversion {
    pub value: f64,
    /// de Hoog order of the accepted estimate.
    pub order: usize,
    /// Difference to the previous order's estimate.
    pub estimated_error: f64,
    pub kernel_evaluations: usize,
}

/// Stateless inverter; safe to share between threads.
#[derive(Clone, Debug, Default)]
pub struct LaplaceInverter {
    config: InversionConfig,
}

impl LaplaceInverter {
    pub fn new(config: InversionConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InversionConfig {
        &self.config
    }

    /// Invert `kernel` at time `t > 0`.
    ///
    /// Kernel errors propagate unchanged; non-finite kernel values become
    /// `KernelEvaluation` errors.
    pub fn invert<F>(&self, kernel: F, t: f64) -> SolverResult<Inversion>
    where
        F: Fn(Complex) -> SolverResult<Complex>,
    {
        if !(t.is_finite() && t > 0.0) {
            return Err(SolverError::InvalidInput {
                what: format!("inversion time must be positive and finite, got {t}"),
            });
        }

        let cfg = &self.config;
        let period = cfg.period_scale * t;
        let gamma = cfg.abscissa_constant() / t;
        let prefactor = (gamma * t).exp() / period;
        let z = Complex::new(0.0, PI * t / period).exp();

        let mut samples: Vec<Complex> = Vec::with_capacity(2 * cfg.max_order + 1);
        let mut previous: Option<f64> = None;
        let mut last_change = f64::INFINITY;
        let mut order = cfg.min_order;

        while order <= cfg.max_order {
            let needed = 2 * order + 1;
            while samples.len() < needed {
                let p = Complex::new(gamma, PI * samples.len() as f64 / period);
                let value = kernel(p)?;
                if !is_finite_complex(value) {
                    return Err(SolverError::KernelEvaluation {
                        what: format!("non-finite value {value} at p = {p}"),
                    });
                }
                samples.push(value);
            }

            // the Fourier sum cannot exceed this; tiny samples also starve the QD table
            let bound = prefactor * sample_magnitude(&samples[..needed]);
            if bound <= cfg.stabilization.abs {
                return Ok(Inversion {
                    value: 0.0,
                    order,
                    estimated_error: bound,
                    kernel_evaluations: samples.len(),
                });
            }
            if samples[..needed].iter().any(|s| s.re == 0.0 && s.im == 0.0) {
                return Err(SolverError::ConvergenceFailed {
                    what: format!("kernel underflow at t = {t} with non-negligible bound {bound:e}"),
                });
            }

            let estimate = prefactor * continued_fraction_sum(&samples[..needed], order, z);
            if estimate.is_finite() {
                if let Some(prev) = previous {
                    last_change = (estimate - prev).abs();
                    if last_change <= cfg.stabilization.bound(estimate) {
                        return Ok(Inversion {
                            value: estimate,
                            order,
                            estimated_error: last_change,
                            kernel_evaluations: samples.len(),
                        });
                    }
                }
                previous = Some(estimate);
            }
            order += cfg.order_step;
        }

        debug!(t, last_change, "laplace inversion did not stabilize");
        Err(SolverError::ConvergenceFailed {
            what: format!(
                "inverse transform at t = {t} did not stabilize up to order {} (last change {last_change:e})",
                cfg.max_order
            ),
        })
    }

    /// Invert at several times, one independent result per time.
    pub fn invert_many<F>(&self, kernel: F, times: &[f64]) -> Vec<SolverResult<Inversion>>
    where
        F: Fn(Complex) -> SolverResult<Complex>,
    {
        times.iter().map(|&t| self.invert(&kernel, t)).collect()
    }
}

/// `|F_0| / 2 + Σ_{k≥1} |F_k|`.
fn sample_magnitude(samples: &[Complex]) -> f64 {
    let head = samples.first().map_or(0.0, |s| 0.5 * s.norm());
    head + samples.iter().skip(1).map(|s| s.norm()).sum::<f64>()
}

/// `Re(A_{2M+1} / B_{2M+1})` of the de Hoog continued fraction.
fn continued_fraction_sum(fp: &[Complex], m: usize, z: Complex) -> f64 {
    let n = 2 * m;
    let zero = Complex::new(0.0, 0.0);

    // quotient-difference table, one column per rank r
    let mut q: Vec<Vec<Complex>> = Vec::with_capacity(m);
    let mut e: Vec<Vec<Complex>> = Vec::with_capacity(m + 1);
    let mut q0 = Vec::with_capacity(n);
    q0.push(fp[1] / (fp[0] * 0.5));
    for i in 1..n {
        q0.push(fp[i + 1] / fp[i]);
    }
    q.push(q0);
    e.push(vec![zero; n + 1]);

    for r in 1..=m {
        let qp = &q[r - 1];
        let ep = &e[r - 1];
        let er: Vec<Complex> = (0..2 * (m - r) + 1)
            .map(|i| qp[i + 1] - qp[i] + ep[i + 1])
            .collect();
        if r < m {
            let qr: Vec<Complex> = (0..2 * (m - r))
                .map(|i| qp[i + 1] * er[i + 1] / er[i])
                .collect();
            q.push(qr);
        }
        e.push(er);
    }

    let mut d = vec![zero; n + 1];
    d[0] = fp[0] * 0.5;
    for r in 1..=m {
        d[2 * r - 1] = -q[r - 1][0];
        d[2 * r] = -e[r][0];
    }

    // A_{i+1} = A_i + d_i z A_{i-1}, same for B
    let (mut a_prev, mut a_cur) = (zero, d[0]);
    let (mut b_prev, mut b_cur) = (Complex::new(1.0, 0.0), Complex::new(1.0, 0.0));
    for di in d.iter().take(n).skip(1) {
        let a_next = a_cur + di * z * a_prev;
        let b_next = b_cur + di * z * b_prev;
        a_prev = a_cur;
        a_cur = a_next;
        b_prev = b_cur;
        b_cur = b_next;
    }

    let h = (Complex::new(1.0, 0.0) + (d[n - 1] - d[n]) * z) * 0.5;
    let remainder = h * ((Complex::new(1.0, 0.0) + d[n] * z / (h * h)).sqrt() - 1.0);
    let a = a_cur + remainder * a_prev;
    let b = b_cur + remainder * b_prev;
    (a / b).re
}
