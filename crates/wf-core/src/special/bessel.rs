//! Modified Bessel functions of orders 0 and 1 for complex arguments.
//!
//! Laplace-domain kernels evaluate `I_ν(z)` and `K_ν(z)` at `z = q r` with
//! `Re(z) > 0` and `|arg z| ≤ π/4`. Three regimes are used:
//!
//! - `|z| ≤ 2`: ascending power series (A&S 9.6.10, 9.6.11)
//! - `2 < |z| ≤ 40`: Steed's continued fraction for `K_0`, `K_1` and the
//!   ratio continued fraction for `I_1 / I_0`, tied together by the Wronskian
//!   ```text
//!   I_0(z) K_1(z) + I_1(z) K_0(z) = 1 / z
//!   ```
//! - `|z| > 40`: Hankel asymptotic expansions
//!
//! The scaled forms `i0e = I_0 e^{-z}`, `k0e = K_0 e^{z}` (and order 1) are
//! the primitives; unscaled values overflow or underflow long before the
//! ratios kernels need do.

use num_complex::Complex64;
use std::f64::consts::PI;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
const SERIES_RADIUS: f64 = 2.0;
const ASYMPTOTIC_RADIUS: f64 = 40.0;
const EPS: f64 = 1e-16;
const MAX_ITER: usize = 10_000;

/// Exponentially scaled `I_0, I_1, K_0, K_1` at one argument.
#[derive(Clone, Copy, Debug)]
pub struct ScaledBessel {
    /// `I_0(z) e^{-z}`
    pub i0e: Complex64,
    /// `I_1(z) e^{-z}`
    pub i1e: Complex64,
    /// `K_0(z) e^{z}`
    pub k0e: Complex64,
    /// `K_1(z) e^{z}`
    pub k1e: Complex64,
}

/// All four scaled functions at `z`. Requires `Re(z) > 0`.
pub fn scaled_bessel(z: Complex64) -> ScaledBessel {
    let r = z.norm();
    if r <= SERIES_RADIUS {
        from_power_series(z)
    } else if r <= ASYMPTOTIC_RADIUS {
        from_continued_fractions(z)
    } else {
        asymptotic(z)
    }
}

pub fn bessel_i0(z: Complex64) -> Complex64 {
    scaled_bessel(z).i0e * z.exp()
}

pub fn bessel_i1(z: Complex64) -> Complex64 {
    scaled_bessel(z).i1e * z.exp()
}

pub fn bessel_k0(z: Complex64) -> Complex64 {
    scaled_bessel(z).k0e * (-z).exp()
}

pub fn bessel_k1(z: Complex64) -> Complex64 {
    scaled_bessel(z).k1e * (-z).exp()
}

pub fn bessel_k0_scaled(z: Complex64) -> Complex64 {
    scaled_bessel(z).k0e
}

pub fn bessel_k1_scaled(z: Complex64) -> Complex64 {
    scaled_bessel(z).k1e
}

fn from_power_series(z: Complex64) -> ScaledBessel {
    let (i0, i1, k0, k1) = power_series(z);
    let ez = z.exp();
    let emz = (-z).exp();
    ScaledBessel {
        i0e: i0 * emz,
        i1e: i1 * emz,
        k0e: k0 * ez,
        k1e: k1 * ez,
    }
}

fn from_continued_fractions(z: Complex64) -> ScaledBessel {
    let (k0e, k1e) = steed_k(z);
    let ratio = ratio_i1_i0(z);
    let i0e = Complex64::new(1.0, 0.0) / (z * (k1e + ratio * k0e));
    ScaledBessel {
        i0e,
        i1e: ratio * i0e,
        k0e,
        k1e,
    }
}

fn power_series(z: Complex64) -> (Complex64, Complex64, Complex64, Complex64) {
    let y = z * z * 0.25;
    let half_z = z * 0.5;
    let log_half = half_z.ln();

    // term0 = y^k / (k!)^2, term1 = y^k / (k! (k+1)!)
    let mut term0 = Complex64::new(1.0, 0.0);
    let mut term1 = Complex64::new(1.0, 0.0);
    let mut sum_i0 = term0;
    let mut sum_i1 = term1;
    // psi(k+1) = -gamma + H_k
    let mut harmonic = 0.0;
    let mut sum_k0 = term0 * (-EULER_GAMMA);
    let mut sum_k1 = term1 * (-2.0 * EULER_GAMMA + 1.0);

    for k in 1..200 {
        let kf = k as f64;
        term0 = term0 * y / (kf * kf);
        term1 = term1 * y / (kf * (kf + 1.0));
        harmonic += 1.0 / kf;
        let harmonic_next = harmonic + 1.0 / (kf + 1.0);

        sum_i0 += term0;
        sum_i1 += term1;
        sum_k0 += term0 * (harmonic - EULER_GAMMA);
        sum_k1 += term1 * (harmonic + harmonic_next - 2.0 * EULER_GAMMA);

        if term0.norm() <= EPS * sum_i0.norm() && term1.norm() <= EPS * sum_i1.norm() {
            break;
        }
    }

    let i0 = sum_i0;
    let i1 = half_z * sum_i1;
    let k0 = -log_half * i0 + sum_k0;
    let k1 = z.inv() + log_half * i1 - half_z * 0.5 * sum_k1;
    (i0, i1, k0, k1)
}

/// Steed/Temme continued fraction (CF2) for the scaled `K_0` and `K_1`.
fn steed_k(z: Complex64) -> (Complex64, Complex64) {
    let one = Complex64::new(1.0, 0.0);
    let a1 = 0.25;
    let mut b = (one + z) * 2.0;
    let mut d = b.inv();
    let mut delh = d;
    let mut h = d;
    let mut q1 = Complex64::new(0.0, 0.0);
    let mut q2 = one;
    let mut q = Complex64::new(a1, 0.0);
    let mut c = a1;
    let mut a = -a1;
    let mut s = one + q * delh;

    for i in 2..MAX_ITER {
        let fi = i as f64;
        a -= 2.0 * (fi - 1.0);
        c = -a * c / fi;
        let qnew = (q1 - b * q2) / a;
        q1 = q2;
        q2 = qnew;
        q += qnew * c;
        b += 2.0;
        d = (b + d * a).inv();
        delh = (b * d - 1.0) * delh;
        h += delh;
        let dels = q * delh;
        s += dels;
        if dels.norm() < EPS * s.norm() {
            break;
        }
    }

    h *= a1;
    let k0e = (Complex64::new(PI * 0.5, 0.0) / z).sqrt() / s;
    let k1e = k0e * (z + 0.5 - h) / z;
    (k0e, k1e)
}

/// `I_1(z) / I_0(z)` from the continued fraction
/// `1 / (2/z + 1 / (4/z + 1 / (6/z + ...)))`, evaluated with modified Lentz.
fn ratio_i1_i0(z: Complex64) -> Complex64 {
    const TINY: f64 = 1e-300;
    let tiny = Complex64::new(TINY, 0.0);
    let zi = z.inv();

    let mut f = zi * 2.0;
    if f.norm() < TINY {
        f = tiny;
    }
    let mut c = f;
    let mut d = Complex64::new(0.0, 0.0);
    let limit = MAX_ITER.max(4 * z.norm() as usize);
    for k in 2..limit {
        let bk = zi * (2.0 * k as f64);
        d = bk + d;
        if d.norm() < TINY {
            d = tiny;
        }
        c = bk + c.inv();
        if c.norm() < TINY {
            c = tiny;
        }
        d = d.inv();
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).norm() < EPS {
            break;
        }
    }
    f.inv()
}

fn asymptotic(z: Complex64) -> ScaledBessel {
    let zi = z.inv();
    let expand = |nu: f64| -> (Complex64, Complex64) {
        // sum_k a_k(nu) / z^k for K, alternating signs for I
        let mu = 4.0 * nu * nu;
        let mut term = Complex64::new(1.0, 0.0);
        let mut sum_k = term;
        let mut sum_i = term;
        let mut last = f64::INFINITY;
        for k in 1..60 {
            let kf = k as f64;
            let odd = 2.0 * kf - 1.0;
            term = term * (mu - odd * odd) / (kf * 8.0) * zi;
            let size = term.norm();
            if size > last {
                break;
            }
            last = size;
            sum_k += term;
            if k % 2 == 1 {
                sum_i -= term;
            } else {
                sum_i += term;
            }
            if size < EPS * sum_k.norm() {
                break;
            }
        }
        (sum_i, sum_k)
    };

    let (si0, sk0) = expand(0.0);
    let (si1, sk1) = expand(1.0);
    let i_pref = (z * (2.0 * PI)).sqrt().inv();
    let k_pref = (Complex64::new(PI * 0.5, 0.0) / z).sqrt();
    ScaledBessel {
        i0e: i_pref * si0,
        i1e: i_pref * si1,
        k0e: k_pref * sk0,
        k1e: k_pref * sk1,
    }
}
