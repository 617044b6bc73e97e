//! Exponential integral `E_1(x)` for real `x > 0` and the Theis well function.

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
const EPS: f64 = 1e-16;
const MAX_ITER: usize = 500;

/// `E_1(x) = ∫_x^∞ e^{-t} / t dt`.
///
/// Returns `+∞` at zero and NaN for negative or NaN input.
pub fn exp1(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::INFINITY;
    }
    if x <= 1.0 {
        // -gamma - ln x - sum_{k>=1} (-x)^k / (k k!)
        let mut sum = 0.0;
        let mut term = 1.0;
        for k in 1..MAX_ITER {
            let kf = k as f64;
            term *= -x / kf;
            let contrib = term / kf;
            sum += contrib;
            if contrib.abs() < EPS * sum.abs() {
                break;
            }
        }
        -EULER_GAMMA - x.ln() - sum
    } else {
        // Lentz evaluation of the continued fraction (NR 6.3)
        let tiny = 1e-300;
        let mut b = x + 1.0;
        let mut c = 1.0 / tiny;
        let mut d = 1.0 / b;
        let mut h = d;
        for i in 1..MAX_ITER {
            let an = -((i * i) as f64);
            b += 2.0;
            d = 1.0 / (an * d + b);
            c = b + an / c;
            let del = c * d;
            h *= del;
            if (del - 1.0).abs() < EPS {
                break;
            }
        }
        h * (-x).exp()
    }
}

/// Theis well function `W(u) = E_1(u)`.
pub fn theis_well_function(u: f64) -> f64 {
    exp1(u)
}
