//! Piecewise-constant pumping schedules.

use crate::error::{ParamResult, ParameterError};
use crate::numeric::{ensure_finite, ensure_non_negative};

/// Rate `rate` applies from `time` until the next breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    pub time: f64,
    pub rate: f64,
}

/// Non-empty, strictly time-ordered list of rate breakpoints.
///
/// The rate is zero before the first breakpoint. Positive rates extract water.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSchedule")
)]
pub struct PumpingSchedule {
    breakpoints: Vec<Breakpoint>,
}

/// Wire form; converted through [`PumpingSchedule::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSchedule {
    breakpoints: Vec<Breakpoint>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSchedule> for PumpingSchedule {
    type Error = ParameterError;

    fn try_from(raw: RawSchedule) -> ParamResult<Self> {
        Self::new(raw.breakpoints.into_iter().map(|b| (b.time, b.rate)).collect())
    }
}

impl PumpingSchedule {
    pub fn new(points: Vec<(f64, f64)>) -> ParamResult<Self> {
        if points.is_empty() {
            return Err(ParameterError::Missing {
                what: "pumping schedule breakpoints",
            });
        }

        let mut breakpoints = Vec::with_capacity(points.len());
        let mut last: Option<f64> = None;
        for (time, rate) in points {
            ensure_non_negative(time, "breakpoint time")?;
            ensure_finite(rate, "pumping rate")?;
            if let Some(prev) = last {
                if time <= prev {
                    return Err(ParameterError::Inconsistent {
                        what: format!(
                            "breakpoint times must be strictly increasing ({time} after {prev})"
                        ),
                    });
                }
            }
            last = Some(time);
            breakpoints.push(Breakpoint { time, rate });
        }
        Ok(Self { breakpoints })
    }

    /// Constant rate starting at t = 0.
    pub fn constant(rate: f64) -> ParamResult<Self> {
        Self::new(vec![(0.0, rate)])
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Rate in effect at time `t` (zero before the first breakpoint).
    pub fn rate_at(&self, t: f64) -> f64 {
        let idx = self.breakpoints.partition_point(|b| b.time <= t);
        if idx == 0 {
            0.0
        } else {
            self.breakpoints[idx - 1].rate
        }
    }

    /// Rate increments `(t_i, Q_i - Q_{i-1})` with `Q_{-1} = 0`, zero increments dropped.
    pub fn rate_changes(&self) -> Vec<(f64, f64)> {
        let mut prev = 0.0;
        let mut out = Vec::with_capacity(self.breakpoints.len());
        for b in &self.breakpoints {
            let delta = b.rate - prev;
            if delta != 0.0 {
                out.push((b.time, delta));
            }
            prev = b.rate;
        }
        out
    }

    /// Same timing with every rate multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            breakpoints: self
                .breakpoints
                .iter()
                .map(|b| Breakpoint {
                    time: b.time,
                    rate: b.rate * factor,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_and_unordered() {
        assert!(matches!(
            PumpingSchedule::new(vec![]),
            Err(ParameterError::Missing { .. })
        ));
        assert!(matches!(
            PumpingSchedule::new(vec![(0.0, 1.0), (0.0, 2.0)]),
            Err(ParameterError::Inconsistent { .. })
        ));
        assert!(PumpingSchedule::new(vec![(-1.0, 1.0)]).is_err());
        assert!(PumpingSchedule::new(vec![(0.0, f64::NAN)]).is_err());
    }

    #[test]
    fn rate_at_steps() {
        let s = PumpingSchedule::new(vec![(10.0, 5.0), (20.0, 0.0), (30.0, -2.0)]).unwrap();
        assert_eq!(s.rate_at(0.0), 0.0);
        assert_eq!(s.rate_at(10.0), 5.0);
        assert_eq!(s.rate_at(15.0), 5.0);
        assert_eq!(s.rate_at(25.0), 0.0);
        assert_eq!(s.rate_at(1e9), -2.0);
    }

    #[test]
    fn rate_changes_are_increments() {
        let s = PumpingSchedule::new(vec![(0.0, 100.0), (10.0, 100.0), (20.0, 40.0)]).unwrap();
        assert_eq!(s.rate_changes(), vec![(0.0, 100.0), (20.0, -60.0)]);
    }

    proptest! {
        #[test]
        fn increments_sum_to_rate(rates in prop::collection::vec(-1e3f64..1e3, 1..12), step in 0usize..12) {
            let points: Vec<(f64, f64)> = rates.iter().enumerate().map(|(i, q)| (i as f64, *q)).collect();
            let s = PumpingSchedule::new(points).unwrap();
            let t = step as f64 + 0.5;
            let sum: f64 = s.rate_changes().iter().filter(|(ti, _)| *ti <= t).map(|(_, dq)| dq).sum();
            prop_assert!((sum - s.rate_at(t)).abs() <= 1e-9 * (1.0 + s.rate_at(t).abs()));
        }
    }
}
