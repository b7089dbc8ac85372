//! Easing curves: map linear progress (0.0..=1.0) to eased progress.
//!
//! [CubicBezier] follows the CSS `cubic-bezier()` definition: the curve runs
//! from (0, 0) to (1, 1) with two free control points.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 48;
const SOLVE_EPSILON: f64 = 1e-7;

/// Cubic bezier timing curve with control points (x1, y1) and (x2, y2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The x coordinates must stay in 0..=1 for the curve to be a function of time.
    /// The y coordinates must stay in 0..=1 too, otherwise the curve overshoots and
    /// a sweeping segment would leave the track.
    pub fn is_valid(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }

    /// Eased value for linear progress `x`.
    pub fn solve(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let t = self.solve_t(x);
        sample(self.y1, self.y2, t)
    }

    /// Find the curve parameter `t` whose x coordinate is `x`.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = sample(self.x1, self.x2, t) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = sample_derivative(self.x1, self.x2, t);
            if slope.abs() < 1e-9 {
                break;
            }
            t -= err / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        let mut t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = sample(self.x1, self.x2, t);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

/// Polynomial coefficients for one axis of the curve.
fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

fn sample(p1: f64, p2: f64, t: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    ((a * t + b) * t + c) * t
}

fn sample_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Easing applied uniformly to every phase of the indicator timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    CubicBezier(CubicBezier),
}

impl Easing {
    /// Ease-in-out curve used by the sweep: `cubic-bezier(0.65, 0, 0.35, 1)`.
    pub const STANDARD: Easing = Easing::CubicBezier(CubicBezier::new(0.65, 0.0, 0.35, 1.0));

    pub fn apply(&self, progress: f64) -> f64 {
        match self {
            Easing::Linear => progress.clamp(0.0, 1.0),
            Easing::CubicBezier(curve) => curve.solve(progress),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Easing::Linear => true,
            Easing::CubicBezier(curve) => curve.is_valid(),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::STANDARD
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::CubicBezier(c) => write!(f, "{},{},{},{}", c.x1, c.y1, c.x2, c.y2),
        }
    }
}

/// Accepts `linear`, `standard`, or four comma-separated control values `x1,y1,x2,y2`.
impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "linear" => return Ok(Easing::Linear),
            "standard" | "default" => return Ok(Easing::STANDARD),
            _ => {}
        }
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ConfigError::InvalidEasing(s.to_string()))?;
        let &[x1, y1, x2, y2] = values.as_slice() else {
            return Err(ConfigError::InvalidEasing(s.to_string()));
        };
        let easing = Easing::CubicBezier(CubicBezier::new(x1, y1, x2, y2));
        if !easing.is_valid() {
            return Err(ConfigError::InvalidEasing(s.to_string()));
        }
        Ok(easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let e = Easing::STANDARD;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert_eq!(e.apply(-3.0), 0.0);
        assert_eq!(e.apply(7.0), 1.0);
    }

    #[test]
    fn standard_curve_is_symmetric_and_monotonic() {
        let e = Easing::STANDARD;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-4);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f64 / 100.0);
            assert!(v + 1e-9 >= prev, "not monotonic at {}", i);
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
        // Slow start: ease-in-out lags behind linear early on.
        assert!(e.apply(0.2) < 0.2);
        assert!(e.apply(0.8) > 0.8);
    }

    #[test]
    fn linear_bezier_matches_identity() {
        let e = Easing::CubicBezier(CubicBezier::new(0.0, 0.0, 1.0, 1.0));
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert!((e.apply(x) - x).abs() < 1e-5);
        }
    }

    #[test]
    fn parse_easing() {
        assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("Standard".parse::<Easing>().unwrap(), Easing::STANDARD);
        assert_eq!(
            "0.4, 0, 0.2, 1".parse::<Easing>().unwrap(),
            Easing::CubicBezier(CubicBezier::new(0.4, 0.0, 0.2, 1.0))
        );
        assert!("0.4,0,0.2".parse::<Easing>().is_err());
        assert!("bounce".parse::<Easing>().is_err());
        // Overshooting curves would push the segment off the track.
        assert!("0.3,-0.5,0.7,1.5".parse::<Easing>().is_err());
    }
}
