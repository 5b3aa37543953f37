//! Easing functions for tweens
//!
//! An easing maps a progress ratio in `[0, 1]` to an eased ratio. The eased
//! ratio is not required to stay inside `[0, 1]`: back and elastic curves
//! overshoot on purpose and the blend in [`crate::value`] applies it as-is.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::TweenError;

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SinusoidalIn,
    SinusoidalOut,
    SinusoidalInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
    /// CSS-style timing curve through `(x1, y1)` and `(x2, y2)`
    CubicBezier(f64, f64, f64, f64),
    /// Caller-supplied curve
    Custom(fn(f64) -> f64),
}

/// Named curves, in presentation order.
const CATALOG: &[(&str, Easing)] = &[
    ("linear", Easing::Linear),
    ("quadratic-in", Easing::QuadraticIn),
    ("quadratic-out", Easing::QuadraticOut),
    ("quadratic-in-out", Easing::QuadraticInOut),
    ("cubic-in", Easing::CubicIn),
    ("cubic-out", Easing::CubicOut),
    ("cubic-in-out", Easing::CubicInOut),
    ("quartic-in", Easing::QuarticIn),
    ("quartic-out", Easing::QuarticOut),
    ("quartic-in-out", Easing::QuarticInOut),
    ("quintic-in", Easing::QuinticIn),
    ("quintic-out", Easing::QuinticOut),
    ("quintic-in-out", Easing::QuinticInOut),
    ("sinusoidal-in", Easing::SinusoidalIn),
    ("sinusoidal-out", Easing::SinusoidalOut),
    ("sinusoidal-in-out", Easing::SinusoidalInOut),
    ("exponential-in", Easing::ExponentialIn),
    ("exponential-out", Easing::ExponentialOut),
    ("exponential-in-out", Easing::ExponentialInOut),
    ("circular-in", Easing::CircularIn),
    ("circular-out", Easing::CircularOut),
    ("circular-in-out", Easing::CircularInOut),
    ("bounce-in", Easing::BounceIn),
    ("bounce-out", Easing::BounceOut),
    ("bounce-in-out", Easing::BounceInOut),
    ("elastic-in", Easing::ElasticIn),
    ("elastic-out", Easing::ElasticOut),
    ("elastic-in-out", Easing::ElasticInOut),
    ("back-in", Easing::BackIn),
    ("back-out", Easing::BackOut),
    ("back-in-out", Easing::BackInOut),
];

const BACK_C1: f64 = 1.70158;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadraticInOut => in_out_power(t, 2),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => in_out_power(t, 3),
            Easing::QuarticIn => t.powi(4),
            Easing::QuarticOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuarticInOut => in_out_power(t, 4),
            Easing::QuinticIn => t.powi(5),
            Easing::QuinticOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuinticInOut => in_out_power(t, 5),
            Easing::SinusoidalIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SinusoidalOut => (t * PI / 2.0).sin(),
            Easing::SinusoidalInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExponentialIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f64.powf(10.0 * t - 10.0)
                }
            }
            Easing::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            Easing::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::CircularIn => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Easing::CircularOut => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            Easing::CircularInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
            Easing::ElasticIn => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    -(2.0_f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Easing::ElasticOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Easing::ElasticInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2.0_f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                } else {
                    (2.0_f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                        + 1.0
                }
            }
            Easing::BackIn => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Easing::BackOut => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
            Easing::BackInOut => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0)
                        / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(t),
        }
    }

    /// Kebab-case name of the curve (`"cubic-in-out"`)
    pub fn name(&self) -> &'static str {
        match self {
            Easing::CubicBezier(..) => "cubic-bezier",
            Easing::Custom(_) => "custom",
            named => CATALOG
                .iter()
                .find(|(_, easing)| easing.same_curve(named))
                .map(|(name, _)| *name)
                .unwrap_or("custom"),
        }
    }

    /// All named curves, linear first, then each family as in/out/in-out.
    pub fn catalog() -> &'static [(&'static str, Easing)] {
        CATALOG
    }

    /// Whether both values are the same named variant. Parameterized and
    /// custom curves never compare equal.
    fn same_curve(&self, other: &Easing) -> bool {
        match (self, other) {
            (Easing::CubicBezier(..), _) | (Easing::Custom(_), _) => false,
            (_, Easing::CubicBezier(..)) | (_, Easing::Custom(_)) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = TweenError;

    /// Accepts `cubic-in-out`, `cubic_in_out` and `cubicInOut` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        CATALOG
            .iter()
            .find(|(name, _)| normalize_name(name) == wanted)
            .map(|(_, easing)| *easing)
            .ok_or_else(|| TweenError::UnknownEasing(s.to_string()))
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Symmetric in/out for `t^power` curves.
#[inline]
fn in_out_power(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2.0_f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t >= 1.0 {
        1.0
    } else if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// One axis of a cubic bezier anchored at 0 and 1, as polynomial
/// coefficients of `a*s^3 + b*s^2 + c*s`
#[derive(Clone, Copy)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn at(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    fn derivative(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }

    /// Curve parameter whose value is `target`. Newton steps first; if they
    /// stall or leave `[0, 1]`, bisect.
    fn solve(&self, target: f64) -> f64 {
        const TOLERANCE: f64 = 1e-9;

        let mut s = target;
        for _ in 0..8 {
            let error = self.at(s) - target;
            if error.abs() < TOLERANCE {
                return s;
            }
            let slope = self.derivative(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = target;
        for _ in 0..40 {
            let value = self.at(s);
            if (value - target).abs() < TOLERANCE {
                break;
            }
            if value < target {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

/// CSS `cubic-bezier(x1, y1, x2, y2)`: find where the x axis reaches `t`,
/// then read the y axis there.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let s = BezierAxis::new(x1, x2).solve(t);
    BezierAxis::new(y1, y2).at(s)
}
