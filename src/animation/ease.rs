/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// CSS `cubic-bezier(x1, y1, x2, y2)` timing curve.
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    /// The hero title's entrance curve, `cubic-bezier(0.25, 0.1, 0, 1)`.
    pub const TITLE: Self = Self::CubicBezier(0.25, 0.1, 0.0, 1.0);

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    // Endpoints fixed at 0 and 1.
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    // CSS clamps control x into [0, 1] so x(s) stays monotonic.
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    let mut s = t;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            return bezier_axis(y1, y2, s);
        }
        let d = bezier_axis_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..48 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier_axis(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
