use kurbo::{BezPath, PathEl, Point};

/// SplitMix64 generator. Sketch jitter is seeded from stage index and a progress bucket so a
/// given frame always draws the same wobble.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed keyed by `(stream, bucket)`.
    pub(crate) fn keyed(stream: u64, bucket: u64) -> Self {
        Self::new(stream.wrapping_mul(0xD6E8_FEB8_6659_FD93) ^ bucket.rotate_left(29))
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform in `[-1, 1)`.
    pub(crate) fn next_signed(&mut self) -> f64 {
        self.next_f64_01() * 2.0 - 1.0
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Normalized position of `x` inside `[start, end]`, clamped to `[0, 1]`.
///
/// A degenerate span behaves like a step at `start`.
pub(crate) fn ramp(x: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if !span.is_finite() || span.abs() < f64::EPSILON {
        return if x >= start { 1.0 } else { 0.0 };
    }
    clamp01((x - start) / span)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

pub(crate) fn point_is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

pub(crate) fn path_is_finite(path: &BezPath) -> bool {
    path.elements().iter().all(|el| match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => point_is_finite(p),
        PathEl::QuadTo(a, b) => point_is_finite(a) && point_is_finite(b),
        PathEl::CurveTo(a, b, c) => point_is_finite(a) && point_is_finite(b) && point_is_finite(c),
        PathEl::ClosePath => true,
    })
}

pub(crate) fn affine_is_finite(a: kurbo::Affine) -> bool {
    a.as_coeffs().iter().all(|c| c.is_finite())
}

/// `x * y / 255`, rounded.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
