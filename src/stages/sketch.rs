//! Hand-drawn line work shared by the vignettes.
//!
//! Jitter is deterministic: the generator is keyed by stage and by which of
//! [`PROGRESS_BUCKETS`] the local progress falls in, so the wobble changes a few times during a
//! reveal and never between two renders of the same progress.

use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::foundation::math::{Rng64, clamp01, lerp_point, ramp};
use crate::render::painter::Painter;

/// Number of distinct jitter patterns over a stage's reveal.
pub(crate) const PROGRESS_BUCKETS: f64 = 12.0;

/// Maximum endpoint displacement of a sketched stroke.
const WOBBLE: f64 = 0.9;

/// Pen for one vignette frame.
pub(crate) struct Sketch<'a> {
    painter: &'a mut dyn Painter,
    rng: Rng64,
    origin: Point,
}

impl<'a> Sketch<'a> {
    /// Start drawing stage `stage` at `progress` around `origin`. Saves painter state.
    pub(crate) fn begin(
        painter: &'a mut dyn Painter,
        stage: usize,
        progress: f64,
        origin: Point,
    ) -> Self {
        painter.save();
        Self {
            painter,
            rng: Rng64::keyed(stage as u64, bucket(progress)),
            origin,
        }
    }

    /// Point relative to the vignette origin.
    pub(crate) fn at(&self, x: f64, y: f64) -> Point {
        Point::new(self.origin.x + x, self.origin.y + y)
    }

    /// The underlying painter.
    pub(crate) fn painter(&mut self) -> &mut dyn Painter {
        &mut *self.painter
    }

    fn wobble(&mut self, p: Point) -> Point {
        Point::new(
            p.x + self.rng.next_signed() * WOBBLE,
            p.y + self.rng.next_signed() * WOBBLE,
        )
    }

    /// Sketched segment from `a` towards `b`, drawn for the first `t` of its length.
    pub(crate) fn line(&mut self, a: Point, b: Point, t: f64, color: Rgba8, width: f64) {
        let t = clamp01(t);
        if t <= 0.0 {
            return;
        }
        let end = lerp_point(a, b, t);
        let (a, end) = (self.wobble(a), self.wobble(end));
        self.painter.stroke_line(a, end, color, width);
    }

    /// Sketched open polyline, revealed progressively along its vertices.
    pub(crate) fn polyline(&mut self, points: &[Point], t: f64, color: Rgba8, width: f64) {
        let t = clamp01(t);
        if points.len() < 2 || t <= 0.0 {
            return;
        }
        let segments = (points.len() - 1) as f64;
        let reach = t * segments;
        let mut path = BezPath::new();
        path.move_to(self.wobble(points[0]));
        for (i, pair) in points.windows(2).enumerate() {
            let local = clamp01(reach - i as f64);
            if local <= 0.0 {
                break;
            }
            let end = lerp_point(pair[0], pair[1], local);
            path.line_to(self.wobble(end));
        }
        self.painter.stroke_path(&path, color, width);
    }

    /// Sketched closed outline, revealed progressively.
    pub(crate) fn outline(&mut self, points: &[Point], t: f64, color: Rgba8, width: f64) {
        let Some(first) = points.first() else {
            return;
        };
        let mut closed = points.to_vec();
        closed.push(*first);
        self.polyline(&closed, t, color, width);
    }

    /// Filled polygon (no wobble).
    pub(crate) fn fill(&mut self, points: &[Point], color: Rgba8) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        self.painter.fill_path(&path, color);
    }

    /// Corners of a box given relative to the origin, clockwise from top-left.
    pub(crate) fn rect(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> [Point; 4] {
        [
            self.at(x0, y0),
            self.at(x1, y0),
            self.at(x1, y1),
            self.at(x0, y1),
        ]
    }

    /// Next jitter sample in `[-1, 1)`.
    pub(crate) fn jitter(&mut self) -> f64 {
        self.rng.next_signed()
    }
}

impl Drop for Sketch<'_> {
    fn drop(&mut self) {
        self.painter.restore();
    }
}

/// Jitter bucket of `progress`.
pub(crate) fn bucket(progress: f64) -> u64 {
    (clamp01(progress) * PROGRESS_BUCKETS).floor() as u64
}

/// Sub-phase of a reveal: `progress` remapped so `[start, end]` becomes `[0, 1]`.
pub(crate) fn phase(progress: f64, start: f64, end: f64) -> f64 {
    ramp(progress, start, end)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/sketch.rs"]
mod tests;
