use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use kurbo::Shape;

/// Path flattening tolerance for arcs and circles, in logical pixels.
pub const TOLERANCE: f64 = 0.1;

/// One color stop of a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset in `[0, 1]`.
    pub offset: f32,
    /// Stop color.
    pub color: Rgba8,
}

impl GradientStop {
    /// Stop at `offset` with `color`.
    pub fn new(offset: f32, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// How glyphs are filled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextFill {
    /// One color.
    Solid(Rgba8),
    /// Gradient from `top` at the top of each line box to `bottom` at its bottom.
    Vertical {
        /// Color at the top edge.
        top: Rgba8,
        /// Color at the bottom edge.
        bottom: Rgba8,
    },
}

/// Size, letter spacing and fill of a text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub size: f64,
    /// Extra advance after every character; negative values tighten.
    pub tracking: f64,
    /// Glyph fill.
    pub fill: TextFill,
}

impl TextStyle {
    /// Untracked text in one color.
    pub fn solid(size: f64, color: Rgba8) -> Self {
        Self {
            size,
            tracking: 0.0,
            fill: TextFill::Solid(color),
        }
    }

    /// Same style with `tracking` letter spacing.
    pub fn with_tracking(mut self, tracking: f64) -> Self {
        self.tracking = tracking;
        self
    }

    /// Same style with a different fill.
    pub fn with_fill(mut self, fill: TextFill) -> Self {
        self.fill = fill;
        self
    }
}

/// Immediate-mode 2D drawing surface, modeled on a canvas 2D context.
///
/// Coordinates go through the current transform; every primitive is multiplied by the current
/// global alpha. `save`/`restore` bracket both.
pub trait Painter {
    /// Push the current transform and alpha.
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`. Unbalanced calls are ignored.
    fn restore(&mut self);
    /// Current transform (user space to device pixels).
    fn transform(&self) -> Affine;
    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);
    /// Current global alpha.
    fn alpha(&self) -> f64;
    /// Replace the global alpha.
    fn set_alpha(&mut self, alpha: f64);

    /// Wash the whole surface with `color` at `alpha`, keeping what the previous frame left.
    fn fade(&mut self, color: Rgba8, alpha: f64);
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Fill a path (non-zero winding).
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);
    /// Stroke a path.
    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64);
    /// Fill a circle with a radial gradient centered on it.
    fn fill_radial(&mut self, center: Point, radius: f64, stops: &[GradientStop]);
    /// Fill `rect` with a linear gradient running from `start` to `end`.
    fn fill_linear(&mut self, rect: Rect, start: Point, end: Point, stops: &[GradientStop]);
    /// Draw one line of `text` with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);
    /// Advance width of `text` including `tracking` after every character, or `None` when no
    /// text measurement is available.
    fn text_advance(&mut self, text: &str, size: f64, tracking: f64) -> Option<f64>;

    /// Draw untracked `text` in one color.
    fn fill_text(&mut self, text: &str, origin: Point, size: f64, color: Rgba8) {
        self.draw_text(text, origin, &TextStyle::solid(size, color));
    }

    /// Advance width of untracked `text`.
    fn measure_text(&mut self, text: &str, size: f64) -> Option<f64> {
        self.text_advance(text, size, 0.0)
    }

    /// Append a translation to the current transform.
    fn translate(&mut self, dx: f64, dy: f64) {
        let t = self.transform() * Affine::translate((dx, dy));
        self.set_transform(t);
    }

    /// Append a uniform scale to the current transform.
    fn scale(&mut self, s: f64) {
        let t = self.transform() * Affine::scale(s);
        self.set_transform(t);
    }

    /// Multiply the global alpha.
    fn multiply_alpha(&mut self, factor: f64) {
        let a = self.alpha() * factor;
        self.set_alpha(a);
    }

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64) {
        let mut p = BezPath::new();
        p.move_to(from);
        p.line_to(to);
        self.stroke_path(&p, color, width);
    }

    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Point], color: Rgba8, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut p = BezPath::new();
        p.move_to(*first);
        for pt in rest {
            p.line_to(*pt);
        }
        self.stroke_path(&p, color, width);
    }

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if radius <= 0.0 {
            return;
        }
        let p = kurbo::Circle::new(center, radius).to_path(TOLERANCE);
        self.fill_path(&p, color);
    }

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba8, width: f64) {
        if radius <= 0.0 {
            return;
        }
        let p = kurbo::Circle::new(center, radius).to_path(TOLERANCE);
        self.stroke_path(&p, color, width);
    }

    /// Stroke a circular arc starting at `start` radians and sweeping `sweep` radians.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Rgba8,
        width: f64,
    ) {
        if radius <= 0.0 || sweep == 0.0 {
            return;
        }
        let p = kurbo::Arc::new(center, (radius, radius), start, sweep, 0.0).to_path(TOLERANCE);
        self.stroke_path(&p, color, width);
    }

    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        let p = kurbo::RoundedRect::from_rect(rect, radius.max(0.0)).to_path(TOLERANCE);
        self.fill_path(&p, color);
    }
}
