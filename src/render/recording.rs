use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::math::{affine_is_finite, path_is_finite, point_is_finite};
use crate::render::painter::{GradientStop, Painter, TextFill, TextStyle};

/// A recorded drawing primitive, in user-space coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Whole-surface background wash.
    Fade {
        /// Wash color.
        color: Rgba8,
        /// Wash alpha.
        alpha: f64,
    },
    /// Filled rectangle.
    FillRect {
        /// Rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Filled path.
    FillPath {
        /// Path.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
    },
    /// Stroked path.
    StrokePath {
        /// Path.
        path: BezPath,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
    },
    /// Radial gradient disc.
    FillRadial {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Linear gradient fill.
    FillLinear {
        /// Filled rectangle.
        rect: Rect,
        /// Gradient start.
        start: Point,
        /// Gradient end.
        end: Point,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Text run.
    Text {
        /// Text content.
        text: String,
        /// Top-left corner.
        origin: Point,
        /// Font size.
        size: f64,
        /// Letter spacing.
        tracking: f64,
        /// Glyph fill.
        fill: TextFill,
    },
}

/// A primitive plus the painter state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// The primitive.
    pub op: DrawOp,
    /// Transform in effect.
    pub transform: Affine,
    /// Global alpha in effect.
    pub alpha: f64,
}

impl DrawCommand {
    /// `true` when no coordinate, size, transform coefficient or alpha is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        if !affine_is_finite(self.transform) || !self.alpha.is_finite() {
            return false;
        }
        match &self.op {
            DrawOp::Fade { alpha, .. } => alpha.is_finite(),
            DrawOp::FillRect { rect, .. } => rect_is_finite(rect),
            DrawOp::FillLinear {
                rect, start, end, ..
            } => rect_is_finite(rect) && point_is_finite(*start) && point_is_finite(*end),
            DrawOp::FillPath { path, .. } => path_is_finite(path),
            DrawOp::StrokePath { path, width, .. } => path_is_finite(path) && width.is_finite(),
            DrawOp::FillRadial { center, radius, .. } => point_is_finite(*center) && radius.is_finite(),
            DrawOp::Text {
                origin,
                size,
                tracking,
                ..
            } => point_is_finite(*origin) && size.is_finite() && tracking.is_finite(),
        }
    }
}

fn rect_is_finite(r: &Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    alpha: f64,
}

/// A [`Painter`] that records every primitive instead of rasterizing.
///
/// Text measurement is unavailable unless a fixed per-character advance is configured with
/// [`RecordingPainter::with_char_advance`].
#[derive(Debug)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
    state: State,
    stack: Vec<State>,
    max_depth: usize,
    unbalanced_restores: usize,
    char_advance: Option<f64>,
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPainter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            state: State {
                transform: Affine::IDENTITY,
                alpha: 1.0,
            },
            stack: Vec::new(),
            max_depth: 0,
            unbalanced_restores: 0,
            char_advance: None,
        }
    }

    /// Measure text as `chars × (size × advance + tracking)`.
    pub fn with_char_advance(mut self, advance: f64) -> Self {
        self.char_advance = Some(advance);
        self
    }

    /// Recorded commands in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Current `save` nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest `save` nesting seen.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `restore` calls that had no matching `save`.
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// `true` when every recorded command is finite.
    pub fn all_finite(&self) -> bool {
        self.commands.iter().all(DrawCommand::is_finite)
    }

    /// Recorded text runs.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match &c.op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn push(&mut self, op: DrawOp) {
        self.commands.push(DrawCommand {
            op,
            transform: self.state.transform,
            alpha: self.state.alpha,
        });
    }
}

impl Painter for RecordingPainter {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(s) => self.state = s,
            None => self.unbalanced_restores += 1,
        }
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    fn alpha(&self) -> f64 {
        self.state.alpha
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
    }

    fn fade(&mut self, color: Rgba8, alpha: f64) {
        self.push(DrawOp::Fade { color, alpha });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.push(DrawOp::FillRect { rect, color });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.push(DrawOp::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64) {
        self.push(DrawOp::StrokePath {
            path: path.clone(),
            color,
            width,
        });
    }

    fn fill_radial(&mut self, center: Point, radius: f64, stops: &[GradientStop]) {
        self.push(DrawOp::FillRadial {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }

    fn fill_linear(&mut self, rect: Rect, start: Point, end: Point, stops: &[GradientStop]) {
        self.push(DrawOp::FillLinear {
            rect,
            start,
            end,
            stops: stops.to_vec(),
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            size: style.size,
            tracking: style.tracking,
            fill: style.fill,
        });
    }

    fn text_advance(&mut self, text: &str, size: f64, tracking: f64) -> Option<f64> {
        self.char_advance
            .map(|adv| text.chars().count() as f64 * (size * adv + tracking))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
