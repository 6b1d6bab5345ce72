use std::sync::Arc;

use crate::config::theme::Theme;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::HeroResult;
use crate::foundation::math::{affine_is_finite, clamp01, path_is_finite, point_is_finite};
use crate::render::frame::FrameRGBA;
use crate::render::painter::{GradientStop, Painter, TextFill, TextStyle};
use crate::render::text::TextLayoutEngine;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    alpha: f64,
}

impl State {
    fn base(transform: Affine) -> Self {
        Self {
            transform,
            alpha: 1.0,
        }
    }
}

/// [`Painter`] that rasterizes into a `vello_cpu` pixmap.
///
/// One frame is bracketed by [`CpuPainter::begin_frame`] and [`CpuPainter::finish_frame`].
/// The finished pixmap is retained so [`Painter::fade`] can build motion trails on top of it;
/// a surface resize drops it. Drawing outside a frame, or into an empty surface, is a no-op.
pub struct CpuPainter {
    ctx: Option<vello_cpu::RenderContext>,
    width: u16,
    height: u16,
    generation: Option<u64>,
    previous: Option<Arc<vello_cpu::Pixmap>>,
    last_frame: Option<FrameRGBA>,
    state: State,
    stack: Vec<State>,
    text: TextLayoutEngine,
    in_frame: bool,
}

impl Default for CpuPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CpuPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuPainter")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_previous", &self.previous.is_some())
            .field("in_frame", &self.in_frame)
            .field("text", &self.text)
            .finish()
    }
}

impl CpuPainter {
    /// A painter without a font: text is measured as unavailable and not drawn.
    pub fn new() -> Self {
        Self {
            ctx: None,
            width: 0,
            height: 0,
            generation: None,
            previous: None,
            last_frame: None,
            state: State::base(Affine::IDENTITY),
            stack: Vec::new(),
            text: TextLayoutEngine::new(),
            in_frame: false,
        }
    }

    /// A painter that shapes all text with the face in `font_bytes`.
    pub fn with_font_bytes(font_bytes: Vec<u8>, theme: &Theme) -> HeroResult<Self> {
        Self::with_fonts([font_bytes], theme)
    }

    /// A painter with several faces, tried in the order of the theme's heading families and
    /// then in the order given.
    pub fn with_fonts(
        fonts: impl IntoIterator<Item = Vec<u8>>,
        theme: &Theme,
    ) -> HeroResult<Self> {
        let mut painter = Self::new();
        painter.text.set_preferred(theme.heading_families());
        for bytes in fonts {
            painter.text.load_font(bytes)?;
        }
        Ok(painter)
    }

    /// Family name of the face text is shaped with first, if any.
    pub fn font_family(&self) -> Option<String> {
        self.text.family()
    }

    /// Every registered family, in shaping order.
    pub fn font_families(&self) -> Vec<String> {
        self.text.font_stack()
    }

    /// Start a frame sized to `surface`. Returns `false` (and draws nothing until the next
    /// call) when the surface is empty.
    ///
    /// The transform is reset to the surface's logical-to-device scale and alpha to 1.
    pub fn begin_frame(&mut self, surface: &Surface) -> bool {
        self.stack.clear();
        self.in_frame = false;
        if surface.is_empty() {
            self.previous = None;
            return false;
        }

        let w = u16::try_from(surface.pixel_width()).unwrap_or(u16::MAX);
        let h = u16::try_from(surface.pixel_height()).unwrap_or(u16::MAX);
        let same_size = w == self.width && h == self.height;

        if !same_size || self.generation != Some(surface.generation()) {
            if self.previous.take().is_some() {
                tracing::debug!(width = w, height = h, "surface changed; dropping trail history");
            }
            self.generation = Some(surface.generation());
        }

        let mut ctx = match self.ctx.take() {
            Some(ctx) if same_size => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        self.ctx = Some(ctx);
        self.width = w;
        self.height = h;

        self.state = State::base(surface.base_transform());
        self.in_frame = true;
        true
    }

    /// Rasterize everything drawn since [`CpuPainter::begin_frame`].
    ///
    /// Returns `None` when no frame is open.
    pub fn finish_frame(&mut self) -> Option<FrameRGBA> {
        if !self.in_frame {
            return None;
        }
        self.in_frame = false;
        let ctx = self.ctx.as_mut()?;
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        let frame = FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.previous = Some(Arc::new(pixmap));
        self.last_frame = Some(frame.clone());
        Some(frame)
    }

    /// The most recently finished frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Forget the retained frame so the next `fade` starts from a clean background.
    pub fn clear_history(&mut self) {
        self.previous = None;
        self.last_frame = None;
    }

    fn drawing(&mut self) -> Option<(&mut vello_cpu::RenderContext, State)> {
        if !self.in_frame || !affine_is_finite(self.state.transform) {
            return None;
        }
        let state = self.state;
        self.ctx.as_mut().map(|ctx| (ctx, state))
    }

    fn fill_solid(&mut self, path: &vello_cpu::kurbo::BezPath, color: Rgba8) {
        let Some((ctx, state)) = self.drawing() else {
            return;
        };
        let Some(paint) = solid(color, state.alpha) else {
            return;
        };
        ctx.set_transform(affine_to_cpu(state.transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint);
        ctx.fill_path(path);
    }
}

impl Painter for CpuPainter {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
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
        self.state.alpha = clamp01(alpha);
    }

    fn fade(&mut self, color: Rgba8, alpha: f64) {
        let previous = self.previous.clone();
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let Some((ctx, _)) = self.drawing() else {
            return;
        };
        let device = vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match previous {
            Some(pixmap) => {
                ctx.set_paint(vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(pixmap),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                });
                ctx.fill_rect(&device);
                if let Some(wash) = solid(color, clamp01(alpha)) {
                    ctx.set_paint(wash);
                    ctx.fill_rect(&device);
                }
            }
            None => {
                ctx.set_paint(to_color(Rgba8 { a: 255, ..color }));
                ctx.fill_rect(&device);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return;
        }
        let Some((ctx, state)) = self.drawing() else {
            return;
        };
        let Some(paint) = solid(color, state.alpha) else {
            return;
        };
        ctx.set_transform(affine_to_cpu(state.transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        if !path_is_finite(path) {
            return;
        }
        self.fill_solid(&bezpath_to_cpu(path), color);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64) {
        if !path_is_finite(path) || !width.is_finite() || width <= 0.0 {
            return;
        }
        let Some((ctx, state)) = self.drawing() else {
            return;
        };
        let Some(paint) = solid(color, state.alpha) else {
            return;
        };
        ctx.set_transform(affine_to_cpu(state.transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint);
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_radial(&mut self, center: Point, radius: f64, stops: &[GradientStop]) {
        if !point_is_finite(center) || !radius.is_finite() || radius <= 0.0 || stops.is_empty() {
            return;
        }
        let Some((ctx, state)) = self.drawing() else {
            return;
        };
        if state.alpha <= 0.0 {
            return;
        }
        let cpu_stops: Vec<(f32, vello_cpu::peniko::Color)> = stops
            .iter()
            .map(|s| (s.offset.clamp(0.0, 1.0), to_color(s.color.fade(state.alpha))))
            .collect();
        let c = vello_cpu::kurbo::Point::new(center.x, center.y);
        let gradient = vello_cpu::peniko::Gradient::new_radial(c, radius as f32)
            .with_stops(cpu_stops.as_slice());

        ctx.set_transform(affine_to_cpu(state.transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(gradient);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ));
    }

    fn fill_linear(&mut self, rect: Rect, start: Point, end: Point, stops: &[GradientStop]) {
        let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
            .iter()
            .all(|v| v.is_finite());
        if !finite || !point_is_finite(start) || !point_is_finite(end) || stops.is_empty() {
            return;
        }
        let Some((ctx, state)) = self.drawing() else {
            return;
        };
        if state.alpha <= 0.0 {
            return;
        }
        let gradient = linear_gradient(start, end, stops, state.alpha);

        ctx.set_transform(affine_to_cpu(state.transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(gradient);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        let size = style.size;
        if text.is_empty()
            || !point_is_finite(origin)
            || !size.is_finite()
            || size <= 0.0
            || !style.tracking.is_finite()
        {
            return;
        }
        let Some(layout) = self.text.layout(text, size as f32, style.tracking as f32) else {
            return;
        };
        let Some((ctx, state)) = self.drawing() else {
            return;
        };

        let tr = state.transform * Affine::translate((origin.x, origin.y));
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match style.fill {
            TextFill::Solid(color) => {
                let Some(paint) = solid(color, state.alpha) else {
                    return;
                };
                ctx.set_paint(paint);
            }
            TextFill::Vertical { top, bottom } => {
                if state.alpha <= 0.0 {
                    return;
                }
                let h = f64::from(layout.height()).max(1.0);
                ctx.set_paint(linear_gradient(
                    Point::new(0.0, 0.0),
                    Point::new(0.0, h),
                    &[GradientStop::new(0.0, top), GradientStop::new(1.0, bottom)],
                    state.alpha,
                ));
            }
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn text_advance(&mut self, text: &str, size: f64, tracking: f64) -> Option<f64> {
        if !size.is_finite() || !tracking.is_finite() {
            return None;
        }
        self.text.measure(text, size as f32, tracking as f32)
    }
}

fn linear_gradient(
    start: Point,
    end: Point,
    stops: &[GradientStop],
    alpha: f64,
) -> vello_cpu::peniko::Gradient {
    let cpu_stops: Vec<(f32, vello_cpu::peniko::Color)> = stops
        .iter()
        .map(|s| (s.offset.clamp(0.0, 1.0), to_color(s.color.fade(alpha))))
        .collect();
    vello_cpu::peniko::Gradient::new_linear(point_to_cpu(start), point_to_cpu(end))
        .with_stops(cpu_stops.as_slice())
}

/// Paint for `color` under global `alpha`, or `None` when fully transparent.
fn solid(color: Rgba8, alpha: f64) -> Option<vello_cpu::peniko::Color> {
    let c = color.fade(clamp01(alpha));
    (c.a > 0).then(|| to_color(c))
}

fn to_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
