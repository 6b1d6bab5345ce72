//! Per-frame composition: trail fade, grid, stages with their chrome, spine, runner, overlay,
//! title.

use crate::config::hero::HeroConfig;
use crate::config::theme::Theme;
use crate::driver::clock::FrameTime;
use crate::foundation::core::{Point, Rect};
use crate::foundation::math::{point_is_finite, ramp};
use crate::layout::{FrameLayout, StagePlacement, global_progress};
use crate::render::painter::{GradientStop, Painter, TextFill, TextStyle};
use crate::stages::{Stage, catalog};
use crate::surface::Surface;

/// Per-character advance, as a fraction of font size, used when text cannot be measured.
pub const FALLBACK_CHAR_ADVANCE: f64 = 0.6;

const CAPTION_LINE_HEIGHT: f64 = 1.3;
const CAPTION_RADIUS: f64 = 4.0;
const SPINE_WIDTH: f64 = 1.5;
const CONNECTOR_WIDTH: f64 = 1.0;
const MARKER_RING: f64 = 3.5;

/// Width estimate for `text` at `size` with `tracking` letter spacing when no measurement is
/// available.
pub fn estimate_text_width(text: &str, size: f64, tracking: f64) -> f64 {
    text.chars().count() as f64 * (size * FALLBACK_CHAR_ADVANCE + tracking)
}

fn text_width(painter: &mut dyn Painter, text: &str, size: f64, tracking: f64) -> f64 {
    painter
        .text_advance(text, size, tracking)
        .filter(|w| w.is_finite() && *w >= 0.0)
        .unwrap_or_else(|| estimate_text_width(text, size, tracking).max(0.0))
}

/// What a composed frame contained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Global progress of the frame.
    pub progress: f64,
    /// Stage ids whose procedures ran.
    pub drawn: Vec<usize>,
    /// Stage ids outside the visible band.
    pub culled: Vec<usize>,
    /// Stage ids skipped because their placement was degenerate.
    pub skipped: Vec<usize>,
}

/// Draws one full hero frame onto a [`Painter`].
///
/// The compositor holds no per-frame state: a frame depends only on the timestamp, the surface
/// size and (for the title entrance) the time since the loop started.
#[derive(Clone, Debug)]
pub struct Compositor {
    config: HeroConfig,
    theme: Theme,
    stages: Vec<Stage>,
}

impl Compositor {
    /// Compositor over the built-in stage catalog.
    pub fn new(config: HeroConfig, theme: Theme) -> Self {
        Self::with_catalog(config, theme, catalog().to_vec())
    }

    /// Compositor over a custom stage list. Stage `i` occupies slot `i`.
    pub fn with_catalog(config: HeroConfig, theme: Theme, stages: Vec<Stage>) -> Self {
        Self {
            config,
            theme,
            stages,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    /// Theme input.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Stages in slot order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Layout for `surface` at `timestamp_ms`.
    pub fn layout(&self, surface: &Surface, timestamp_ms: f64) -> FrameLayout {
        let progress = global_progress(timestamp_ms, self.config.timing.duration_ms);
        FrameLayout::compute(
            &self.config,
            progress,
            surface.width(),
            surface.height(),
            self.stages.len(),
        )
    }

    /// Compose one frame. An empty surface produces an empty report and no drawing.
    #[tracing::instrument(level = "trace", skip_all, fields(ts = time.timestamp_ms))]
    pub fn draw_frame(
        &self,
        painter: &mut dyn Painter,
        surface: &Surface,
        time: FrameTime,
    ) -> FrameReport {
        let mut report = FrameReport {
            progress: global_progress(time.timestamp_ms, self.config.timing.duration_ms),
            ..FrameReport::default()
        };
        if surface.is_empty() {
            return report;
        }

        let layout = self.layout(surface, time.timestamp_ms);
        let palette = &self.config.palette;

        painter.save();
        painter.fade(palette.background, palette.trail_alpha);
        self.draw_grid(painter, &layout);

        for placement in &layout.placements {
            let Some(stage) = self.stages.get(placement.index) else {
                continue;
            };
            if !placement_is_finite(placement) {
                tracing::warn!(stage = stage.id, "skipping stage with degenerate placement");
                report.skipped.push(stage.id);
                continue;
            }
            self.draw_stage(painter, &layout, placement, stage);
            report.drawn.push(stage.id);
        }
        report.culled = layout
            .culled
            .iter()
            .filter_map(|i| self.stages.get(*i).map(|s| s.id))
            .collect();

        self.draw_spine(painter, &layout);
        self.draw_runner(painter, &layout);
        self.draw_overlay(painter, &layout);
        self.draw_title(painter, &layout, time.since_start_ms);
        painter.restore();

        tracing::trace!(
            progress = report.progress,
            drawn = report.drawn.len(),
            culled = report.culled.len(),
            "composed frame"
        );
        report
    }

    fn draw_grid(&self, painter: &mut dyn Painter, layout: &FrameLayout) {
        let grid = &self.config.grid;
        if grid.line_width <= 0.0 {
            return;
        }
        let color = self.config.palette.grid;
        let cell = grid.cell_size;
        // One extra line past each edge so the lattice tiles while it scrolls.
        let cols = (layout.width / cell).ceil() as usize + 1;
        let rows = (layout.height / cell).ceil() as usize + 1;
        for k in 0..=cols {
            let x = k as f64 * cell - layout.grid_offset;
            painter.stroke_line(
                Point::new(x, 0.0),
                Point::new(x, layout.height),
                color,
                grid.line_width,
            );
        }
        for k in 0..=rows {
            let y = k as f64 * cell - layout.grid_offset;
            painter.stroke_line(
                Point::new(0.0, y),
                Point::new(layout.width, y),
                color,
                grid.line_width,
            );
        }
    }

    fn draw_stage(
        &self,
        painter: &mut dyn Painter,
        layout: &FrameLayout,
        placement: &StagePlacement,
        stage: &Stage,
    ) {
        let l = &self.config.layout;
        let palette = &self.config.palette;
        let scale = layout.params.scene_scale;
        let sign = placement.side.sign();
        let y = placement.stage_y;

        painter.save();
        painter.multiply_alpha(placement.fade_progress);

        let marker = Point::new(layout.center_x, y);
        painter.fill_circle(marker, l.marker_radius, palette.accent);
        painter.stroke_circle(
            marker,
            l.marker_radius + MARKER_RING,
            palette.accent.fade(0.4),
            1.0,
        );

        let start = Point::new(layout.center_x + sign * l.marker_radius, y);
        let end = Point::new(placement.anchor.x - sign * l.scene_half_width * scale, y);
        if (end.x - start.x) * sign > 0.0 {
            painter.stroke_line(start, end, palette.connector, CONNECTOR_WIDTH);
        }

        painter.save();
        painter.translate(placement.anchor.x, placement.anchor.y);
        painter.scale(scale);
        stage.render(painter, palette, placement.local_progress, Point::ORIGIN);
        painter.restore();

        self.draw_caption(painter, layout, placement, stage);
        painter.restore();
    }

    fn draw_caption(
        &self,
        painter: &mut dyn Painter,
        layout: &FrameLayout,
        placement: &StagePlacement,
        stage: &Stage,
    ) {
        if stage.caption.is_empty() {
            return;
        }
        let l = &self.config.layout;
        let palette = &self.config.palette;
        let size = layout.params.font_size;
        let line_height = size * CAPTION_LINE_HEIGHT;

        let widths: Vec<f64> = stage
            .caption
            .iter()
            .map(|line| text_width(painter, line, size, 0.0))
            .collect();
        let text_width = widths.iter().copied().fold(0.0, f64::max);

        let top = placement.anchor.y + l.caption_offset * layout.params.scene_scale;
        let cx = placement.anchor.x;
        let plate = Rect::new(
            cx - text_width * 0.5 - l.caption_padding,
            top - l.caption_padding,
            cx + text_width * 0.5 + l.caption_padding,
            top + line_height * stage.caption.len() as f64 + l.caption_padding,
        );
        painter.fill_rounded_rect(plate, CAPTION_RADIUS, palette.caption_plate);

        for (i, (line, w)) in stage.caption.iter().zip(&widths).enumerate() {
            let origin = Point::new(
                cx - w * 0.5,
                top + i as f64 * line_height + (line_height - size) * 0.5,
            );
            painter.fill_text(line, origin, size, palette.caption_text);
        }
    }

    fn draw_spine(&self, painter: &mut dyn Painter, layout: &FrameLayout) {
        if layout.spine_top >= layout.height {
            return;
        }
        painter.stroke_line(
            Point::new(layout.center_x, layout.spine_top),
            Point::new(layout.center_x, layout.height),
            self.config.palette.spine,
            SPINE_WIDTH,
        );
    }

    fn draw_runner(&self, painter: &mut dyn Painter, layout: &FrameLayout) {
        let r = &self.config.runner;
        let accent = self.config.palette.accent;
        painter.fill_radial(
            layout.runner,
            r.glow_radius,
            &[
                GradientStop::new(0.0, accent.fade(0.8)),
                GradientStop::new(0.35, accent.fade(0.35)),
                GradientStop::new(1.0, accent.with_alpha(0.0)),
            ],
        );
        painter.fill_circle(layout.runner, r.core_radius, accent);
    }

    fn draw_overlay(&self, painter: &mut dyn Painter, layout: &FrameLayout) {
        let palette = &self.config.palette;
        if palette.overlay_top.a == 0 && palette.overlay_bottom.a == 0 {
            return;
        }
        painter.fill_linear(
            Rect::new(0.0, 0.0, layout.width, layout.height),
            Point::new(0.0, 0.0),
            Point::new(0.0, layout.height),
            &[
                GradientStop::new(0.0, palette.overlay_top),
                GradientStop::new(1.0, palette.overlay_bottom),
            ],
        );
    }

    fn draw_title(&self, painter: &mut dyn Painter, layout: &FrameLayout, since_start_ms: f64) {
        let t = &self.config.title;
        if t.text.trim().is_empty() {
            return;
        }
        let intro = t.intro_ease.apply(ramp(
            since_start_ms,
            t.intro_delay_ms,
            t.intro_delay_ms + t.intro_duration_ms,
        ));
        if intro <= 0.0 {
            return;
        }

        let palette = &self.config.palette;
        let style = TextStyle::solid(layout.params.title_size, palette.title)
            .with_tracking(layout.params.title_tracking)
            .with_fill(TextFill::Vertical {
                top: palette.title,
                bottom: palette.title_fade,
            });
        let max_width = (layout.width - 2.0 * t.side_margin).max(0.0);
        let lines = wrap_words(painter, &t.text, &style, max_width);
        let line_height = style.size * t.line_height;
        let top = t.top + t.intro_rise * (1.0 - intro);

        painter.save();
        painter.multiply_alpha(intro);
        for (i, (line, width)) in lines.iter().enumerate() {
            let origin = Point::new(
                layout.center_x - width * 0.5,
                top + i as f64 * line_height,
            );
            painter.draw_text(line, origin, &style);
        }
        painter.restore();
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`, with each line's width.
/// A single word wider than `max_width` keeps a line to itself.
fn wrap_words(
    painter: &mut dyn Painter,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> Vec<(String, f64)> {
    let mut lines: Vec<(String, f64)> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_owned();
            current_width = text_width(painter, &current, style.size, style.tracking);
            continue;
        }
        let candidate = format!("{current} {word}");
        let width = text_width(painter, &candidate, style.size, style.tracking);
        if width <= max_width {
            current = candidate;
            current_width = width;
        } else {
            lines.push((std::mem::take(&mut current), current_width));
            current = word.to_owned();
            current_width = text_width(painter, &current, style.size, style.tracking);
        }
    }
    if !current.is_empty() {
        lines.push((current, current_width));
    }
    lines
}

fn placement_is_finite(p: &StagePlacement) -> bool {
    point_is_finite(p.anchor)
        && p.stage_y.is_finite()
        && p.fade_progress.is_finite()
        && p.local_progress.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/compositor.rs"]
mod tests;
