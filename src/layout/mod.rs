//! Pure per-frame layout of the timeline.
//!
//! Everything here is a function of `(progress, width, height, stage index)` and the
//! [`HeroConfig`]; nothing is retained between frames. Drawing code consumes a [`FrameLayout`].

use crate::config::hero::HeroConfig;
use crate::foundation::core::Point;
use crate::foundation::math::ramp;

/// Position inside the repeating cycle, in `[0, 1)`.
///
/// Non-finite timestamps and non-positive durations map to 0.
pub fn global_progress(timestamp_ms: f64, duration_ms: f64) -> f64 {
    if !timestamp_ms.is_finite() || !duration_ms.is_finite() || duration_ms <= 0.0 {
        return 0.0;
    }
    let p = timestamp_ms.rem_euclid(duration_ms) / duration_ms;
    // rem_euclid can round up to exactly `duration_ms` for tiny negative inputs.
    if (0.0..1.0).contains(&p) { p } else { 0.0 }
}

/// Which side of the spine a stage sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left of the spine (even indices).
    Left,
    /// Right of the spine (odd indices).
    Right,
}

impl Side {
    /// Even indices go left, odd go right.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// `-1` for left, `+1` for right.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Width-dependent layout constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Width is below the breakpoint.
    pub is_compact: bool,
    /// Vertical distance between stage slots.
    pub stage_spacing: f64,
    /// Horizontal distance of anchors from the spine (desktop only).
    pub offset_x: f64,
    /// Vignette scale.
    pub scene_scale: f64,
    /// Caption font size.
    pub font_size: f64,
    /// Title font size.
    pub title_size: f64,
    /// Title letter spacing.
    pub title_tracking: f64,
    /// Height reserved for the title at the top.
    pub title_band: f64,
}

impl LayoutParams {
    /// Pick the desktop or compact constants for a surface `width` logical pixels wide.
    pub fn for_width(cfg: &HeroConfig, width: f64) -> Self {
        let is_compact = width <= cfg.layout.breakpoint;
        let t = &cfg.title;
        let (preset, title_size, title_tracking, title_band) = if is_compact {
            (
                cfg.layout.compact,
                t.size_compact,
                t.tracking_compact,
                t.band_compact,
            )
        } else {
            (
                cfg.layout.desktop,
                t.size_desktop,
                t.tracking_desktop,
                t.band_desktop,
            )
        };
        Self {
            is_compact,
            stage_spacing: preset.stage_spacing,
            offset_x: preset.offset_x,
            scene_scale: preset.scene_scale,
            font_size: preset.font_size,
            title_size,
            title_tracking,
            title_band,
        }
    }

    /// Horizontal anchor of a stage on `side`.
    pub fn anchor_x(&self, side: Side, width: f64) -> f64 {
        if self.is_compact {
            match side {
                Side::Left => width * 0.25,
                Side::Right => width * 0.75,
            }
        } else {
            width * 0.5 + side.sign() * self.offset_x
        }
    }
}

/// One visible stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StagePlacement {
    /// Stage ordinal.
    pub index: usize,
    /// Side of the spine.
    pub side: Side,
    /// Where the vignette is centered.
    pub anchor: Point,
    /// Vertical slot position (`baseline + index * spacing`); later stages trail below.
    pub stage_y: f64,
    /// Entrance opacity ramp in `[0, 1]`.
    pub fade_progress: f64,
    /// Vignette reveal progress in `[0, 1]`.
    pub local_progress: f64,
}

/// Everything the compositor needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameLayout {
    /// Width-dependent constants.
    pub params: LayoutParams,
    /// Global progress the layout was computed for.
    pub progress: f64,
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
    /// Scroll position of stage 0.
    pub baseline: f64,
    /// Distance the baseline travels over one cycle.
    pub total_scroll_range: f64,
    /// Spine x.
    pub center_x: f64,
    /// Spine start, just below the title band.
    pub spine_top: f64,
    /// Lattice offset in `[0, cell_size)`, applied to both axes.
    pub grid_offset: f64,
    /// Runner center.
    pub runner: Point,
    /// Stages to draw, in index order.
    pub placements: Vec<StagePlacement>,
    /// Stages outside the visible band.
    pub culled: Vec<usize>,
}

impl FrameLayout {
    /// Lay out `stage_count` stages for a `width × height` surface at `progress`.
    ///
    /// `progress` outside `[0, 1)` is wrapped back into it first.
    pub fn compute(
        cfg: &HeroConfig,
        progress: f64,
        width: f64,
        height: f64,
        stage_count: usize,
    ) -> Self {
        let progress = if progress.is_finite() {
            global_progress(progress, 1.0)
        } else {
            0.0
        };
        let l = &cfg.layout;
        let params = LayoutParams::for_width(cfg, width);

        let span = stage_count.saturating_sub(1) as f64 * params.stage_spacing;
        let total_scroll_range = height + l.vertical_lead + span + l.cull_margin;
        let baseline = height + l.vertical_lead - progress * total_scroll_range;

        let mut placements = Vec::with_capacity(stage_count);
        let mut culled = Vec::new();
        for index in 0..stage_count {
            let stage_y = baseline + index as f64 * params.stage_spacing;
            let visible = stage_y.is_finite()
                && stage_y >= -l.cull_margin
                && stage_y <= height + l.cull_margin;
            if !visible {
                culled.push(index);
                continue;
            }
            let risen = height - stage_y + l.vertical_lead;
            let side = Side::for_index(index);
            placements.push(StagePlacement {
                index,
                side,
                anchor: Point::new(params.anchor_x(side, width), stage_y),
                stage_y,
                fade_progress: ramp(risen, 0.0, l.fade_distance),
                local_progress: ramp(risen, l.reveal_delay, l.reveal_delay + l.reveal_distance),
            });
        }

        let center_x = width * 0.5;
        let spine_top = params.title_band.min(height);
        let runner = runner_point(cfg, progress, center_x, spine_top, height);

        let wrapped_ms = progress * cfg.timing.duration_ms;
        let grid_offset = (wrapped_ms * cfg.grid.speed_px_per_ms).rem_euclid(cfg.grid.cell_size);

        Self {
            params,
            progress,
            width,
            height,
            baseline,
            total_scroll_range,
            center_x,
            spine_top,
            grid_offset: if grid_offset.is_finite() { grid_offset } else { 0.0 },
            runner,
            placements,
            culled,
        }
    }
}

fn runner_point(cfg: &HeroConfig, progress: f64, x: f64, top: f64, height: f64) -> Point {
    let r = &cfg.runner;
    let phase = std::f64::consts::TAU * f64::from(r.cycles) * progress;
    let y = height * r.anchor + r.amplitude * phase.sin();
    let bottom = (height - r.glow_radius).max(top);
    Point::new(x, y.max(top).min(bottom))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/layout.rs"]
mod tests;
