use crate::animation::ease::Ease;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{HeroError, HeroResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Every tunable constant of the hero animation.
///
/// `HeroConfig::default()` is the tuned look of the site. JSON overrides are partial: missing
/// fields keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Loop timing.
    pub timing: TimingConfig,
    /// Scrolling background lattice.
    pub grid: GridConfig,
    /// Timeline layout constants.
    pub layout: LayoutConfig,
    /// Moving highlight marker.
    pub runner: RunnerConfig,
    /// Colors.
    pub palette: Palette,
    /// Hero title and its entrance.
    pub title: TitleConfig,
}

/// Loop timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Length of one full cycle in milliseconds.
    pub duration_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 40_000.0,
        }
    }
}

/// Scrolling background lattice.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Lattice cell size in logical pixels.
    pub cell_size: f64,
    /// Scroll speed in logical pixels per millisecond.
    pub speed_px_per_ms: f64,
    /// Stroke width of lattice lines.
    pub line_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 48.0,
            speed_px_per_ms: 0.012,
            line_width: 1.0,
        }
    }
}

/// Constants that switch between desktop and compact layouts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutPreset {
    /// Vertical distance between consecutive stage slots.
    pub stage_spacing: f64,
    /// Horizontal distance of stage anchors from the spine.
    pub offset_x: f64,
    /// Scale applied to stage vignettes.
    pub scene_scale: f64,
    /// Caption font size.
    pub font_size: f64,
}

impl LayoutPreset {
    /// Desktop defaults.
    pub const DESKTOP: Self = Self {
        stage_spacing: 260.0,
        offset_x: 220.0,
        scene_scale: 1.0,
        font_size: 15.0,
    };

    /// Compact (narrow viewport) defaults. Anchors sit at fixed fractions of the width, so
    /// `offset_x` is unused there.
    pub const COMPACT: Self = Self {
        stage_spacing: 200.0,
        offset_x: 0.0,
        scene_scale: 0.62,
        font_size: 12.0,
    };

    fn validate(&self, name: &str) -> HeroResult<()> {
        positive(&format!("layout.{name}.stage_spacing"), self.stage_spacing)?;
        non_negative(&format!("layout.{name}.offset_x"), self.offset_x)?;
        positive(&format!("layout.{name}.scene_scale"), self.scene_scale)?;
        positive(&format!("layout.{name}.font_size"), self.font_size)
    }
}

/// Timeline layout constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Widths up to and including this use the compact preset (theme tablet breakpoint).
    pub breakpoint: f64,
    /// Preset for wide viewports.
    pub desktop: LayoutPreset,
    /// Preset for narrow viewports.
    pub compact: LayoutPreset,
    /// How far below the bottom edge stage 0 starts.
    pub vertical_lead: f64,
    /// Stages further than this outside the surface are culled.
    pub cull_margin: f64,
    /// Rise distance over which a stage fades in.
    pub fade_distance: f64,
    /// Rise distance before a stage's vignette starts drawing.
    pub reveal_delay: f64,
    /// Rise distance over which a vignette draws fully.
    pub reveal_distance: f64,
    /// Caption baseline offset below the stage anchor (scaled with the scene).
    pub caption_offset: f64,
    /// Caption plate padding.
    pub caption_padding: f64,
    /// Radius of spine markers.
    pub marker_radius: f64,
    /// Half-width of a vignette; connectors stop this far short of the anchor.
    pub scene_half_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            desktop: LayoutPreset::DESKTOP,
            compact: LayoutPreset::COMPACT,
            vertical_lead: 60.0,
            cull_margin: 220.0,
            fade_distance: 180.0,
            reveal_delay: 60.0,
            reveal_distance: 300.0,
            caption_offset: 74.0,
            caption_padding: 8.0,
            marker_radius: 5.0,
            scene_half_width: 70.0,
        }
    }
}

/// Moving highlight marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Resting height as a fraction of surface height.
    pub anchor: f64,
    /// Bounce amplitude in logical pixels.
    pub amplitude: f64,
    /// Whole bounces per cycle.
    pub cycles: u32,
    /// Radius of the glow gradient.
    pub glow_radius: f64,
    /// Radius of the solid core.
    pub core_radius: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            anchor: 0.62,
            amplitude: 36.0,
            cycles: 3,
            glow_radius: 28.0,
            core_radius: 5.0,
        }
    }
}

/// Colors, following the site theme.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Surface background.
    pub background: Rgba8,
    /// Alpha of the per-frame background wash that leaves motion trails.
    pub trail_alpha: f64,
    /// Lattice lines.
    pub grid: Rgba8,
    /// Spine line.
    pub spine: Rgba8,
    /// Spine-to-stage connectors.
    pub connector: Rgba8,
    /// Spine markers and runner.
    pub accent: Rgba8,
    /// Secondary warm highlight used by vignettes.
    pub warm: Rgba8,
    /// Line work of vignettes.
    pub ink: Rgba8,
    /// Caption text.
    pub caption_text: Rgba8,
    /// Caption background plate.
    pub caption_plate: Rgba8,
    /// Title fill at the top of each line.
    pub title: Rgba8,
    /// Title fill at the bottom of each line.
    pub title_fade: Rgba8,
    /// Full-surface wash under the title, top edge.
    pub overlay_top: Rgba8,
    /// Full-surface wash under the title, bottom edge.
    pub overlay_bottom: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            trail_alpha: 0.28,
            grid: Rgba8::rgba(255, 255, 255, 16),
            spine: Rgba8::rgba(255, 255, 255, 72),
            connector: Rgba8::rgba(255, 255, 255, 56),
            accent: Rgba8::rgb(0x00, 0xA3, 0xFF),
            warm: Rgba8::rgb(0xFF, 0xB3, 0x47),
            ink: Rgba8::rgb(0xF2, 0xF2, 0xF2),
            caption_text: Rgba8::WHITE,
            caption_plate: Rgba8::rgba(0x33, 0x33, 0x33, 0xCC),
            title: Rgba8::WHITE,
            title_fade: Rgba8::WHITE.with_alpha(0.9),
            overlay_top: Rgba8::BLACK.with_alpha(0.3),
            overlay_bottom: Rgba8::BLACK.with_alpha(0.4),
        }
    }
}

/// Hero title and its entrance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    /// Title text.
    pub text: String,
    /// Font size on wide viewports.
    pub size_desktop: f64,
    /// Font size on narrow viewports.
    pub size_compact: f64,
    /// Extra advance after each character on wide viewports (negative tightens).
    pub tracking_desktop: f64,
    /// Extra advance after each character on narrow viewports.
    pub tracking_compact: f64,
    /// Line height as a multiple of the font size, used when the title wraps.
    pub line_height: f64,
    /// Horizontal room kept free on each side before the title wraps.
    pub side_margin: f64,
    /// Height of the band reserved for the title; the spine starts below it.
    pub band_desktop: f64,
    /// Title band height on narrow viewports.
    pub band_compact: f64,
    /// Distance from the top edge to the title.
    pub top: f64,
    /// Delay before the entrance starts.
    pub intro_delay_ms: f64,
    /// Entrance duration.
    pub intro_duration_ms: f64,
    /// Distance the title rises during the entrance.
    pub intro_rise: f64,
    /// Entrance timing curve.
    pub intro_ease: Ease,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: "SISU Ventures".to_owned(),
            size_desktop: 136.0,
            size_compact: 72.0,
            tracking_desktop: -2.0,
            tracking_compact: -1.0,
            line_height: 1.15,
            side_margin: 16.0,
            band_desktop: 200.0,
            band_compact: 120.0,
            top: 28.0,
            intro_delay_ms: 200.0,
            intro_duration_ms: 1200.0,
            intro_rise: 30.0,
            intro_ease: Ease::TITLE,
        }
    }
}

impl HeroConfig {
    /// Parse a config from a JSON reader. Missing fields keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> HeroResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| HeroError::validation(format!("parse hero config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> HeroResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HeroResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HeroError::validation(format!("open hero config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every constant is usable by the layout and drawing code.
    pub fn validate(&self) -> HeroResult<()> {
        positive("timing.duration_ms", self.timing.duration_ms)?;

        positive("grid.cell_size", self.grid.cell_size)?;
        non_negative("grid.speed_px_per_ms", self.grid.speed_px_per_ms)?;
        non_negative("grid.line_width", self.grid.line_width)?;

        let l = &self.layout;
        non_negative("layout.breakpoint", l.breakpoint)?;
        l.desktop.validate("desktop")?;
        l.compact.validate("compact")?;
        non_negative("layout.vertical_lead", l.vertical_lead)?;
        non_negative("layout.cull_margin", l.cull_margin)?;
        if l.vertical_lead > l.cull_margin {
            return Err(HeroError::validation(
                "layout.vertical_lead must not exceed layout.cull_margin (stage 0 would start culled)",
            ));
        }
        positive("layout.fade_distance", l.fade_distance)?;
        non_negative("layout.reveal_delay", l.reveal_delay)?;
        positive("layout.reveal_distance", l.reveal_distance)?;
        non_negative("layout.caption_offset", l.caption_offset)?;
        non_negative("layout.caption_padding", l.caption_padding)?;
        non_negative("layout.marker_radius", l.marker_radius)?;
        non_negative("layout.scene_half_width", l.scene_half_width)?;

        let r = &self.runner;
        if !(0.0..=1.0).contains(&r.anchor) {
            return Err(HeroError::validation("runner.anchor must be in [0, 1]"));
        }
        non_negative("runner.amplitude", r.amplitude)?;
        positive("runner.glow_radius", r.glow_radius)?;
        non_negative("runner.core_radius", r.core_radius)?;

        let a = self.palette.trail_alpha;
        if !(a.is_finite() && a > 0.0 && a <= 1.0) {
            return Err(HeroError::validation("palette.trail_alpha must be in (0, 1]"));
        }

        let t = &self.title;
        positive("title.size_desktop", t.size_desktop)?;
        positive("title.size_compact", t.size_compact)?;
        finite("title.tracking_desktop", t.tracking_desktop)?;
        finite("title.tracking_compact", t.tracking_compact)?;
        positive("title.line_height", t.line_height)?;
        non_negative("title.side_margin", t.side_margin)?;
        non_negative("title.band_desktop", t.band_desktop)?;
        non_negative("title.band_compact", t.band_compact)?;
        non_negative("title.top", t.top)?;
        non_negative("title.intro_delay_ms", t.intro_delay_ms)?;
        non_negative("title.intro_duration_ms", t.intro_duration_ms)?;
        non_negative("title.intro_rise", t.intro_rise)?;
        Ok(())
    }
}

fn positive(name: &str, v: f64) -> HeroResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(HeroError::validation(format!(
            "{name} must be finite and > 0"
        )))
    }
}

fn finite(name: &str, v: f64) -> HeroResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(HeroError::validation(format!("{name} must be finite")))
    }
}

fn non_negative(name: &str, v: f64) -> HeroResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(HeroError::validation(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/hero.rs"]
mod tests;
