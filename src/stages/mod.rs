//! The life-story timeline: an ordered catalog of stages, each a procedural vignette.

use crate::config::hero::Palette;
use crate::foundation::core::Point;
use crate::foundation::math::clamp01;
use crate::render::painter::Painter;

mod born;
mod code;
mod exit;
mod family;
mod garage;
mod school;
mod seed;
pub(crate) mod sketch;
mod skyline;

/// Vignette procedure: `(painter, palette, local_progress, origin)`.
///
/// Draws relative to `origin` in the painter's current transform. Must leave the painter's
/// state as it found it.
pub type StageDraw = fn(&mut dyn Painter, &Palette, f64, Point);

/// One step of the timeline.
#[derive(Clone, Copy, Debug)]
pub struct Stage {
    /// Ordinal; also the vertical slot.
    pub id: usize,
    /// Caption lines (one or two).
    pub caption: &'static [&'static str],
    /// Vignette procedure.
    pub draw: StageDraw,
}

impl Stage {
    /// A stage with a vignette.
    pub const fn new(id: usize, caption: &'static [&'static str], draw: StageDraw) -> Self {
        Self { id, caption, draw }
    }

    /// A visually blank stage. Only its marker, connector and caption are drawn.
    pub const fn placeholder(id: usize, caption: &'static [&'static str]) -> Self {
        Self::new(id, caption, blank)
    }

    /// Run the vignette with `progress` clamped to `[0, 1]`.
    pub fn render(&self, painter: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
        (self.draw)(painter, palette, clamp01(progress), origin);
    }
}

fn blank(_: &mut dyn Painter, _: &Palette, _: f64, _: Point) {}

static CATALOG: [Stage; 8] = [
    Stage::new(0, &["Born in Helsinki"], born::draw),
    Stage::new(1, &["School years", "books & math"], school::draw),
    Stage::new(2, &["First lines of code"], code::draw),
    Stage::new(3, &["Garage startup"], garage::draw),
    Stage::new(4, &["First exit"], exit::draw),
    Stage::new(5, &["Family"], family::draw),
    Stage::new(6, &["Angel investing"], seed::draw),
    Stage::new(7, &["SISU Ventures"], skyline::draw),
];

/// The built-in stages in narrative order.
pub fn catalog() -> &'static [Stage] {
    &CATALOG
}

#[cfg(test)]
#[path = "../../tests/unit/stages/stages.rs"]
mod tests;
