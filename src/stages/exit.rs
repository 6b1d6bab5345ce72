//! Stage 4: a bar chart climbing to an exit, with the trend arrow drawn over it.

use crate::config::hero::Palette;
use crate::foundation::core::Point;
use crate::render::painter::Painter;
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 4;
const BARS: [f64; 5] = [12.0, 20.0, 18.0, 34.0, 56.0];
const BAR_WIDTH: f64 = 12.0;
const BAR_GAP: f64 = 6.0;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);
    let floor = 32.0;
    let left = -46.0;

    let axes = phase(progress, 0.0, 0.2);
    let corner = sk.at(left - 4.0, floor);
    sk.line(corner, sk.at(left - 4.0, -40.0), axes, palette.ink, 1.6);
    sk.line(corner, sk.at(54.0, floor), axes, palette.ink, 1.6);

    let grow = phase(progress, 0.15, 0.75);
    let mut tops = Vec::with_capacity(BARS.len());
    for (i, h) in BARS.iter().enumerate() {
        let n = BARS.len() as f64;
        let bar = phase(grow, i as f64 / (n + 1.0), (i as f64 + 2.0) / (n + 1.0));
        let x0 = left + i as f64 * (BAR_WIDTH + BAR_GAP);
        let top = floor - h * bar;
        tops.push(sk.at(x0 + BAR_WIDTH * 0.5, top - 6.0));
        if bar <= 0.0 {
            continue;
        }
        let outline = sk.rect(x0, top, x0 + BAR_WIDTH, floor);
        let color = if i + 1 == BARS.len() { palette.accent } else { palette.ink };
        sk.fill(&outline, color.fade(0.25));
        sk.outline(&outline, 1.0, color, 1.2);
    }

    // Trend arrow over the bar tops.
    let arrow = phase(progress, 0.6, 0.95);
    sk.polyline(&tops, arrow, palette.warm, 2.0);
    if arrow >= 1.0
        && let Some((&tip, rest)) = tops.split_last()
        && let Some(&prev) = rest.last()
    {
        let d = (tip - prev).normalize();
        let n = d.turn_90();
        let back = tip - d * 8.0;
        sk.fill(&[tip, back + n * 4.5, back - n * 4.5], palette.warm);
    }

    // Exit marker: a ring around the final bar top.
    let ring = phase(progress, 0.85, 1.0);
    if let Some(&tip) = tops.last() {
        sk.painter().stroke_arc(
            tip,
            11.0,
            -std::f64::consts::FRAC_PI_2,
            std::f64::consts::TAU * ring,
            palette.accent,
            1.4,
        );
    }
}
