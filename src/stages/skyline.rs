//! Stage 7: a city skyline rising, its windows lighting up.

use crate::config::hero::Palette;
use crate::foundation::core::{Point, Rect};
use crate::foundation::math::Rng64;
use crate::render::painter::Painter;
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 7;
/// Buildings as `(left, width, height)`.
const TOWERS: [(f64, f64, f64); 6] = [
    (-58.0, 16.0, 34.0),
    (-40.0, 20.0, 56.0),
    (-18.0, 14.0, 42.0),
    (-2.0, 22.0, 70.0),
    (22.0, 16.0, 48.0),
    (40.0, 18.0, 30.0),
];
const WINDOW: f64 = 3.0;
const WINDOW_PITCH: f64 = 7.0;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);
    let ground = 34.0;

    let street = phase(progress, 0.0, 0.15);
    sk.line(sk.at(-64.0, ground), sk.at(64.0, ground), street, palette.ink.fade(0.6), 1.2);

    let rise = phase(progress, 0.1, 0.6);
    let lights = phase(progress, 0.55, 1.0);
    // Window thresholds stay fixed for the whole reveal so lights only ever switch on.
    let mut order = Rng64::keyed(STAGE as u64, u64::MAX);

    for (i, (left, width, height)) in TOWERS.iter().enumerate() {
        let n = TOWERS.len() as f64;
        let t = phase(rise, i as f64 / (2.0 * n), (i as f64 + n) / (2.0 * n));
        let top = ground - height * t;
        if t > 0.0 {
            let body = sk.rect(*left, top, left + width, ground);
            sk.fill(&body, palette.background.fade(0.85));
            sk.outline(&body, 1.0, palette.ink, 1.4);
        }
        if i == 3 && t >= 1.0 {
            let mast_base = sk.at(left + width * 0.5, top);
            let mast_top = sk.at(left + width * 0.5, top - 12.0);
            sk.line(mast_base, mast_top, 1.0, palette.ink, 1.2);
            if lights > 0.0 {
                sk.painter().fill_circle(mast_top, 1.8, palette.accent);
            }
        }

        let cols = ((width - 4.0) / WINDOW_PITCH).floor().max(0.0) as usize;
        let rows = ((height - 6.0) / WINDOW_PITCH).floor().max(0.0) as usize;
        for r in 0..rows {
            for c in 0..cols {
                let threshold = order.next_f64_01();
                if t < 1.0 || lights <= threshold {
                    continue;
                }
                let x = left + 3.0 + c as f64 * WINDOW_PITCH;
                let y = ground - 6.0 - r as f64 * WINDOW_PITCH - WINDOW;
                let pane = Rect::from_points(sk.at(x, y), sk.at(x + WINDOW, y + WINDOW));
                sk.painter().fill_rect(pane, palette.warm.fade(0.9));
            }
        }
    }
}
