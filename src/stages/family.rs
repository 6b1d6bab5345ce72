//! Stage 5: a house; windows light up and the chimney smokes.

use crate::config::hero::Palette;
use crate::foundation::core::{Point, Rect};
use crate::render::painter::Painter;
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 5;
const PUFFS: usize = 3;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);

    let walls = phase(progress, 0.0, 0.3);
    let body = sk.rect(-40.0, -8.0, 40.0, 34.0);
    sk.outline(&body, walls, palette.ink, 2.0);

    let roof = phase(progress, 0.2, 0.45);
    let ridge = [sk.at(-48.0, -6.0), sk.at(0.0, -40.0), sk.at(48.0, -6.0)];
    sk.polyline(&ridge, roof, palette.ink, 2.0);
    let chimney = [
        sk.at(20.0, -22.0),
        sk.at(20.0, -36.0),
        sk.at(30.0, -36.0),
        sk.at(30.0, -15.0),
    ];
    sk.polyline(&chimney, roof, palette.ink, 1.6);

    let door = phase(progress, 0.35, 0.5);
    let door_outline = sk.rect(-8.0, 10.0, 8.0, 34.0);
    sk.outline(&door_outline, door, palette.ink, 1.4);

    // Windows light one after another.
    let lights = phase(progress, 0.45, 0.8);
    for (i, x) in [-30.0, 16.0].into_iter().enumerate() {
        let on = phase(lights, i as f64 * 0.5, i as f64 * 0.5 + 0.5);
        let pane = Rect::from_points(sk.at(x, 0.0), sk.at(x + 14.0, 12.0));
        if on > 0.0 {
            sk.painter().fill_rect(pane, palette.warm.fade(0.85 * on));
        }
        let frame = sk.rect(x, 0.0, x + 14.0, 12.0);
        sk.outline(&frame, door, palette.ink.fade(0.8), 1.0);
    }

    // Smoke puffs drift up and thin out.
    let smoke = phase(progress, 0.7, 1.0);
    if smoke > 0.0 {
        for i in 0..PUFFS {
            let t = (smoke + i as f64 / PUFFS as f64).fract();
            let wobble = sk.jitter() * 1.5;
            let c = sk.at(25.0 + 6.0 * t + wobble, -40.0 - 26.0 * t);
            let alpha = 0.5 * smoke * (1.0 - t);
            sk.painter()
                .stroke_circle(c, 3.0 + 4.0 * t, palette.ink.fade(alpha), 1.2);
        }
    }

    // Two figures out front once the lights are on.
    let figures = phase(progress, 0.8, 1.0);
    if figures > 0.0 {
        for x in [-52.0_f64, 52.0] {
            let head = sk.at(x, 20.0);
            sk.painter().fill_circle(head, 2.8, palette.accent.fade(figures));
            sk.line(sk.at(x, 24.0), sk.at(x, 34.0), figures, palette.accent, 1.6);
        }
    }
}
