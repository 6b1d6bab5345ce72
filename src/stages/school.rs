//! Stage 1: an open book whose pages turn, with a bit of arithmetic floating above.

use crate::config::hero::Palette;
use crate::foundation::core::{BezPath, Point};
use crate::render::painter::Painter;
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 1;
const TURNS: f64 = 3.0;
const TEXT_LINES: usize = 4;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);

    let open = phase(progress, 0.0, 0.3);
    let spine_top = sk.at(0.0, -14.0);
    let spine_bottom = sk.at(0.0, 30.0);
    let left = [
        spine_top,
        sk.at(-56.0 * open, -22.0),
        sk.at(-56.0 * open, 22.0),
        spine_bottom,
    ];
    let right = [
        spine_top,
        sk.at(56.0 * open, -22.0),
        sk.at(56.0 * open, 22.0),
        spine_bottom,
    ];
    if open > 0.0 {
        sk.fill(&left, palette.ink.fade(0.08));
        sk.fill(&right, palette.ink.fade(0.08));
    }
    sk.outline(&left, open, palette.ink, 1.6);
    sk.outline(&right, open, palette.ink, 1.6);

    // Ruled lines fill in as the pages are read.
    let read = phase(progress, 0.25, 0.9);
    for i in 0..TEXT_LINES {
        let y = -12.0 + 9.0 * i as f64;
        let line = phase(read, i as f64 / TEXT_LINES as f64, (i + 1) as f64 / TEXT_LINES as f64);
        let color = palette.ink.fade(0.6);
        sk.line(sk.at(-48.0, y), sk.at(-8.0, y + 3.0), line, color, 1.0);
        sk.line(sk.at(8.0, y + 3.0), sk.at(48.0, y), line, color, 1.0);
    }

    // Turning page: its free edge sweeps right to left once per turn.
    let turning = phase(progress, 0.3, 0.9);
    if turning > 0.0 && turning < 1.0 {
        let turn = (turning * TURNS).fract();
        let edge_x = 56.0 * (1.0 - 2.0 * turn);
        let lift = 18.0 * (std::f64::consts::PI * turn).sin();
        let mut page = BezPath::new();
        page.move_to(spine_top);
        page.quad_to(sk.at(edge_x * 0.5, -22.0 - lift), sk.at(edge_x, -22.0 - lift * 0.4));
        page.line_to(sk.at(edge_x, 22.0 - lift * 0.4));
        page.quad_to(sk.at(edge_x * 0.5, 22.0 - lift), spine_bottom);
        sk.painter().stroke_path(&page, palette.ink.fade(0.8), 1.2);
    }

    // "1 + 1 = 2" sketched as strokes.
    let math = phase(progress, 0.6, 1.0);
    let y = -42.0;
    let one = |sk: &Sketch<'_>, x: f64| (sk.at(x, y - 6.0), sk.at(x, y + 6.0));
    let (a, b) = one(&sk, -30.0);
    sk.line(a, b, math, palette.accent, 1.6);
    sk.line(sk.at(-20.0, y), sk.at(-10.0, y), math, palette.accent, 1.6);
    sk.line(sk.at(-15.0, y - 5.0), sk.at(-15.0, y + 5.0), math, palette.accent, 1.6);
    let (a, b) = one(&sk, -2.0);
    sk.line(a, b, math, palette.accent, 1.6);
    sk.line(sk.at(8.0, y - 3.0), sk.at(18.0, y - 3.0), math, palette.accent, 1.6);
    sk.line(sk.at(8.0, y + 3.0), sk.at(18.0, y + 3.0), math, palette.accent, 1.6);
    let two = [
        sk.at(25.0, y - 4.0),
        sk.at(29.0, y - 7.0),
        sk.at(34.0, y - 4.0),
        sk.at(25.0, y + 6.0),
        sk.at(35.0, y + 6.0),
    ];
    sk.polyline(&two, math, palette.warm, 1.6);
}
