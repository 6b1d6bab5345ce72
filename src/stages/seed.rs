//! Stage 6: a seed sprouts and grows into a tree.

use std::f64::consts::PI;

use crate::config::hero::Palette;
use crate::foundation::core::{BezPath, Point};
use crate::render::painter::{GradientStop, Painter, TOLERANCE};
use kurbo::Shape;
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 6;
/// Canopy blobs as `(dx, dy, radius)` around the top of the trunk.
const CANOPY: [(f64, f64, f64); 5] = [
    (0.0, -8.0, 20.0),
    (-18.0, 2.0, 14.0),
    (18.0, 2.0, 14.0),
    (-10.0, -22.0, 13.0),
    (12.0, -20.0, 12.0),
];

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);
    let ground = 34.0;

    let soil = phase(progress, 0.0, 0.15);
    sk.line(sk.at(-56.0, ground), sk.at(56.0, ground), soil, palette.ink.fade(0.6), 1.2);

    // Seed, swelling before it cracks.
    let swell = phase(progress, 0.0, 0.2);
    let seed = sk.at(0.0, ground - 3.0);
    if swell > 0.0 {
        let path = kurbo::Ellipse::new(seed, (4.0 + swell, 2.5 + swell), 0.0).to_path(TOLERANCE);
        sk.painter().fill_path(&path, palette.warm);
    }

    // Trunk grows from the seed.
    let grow = phase(progress, 0.15, 0.7);
    let top_y = ground - 3.0 - 46.0 * grow;
    let trunk_top = sk.at(0.0, top_y);
    sk.line(seed, trunk_top, 1.0_f64.min(grow * 10.0), palette.ink, 1.0 + 3.0 * grow);

    // First leaves, then branches.
    let leaves = phase(progress, 0.2, 0.45);
    if leaves > 0.0 && grow < 1.0 {
        for side in [-1.0_f64, 1.0] {
            let mut leaf = BezPath::new();
            let base = trunk_top;
            let tip = Point::new(base.x + side * 12.0 * leaves, base.y - 6.0 * leaves);
            leaf.move_to(base);
            leaf.quad_to(Point::new(base.x + side * 6.0 * leaves, base.y - 10.0 * leaves), tip);
            leaf.quad_to(Point::new(base.x + side * 8.0 * leaves, base.y + 2.0), base);
            sk.painter().fill_path(&leaf, palette.accent.fade(0.9));
        }
    }
    let branches = phase(progress, 0.5, 0.75);
    for (i, side) in [-1.0_f64, 1.0].into_iter().enumerate() {
        let from = sk.at(0.0, top_y + 14.0 + 6.0 * i as f64);
        let to = sk.at(side * 18.0, top_y + 2.0 + 4.0 * i as f64);
        sk.line(from, to, branches, palette.ink, 1.8);
    }

    // Canopy fills in blob by blob.
    let canopy = phase(progress, 0.6, 1.0);
    for (i, (dx, dy, r)) in CANOPY.iter().enumerate() {
        let k = phase(canopy, i as f64 * 0.12, i as f64 * 0.12 + 0.5);
        if k <= 0.0 {
            continue;
        }
        let c = sk.at(*dx, top_y + dy);
        sk.painter().fill_radial(
            c,
            r * k,
            &[
                GradientStop::new(0.0, palette.accent.fade(0.55)),
                GradientStop::new(1.0, palette.accent.fade(0.15)),
            ],
        );
        sk.painter().stroke_arc(c, r * k, PI, PI * k, palette.ink.fade(0.5), 1.0);
    }

    // Fruit once the tree is grown.
    let fruit = phase(progress, 0.9, 1.0);
    if fruit > 0.0 {
        for (dx, dy) in [(-12.0, -4.0), (10.0, -14.0), (4.0, 4.0)] {
            let c = sk.at(dx, top_y + dy);
            sk.painter().fill_circle(c, 2.5 * fruit, palette.warm);
        }
    }
}
