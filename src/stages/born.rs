//! Stage 0: a cradle under a rising sun.

use std::f64::consts::{PI, TAU};

use crate::config::hero::Palette;
use crate::foundation::core::Point;
use crate::render::painter::{GradientStop, Painter};
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 0;
const RAYS: usize = 8;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);

    let rise = phase(progress, 0.0, 0.6);
    let sun = sk.at(0.0, 10.0 - 42.0 * rise);
    if rise > 0.0 {
        let glow = 16.0 + 18.0 * rise;
        sk.painter().fill_radial(
            sun,
            glow,
            &[
                GradientStop::new(0.0, palette.warm.fade(0.55 * rise)),
                GradientStop::new(1.0, palette.warm.with_alpha(0.0)),
            ],
        );
        sk.painter().fill_circle(sun, 11.0 * rise, palette.warm);
    }

    let rays = phase(progress, 0.55, 1.0);
    for i in 0..RAYS {
        let a = -PI + (i as f64 + 0.5) * PI / RAYS as f64;
        let dir = (a.cos(), a.sin());
        let from = Point::new(sun.x + dir.0 * 16.0, sun.y + dir.1 * 16.0);
        let to = Point::new(sun.x + dir.0 * 26.0, sun.y + dir.1 * 26.0);
        sk.line(from, to, rays, palette.warm, 1.5);
    }

    // Horizon.
    let horizon = phase(progress, 0.0, 0.3);
    sk.line(sk.at(-60.0, 12.0), sk.at(60.0, 12.0), horizon, palette.ink.fade(0.5), 1.0);

    // Cradle basket: lower half circle, then the hood.
    let basket = phase(progress, 0.1, 0.55);
    let center = sk.at(0.0, 22.0);
    sk.painter()
        .stroke_arc(center, 30.0, 0.0, PI * basket, palette.ink, 2.0);
    let hood = phase(progress, 0.45, 0.75);
    sk.painter()
        .stroke_arc(center, 30.0, PI, -0.45 * PI * hood, palette.ink, 2.0);
    sk.line(sk.at(-30.0, 22.0), sk.at(30.0, 22.0), basket, palette.ink, 1.5);

    // Rocker.
    let rocker = phase(progress, 0.5, 0.8);
    let pivot = sk.at(0.0, -30.0);
    sk.painter().stroke_arc(
        pivot,
        82.0,
        0.5 * PI - 0.28 * rocker,
        0.56 * rocker,
        palette.ink,
        2.0,
    );

    // Blanket stitches.
    let blanket = phase(progress, 0.7, 1.0);
    for i in 0..4 {
        let x = -18.0 + 12.0 * i as f64;
        let j = sk.jitter();
        sk.line(
            sk.at(x, 30.0 + j),
            sk.at(x + 6.0, 36.0 + j),
            blanket,
            palette.accent,
            1.2,
        );
    }

    // A small star once the sun is up.
    let star = phase(progress, 0.85, 1.0);
    if star > 0.0 {
        let c = sk.at(48.0, -40.0);
        for k in 0..4 {
            let a = TAU * k as f64 / 4.0;
            let tip = Point::new(c.x + a.cos() * 5.0 * star, c.y + a.sin() * 5.0 * star);
            sk.line(c, tip, 1.0, palette.ink.fade(0.8), 1.0);
        }
    }
}
