//! Stage 3: a garage whose door rolls up to let a rocket lift off.

use crate::config::hero::Palette;
use crate::foundation::core::{Point, Rect};
use crate::foundation::math::lerp;
use crate::render::painter::{GradientStop, Painter};
use crate::stages::sketch::{Sketch, phase};

const STAGE: usize = 3;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);

    let build = phase(progress, 0.0, 0.3);
    let shell = [
        sk.at(-48.0, 34.0),
        sk.at(-48.0, -6.0),
        sk.at(0.0, -30.0),
        sk.at(48.0, -6.0),
        sk.at(48.0, 34.0),
    ];
    sk.polyline(&shell, build, palette.ink, 2.0);
    sk.line(sk.at(-60.0, 34.0), sk.at(60.0, 34.0), build, palette.ink.fade(0.6), 1.0);

    // Door slats roll up.
    let door = phase(progress, 0.25, 0.45);
    let door_top = 30.0 * door;
    let slats = 4;
    for i in 0..slats {
        let y = 2.0 + door_top + 8.0 * i as f64;
        if y >= 34.0 {
            break;
        }
        sk.line(sk.at(-30.0, y), sk.at(30.0, y), build, palette.ink.fade(0.7), 1.2);
    }
    sk.line(sk.at(-30.0, 2.0), sk.at(-30.0, 34.0), build, palette.ink, 1.5);
    sk.line(sk.at(30.0, 2.0), sk.at(30.0, 34.0), build, palette.ink, 1.5);

    // Rocket.
    let launch = phase(progress, 0.45, 1.0);
    let show = phase(progress, 0.35, 0.45);
    if show <= 0.0 {
        return;
    }
    let ease = launch * launch;
    let base_y = lerp(30.0, -70.0, ease);
    let body = [
        sk.at(0.0, base_y - 30.0),
        sk.at(7.0, base_y - 18.0),
        sk.at(7.0, base_y),
        sk.at(-7.0, base_y),
        sk.at(-7.0, base_y - 18.0),
    ];

    if launch > 0.0 {
        let flicker = sk.jitter().abs();
        let flame = sk.at(0.0, base_y + 6.0 + 4.0 * flicker);
        sk.painter().fill_radial(
            flame,
            8.0 + 10.0 * launch,
            &[
                GradientStop::new(0.0, palette.warm),
                GradientStop::new(0.5, palette.warm.fade(0.45)),
                GradientStop::new(1.0, palette.warm.with_alpha(0.0)),
            ],
        );
        // Exhaust trail.
        let trail_top = sk.at(0.0, base_y + 6.0);
        let trail_bottom = sk.at(0.0, 30.0_f64.max(base_y + 6.0));
        sk.line(trail_top, trail_bottom, 1.0, palette.ink.fade(0.3 * launch), 3.0);
    }

    sk.fill(&body, palette.ink.fade(show));
    sk.outline(&body, show, palette.accent, 1.4);
    let fins = [
        sk.at(-7.0, base_y - 6.0),
        sk.at(-13.0, base_y + 2.0),
        sk.at(-7.0, base_y),
    ];
    sk.fill(&fins, palette.accent.fade(show));
    let fins = [
        sk.at(7.0, base_y - 6.0),
        sk.at(13.0, base_y + 2.0),
        sk.at(7.0, base_y),
    ];
    sk.fill(&fins, palette.accent.fade(show));
    let window = sk.at(0.0, base_y - 15.0);
    sk.painter().fill_circle(window, 2.6, palette.background);

    if launch >= 1.0 {
        let spark = sk.at(22.0, -78.0);
        let dot = Rect::new(spark.x - 1.0, spark.y - 1.0, spark.x + 1.0, spark.y + 1.0);
        sk.painter().fill_rect(dot, palette.warm);
    }
}
