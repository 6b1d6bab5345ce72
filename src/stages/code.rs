//! Stage 2: a monitor filling up with code, cursor blinking at the end of the last line.

use crate::config::hero::Palette;
use crate::foundation::core::{Point, Rect};
use crate::render::painter::Painter;
use crate::stages::sketch::{Sketch, bucket, phase};

const STAGE: usize = 2;

/// Indent and length (in character cells) of each code line.
const LINES: [(f64, f64); 6] = [(0.0, 9.0), (1.0, 12.0), (2.0, 8.0), (2.0, 11.0), (1.0, 4.0), (0.0, 2.0)];
const CELL: f64 = 4.5;

pub(crate) fn draw(p: &mut dyn Painter, palette: &Palette, progress: f64, origin: Point) {
    let mut sk = Sketch::begin(p, STAGE, progress, origin);

    let frame = phase(progress, 0.0, 0.3);
    let screen = sk.rect(-52.0, -42.0, 52.0, 22.0);
    if frame >= 1.0 {
        let inner = Rect::from_points(sk.at(-48.0, -38.0), sk.at(48.0, 18.0));
        sk.painter()
            .fill_rounded_rect(inner, 3.0, palette.background.fade(0.7));
    }
    sk.outline(&screen, frame, palette.ink, 2.0);

    let stand = phase(progress, 0.2, 0.35);
    sk.line(sk.at(0.0, 22.0), sk.at(0.0, 34.0), stand, palette.ink, 2.0);
    sk.line(sk.at(-18.0, 34.0), sk.at(18.0, 34.0), stand, palette.ink, 2.0);

    // Typing: total characters revealed grow linearly, line by line.
    let typed = phase(progress, 0.3, 0.95);
    let total: f64 = LINES.iter().map(|(_, len)| len).sum();
    let mut budget = typed * total;
    let mut cursor = sk.at(-42.0, -30.0);
    for (i, (indent, len)) in LINES.iter().enumerate() {
        if budget <= 0.0 {
            break;
        }
        let shown = budget.min(*len);
        budget -= shown;
        let y = -30.0 + 8.5 * i as f64;
        let x0 = -42.0 + indent * 2.0 * CELL;
        let x1 = x0 + shown * CELL;
        let color = if i % 3 == 1 { palette.accent } else { palette.ink.fade(0.75) };
        let start = sk.at(x0, y);
        let end = sk.at(x1, y);
        sk.painter().stroke_line(start, end, color, 2.4);
        cursor = sk.at(x1 + 2.0, y);
    }

    // Blink keyed to the jitter bucket so the same progress always shows the same state.
    if progress > 0.3 && bucket(progress) % 2 == 0 {
        let c = Rect::new(cursor.x, cursor.y - 3.5, cursor.x + 3.0, cursor.y + 3.5);
        sk.painter().fill_rect(c, palette.warm);
    }
}
