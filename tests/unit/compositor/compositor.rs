use std::cell::Cell;

use super::*;
use crate::config::hero::Palette;
use crate::foundation::core::{Rgba8, Viewport};
use crate::render::recording::{DrawOp, RecordingPainter};

thread_local! {
    static SPY_CALLS: Cell<usize> = const { Cell::new(0) };
}

fn spy(_: &mut dyn Painter, _: &Palette, _: f64, _: Point) {
    SPY_CALLS.with(|c| c.set(c.get() + 1));
}

const SPY_SLOT: usize = 5;

fn spy_catalog() -> Vec<Stage> {
    (0..8)
        .map(|i| {
            if i == SPY_SLOT {
                Stage::new(i, &["spy"], spy)
            } else {
                Stage::placeholder(i, &["blank"])
            }
        })
        .collect()
}

fn desktop() -> Surface {
    Surface::with_viewport(Viewport::new(1280.0, 800.0))
}

fn frame(c: &Compositor, s: &Surface, t: f64) -> (RecordingPainter, FrameReport) {
    let mut p = RecordingPainter::new();
    let report = c.draw_frame(&mut p, s, FrameTime::settled(t));
    (p, report)
}

#[test]
fn culled_stage_procedure_never_runs() {
    let c = Compositor::with_catalog(HeroConfig::default(), Theme::default(), spy_catalog());
    let s = desktop();
    let mut seen_culled = false;
    let mut seen_drawn = false;
    for step in 0..400 {
        let t = f64::from(step) * 100.0;
        SPY_CALLS.with(|c| c.set(0));
        let (_, report) = frame(&c, &s, t);
        let calls = SPY_CALLS.with(Cell::get);

        let layout = c.layout(&s, t);
        let y = layout.baseline + SPY_SLOT as f64 * layout.params.stage_spacing;
        let margin = c.config().layout.cull_margin;
        let outside = y < -margin || y > 800.0 + margin;

        if outside {
            seen_culled = true;
            assert_eq!(calls, 0, "t={t} y={y}");
            assert!(report.culled.contains(&SPY_SLOT));
        } else {
            seen_drawn = true;
            assert_eq!(calls, 1, "t={t} y={y}");
            assert!(report.drawn.contains(&SPY_SLOT));
        }
    }
    assert!(seen_culled && seen_drawn);
}

#[test]
fn empty_surface_is_a_no_op_frame() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let (p, report) = frame(&c, &Surface::new(), 1234.0);
    assert_eq!(p.command_count(), 0);
    assert!(report.drawn.is_empty());
    assert!(report.culled.is_empty());
}

#[test]
fn frame_starts_with_the_trail_fade() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let (p, _) = frame(&c, &desktop(), 5000.0);
    let palette = Palette::default();
    assert_eq!(
        p.commands()[0].op,
        DrawOp::Fade {
            color: palette.background,
            alpha: palette.trail_alpha,
        }
    );
    assert!(palette.trail_alpha < 1.0);
}

#[test]
fn frames_one_period_apart_issue_identical_commands() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let s = desktop();
    let d = c.config().timing.duration_ms;
    for t in [0.0, 777.0, 15_000.0, 39_984.0] {
        let (a, ra) = frame(&c, &s, t);
        let (b, rb) = frame(&c, &s, t + d);
        let (e, _) = frame(&c, &s, t + 5.0 * d);
        assert_eq!(ra, rb);
        assert_eq!(a.commands(), b.commands(), "t={t}");
        assert_eq!(a.commands(), e.commands(), "t={t}");
    }
}

#[test]
fn frames_are_finite_and_balanced() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    for (w, h) in [(1280.0, 800.0), (400.0, 700.0), (3.0, 2.0)] {
        let s = Surface::with_viewport(Viewport::new(w, h));
        for step in 0..80 {
            let (p, _) = frame(&c, &s, f64::from(step) * 500.0);
            assert!(p.all_finite(), "{w}x{h} step {step}");
            assert_eq!(p.depth(), 0);
            assert_eq!(p.unbalanced_restores(), 0);
        }
    }
}

fn caption_origin(p: &RecordingPainter, text: &str) -> Point {
    p.commands()
        .iter()
        .find_map(|cmd| match &cmd.op {
            DrawOp::Text { text: t, origin, .. } if t == text => Some(*origin),
            _ => None,
        })
        .unwrap()
}

#[test]
fn caption_plate_falls_back_to_estimated_width() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let s = desktop();
    let t = 8000.0;
    let layout = c.layout(&s, t);
    let first = layout.placements.iter().find(|p| p.index == 0).unwrap();
    let size = layout.params.font_size;

    let (p, _) = frame(&c, &s, t);
    let origin = caption_origin(&p, "Born in Helsinki");
    let expected = first.anchor.x - estimate_text_width("Born in Helsinki", size, 0.0) * 0.5;
    assert!((origin.x - expected).abs() < 1e-9);

    let mut measured = RecordingPainter::new().with_char_advance(0.5);
    c.draw_frame(&mut measured, &s, FrameTime::settled(t));
    let origin = caption_origin(&measured, "Born in Helsinki");
    let expected = first.anchor.x - 16.0 * size * 0.5 * 0.5;
    assert!((origin.x - expected).abs() < 1e-9);
}

#[test]
fn two_line_captions_stack() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let s = desktop();
    let t = 8000.0;
    let (p, _) = frame(&c, &s, t);
    let a = caption_origin(&p, "School years");
    let b = caption_origin(&p, "books & math");
    assert!(b.y > a.y);
}

#[test]
fn title_enters_after_start_and_stays() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let s = desktop();
    let title = &c.config().title;
    let count = |since_start_ms: f64| {
        let mut p = RecordingPainter::new();
        c.draw_frame(
            &mut p,
            &s,
            FrameTime {
                timestamp_ms: 1000.0,
                since_start_ms,
            },
        );
        p.texts().filter(|t| *t == title.text).count()
    };
    assert_eq!(count(0.0), 0);
    assert_eq!(count(title.intro_delay_ms), 0);
    assert_eq!(count(title.intro_delay_ms + 1.0), 1);
    assert_eq!(count(f64::INFINITY), 1);
}

#[test]
fn title_rises_into_place() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let s = desktop();
    let title = c.config().title.clone();
    let y_at = |since_start_ms: f64| {
        let mut p = RecordingPainter::new();
        c.draw_frame(
            &mut p,
            &s,
            FrameTime {
                timestamp_ms: 0.0,
                since_start_ms,
            },
        );
        caption_origin(&p, &title.text).y
    };
    let early = y_at(title.intro_delay_ms + 100.0);
    let settled = y_at(f64::INFINITY);
    assert!(early > settled);
    assert!((settled - title.top).abs() < 1e-9);
}

#[test]
fn overlay_washes_the_scene_under_the_title() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let (p, _) = frame(&c, &desktop(), 8000.0);
    let cmds = p.commands();
    let palette = Palette::default();

    let overlays: Vec<usize> = cmds
        .iter()
        .enumerate()
        .filter(|(_, cmd)| matches!(cmd.op, DrawOp::FillLinear { .. }))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(overlays.len(), 1);
    let at = overlays[0];
    assert_eq!(
        cmds[at].op,
        DrawOp::FillLinear {
            rect: Rect::new(0.0, 0.0, 1280.0, 800.0),
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 800.0),
            stops: vec![
                GradientStop::new(0.0, palette.overlay_top),
                GradientStop::new(1.0, palette.overlay_bottom),
            ],
        }
    );

    let title_at = cmds
        .iter()
        .position(|cmd| matches!(&cmd.op, DrawOp::Text { text, .. } if *text == c.config().title.text))
        .unwrap();
    assert!(title_at > at);
    assert!(cmds[..at]
        .iter()
        .all(|cmd| !matches!(&cmd.op, DrawOp::Text { text, .. } if *text == c.config().title.text)));

    let mut cfg = HeroConfig::default();
    cfg.palette.overlay_top = Rgba8::BLACK.with_alpha(0.0);
    cfg.palette.overlay_bottom = Rgba8::BLACK.with_alpha(0.0);
    let c = Compositor::new(cfg, Theme::default());
    let (p, _) = frame(&c, &desktop(), 8000.0);
    assert!(!p.commands().iter().any(|cmd| matches!(cmd.op, DrawOp::FillLinear { .. })));
}

#[test]
fn desktop_title_is_tracked_with_a_vertical_fade() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let (p, _) = frame(&c, &desktop(), 8000.0);
    let title = &c.config().title;
    let (size, tracking, fill, origin) = p
        .commands()
        .iter()
        .find_map(|cmd| match &cmd.op {
            DrawOp::Text {
                text,
                size,
                tracking,
                fill,
                origin,
            } if *text == title.text => Some((*size, *tracking, *fill, *origin)),
            _ => None,
        })
        .unwrap();
    assert_eq!(size, 136.0);
    assert_eq!(tracking, -2.0);
    assert_eq!(
        fill,
        TextFill::Vertical {
            top: Rgba8::WHITE,
            bottom: Rgba8::WHITE.with_alpha(0.9),
        }
    );
    let width = estimate_text_width(&title.text, 136.0, -2.0);
    assert!((origin.x - (640.0 - width * 0.5)).abs() < 1e-9);
}

#[test]
fn narrow_title_wraps_between_words() {
    let c = Compositor::new(HeroConfig::default(), Theme::default());
    let s = Surface::with_viewport(Viewport::new(400.0, 700.0));
    let (p, _) = frame(&c, &s, 8000.0);
    let title = &c.config().title;
    assert_eq!(p.texts().filter(|t| *t == title.text).count(), 0);

    let first = caption_origin(&p, "SISU");
    let second = caption_origin(&p, "Ventures");
    assert!((first.y - title.top).abs() < 1e-9);
    assert!((second.y - first.y - 72.0 * title.line_height).abs() < 1e-9);
    let w = estimate_text_width("Ventures", 72.0, -1.0);
    assert!((second.x - (200.0 - w * 0.5)).abs() < 1e-9);
    assert!(second.x >= title.side_margin);
}
