use super::*;
use crate::render::recording::RecordingPainter;

fn record(stage: &Stage, progress: f64) -> RecordingPainter {
    let mut p = RecordingPainter::new();
    stage.render(&mut p, &Palette::default(), progress, Point::new(120.0, 340.0));
    p
}

#[test]
fn catalog_is_ordered_with_short_captions() {
    let stages = catalog();
    assert_eq!(stages.len(), 8);
    for (i, s) in stages.iter().enumerate() {
        assert_eq!(s.id, i);
        assert!(matches!(s.caption.len(), 1 | 2), "stage {i}");
        assert!(s.caption.iter().all(|l| !l.is_empty()));
    }
    assert_eq!(stages[0].caption, ["Born in Helsinki"]);
    assert_eq!(stages[7].caption, ["SISU Ventures"]);
}

#[test]
fn boundary_progress_stays_finite() {
    for s in catalog() {
        for t in [0.0, 1.0] {
            let p = record(s, t);
            assert!(p.all_finite(), "stage {} at {t}", s.id);
        }
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for s in catalog() {
        assert_eq!(record(s, f64::NAN).commands(), record(s, 0.0).commands());
        assert_eq!(record(s, 7.0).commands(), record(s, 1.0).commands());
        assert_eq!(record(s, -3.0).commands(), record(s, 0.0).commands());
    }
}

#[test]
fn procedures_are_deterministic() {
    for s in catalog() {
        for step in 0..=20 {
            let t = f64::from(step) / 20.0;
            assert_eq!(record(s, t).commands(), record(s, t).commands(), "stage {}", s.id);
        }
    }
}

#[test]
fn procedures_restore_painter_state() {
    for s in catalog() {
        for step in 0..=10 {
            let p = record(s, f64::from(step) / 10.0);
            assert_eq!(p.depth(), 0, "stage {}", s.id);
            assert_eq!(p.unbalanced_restores(), 0, "stage {}", s.id);
            assert!(p.max_depth() >= 1);
            assert!(p.all_finite());
        }
    }
}

#[test]
fn full_reveal_draws_more_than_the_start() {
    for s in catalog() {
        let start = record(s, 0.0).command_count();
        let end = record(s, 1.0).command_count();
        assert!(end > start, "stage {}: {start} -> {end}", s.id);
        assert!(end > 0);
    }
}

#[test]
fn placeholder_is_a_blank_valid_stage() {
    let s = Stage::placeholder(3, &["Coming soon"]);
    let p = record(&s, 0.5);
    assert_eq!(p.command_count(), 0);
    assert_eq!(p.depth(), 0);
    assert_eq!(s.id, 3);
}
