use super::*;

const STAGES: usize = 8;

fn layout_at(t_ms: f64, w: f64, h: f64) -> FrameLayout {
    let cfg = HeroConfig::default();
    let p = global_progress(t_ms, cfg.timing.duration_ms);
    FrameLayout::compute(&cfg, p, w, h, STAGES)
}

#[test]
fn global_progress_wraps_into_unit_interval() {
    assert_eq!(global_progress(0.0, 40_000.0), 0.0);
    assert_eq!(global_progress(40_000.0, 40_000.0), 0.0);
    assert_eq!(global_progress(10_000.0, 40_000.0), 0.25);
    assert_eq!(global_progress(90_000.0, 40_000.0), 0.25);
    assert!((global_progress(-10_000.0, 40_000.0) - 0.75).abs() < 1e-12);

    for t in [39_999.999_999, -1e-300, 1e15, 123.456] {
        let p = global_progress(t, 40_000.0);
        assert!((0.0..1.0).contains(&p), "t={t} p={p}");
    }
}

#[test]
fn global_progress_degenerate_inputs() {
    assert_eq!(global_progress(f64::NAN, 40_000.0), 0.0);
    assert_eq!(global_progress(f64::INFINITY, 40_000.0), 0.0);
    assert_eq!(global_progress(500.0, 0.0), 0.0);
    assert_eq!(global_progress(500.0, -10.0), 0.0);
}

#[test]
fn first_frame_starts_stage_zero_at_its_minimum() {
    let l = layout_at(0.0, 1280.0, 800.0);
    assert_eq!(l.progress, 0.0);
    let first = l.placements.first().unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(first.fade_progress, 0.0);
    assert_eq!(first.local_progress, 0.0);
    assert_eq!(l.baseline, 800.0 + HeroConfig::default().layout.vertical_lead);
}

#[test]
fn breakpoint_switches_to_compact_constants() {
    let cfg = HeroConfig::default();
    let wide = layout_at(8_000.0, 1024.0, 800.0);
    let narrow = layout_at(8_000.0, 400.0, 800.0);

    assert!(!wide.params.is_compact);
    assert!(narrow.params.is_compact);

    let d = cfg.layout.desktop;
    let c = cfg.layout.compact;
    assert_eq!(wide.params.stage_spacing, d.stage_spacing);
    assert_eq!(narrow.params.stage_spacing, c.stage_spacing);
    assert_eq!(wide.params.offset_x, d.offset_x);
    assert_eq!(narrow.params.offset_x, c.offset_x);
    assert_eq!(wide.params.font_size, d.font_size);
    assert_eq!(narrow.params.font_size, c.font_size);
    assert_eq!(wide.params.scene_scale, d.scene_scale);
    assert_eq!(narrow.params.scene_scale, c.scene_scale);

    let x = |l: &FrameLayout, i: usize| {
        l.placements
            .iter()
            .find(|p| p.index == i)
            .map(|p| p.anchor.x)
            .unwrap()
    };
    assert_eq!(x(&wide, 0), 512.0 - d.offset_x);
    assert_eq!(x(&wide, 1), 512.0 + d.offset_x);
    assert_eq!(x(&narrow, 0), 100.0);
    assert_eq!(x(&narrow, 1), 300.0);
}

#[test]
fn breakpoint_width_itself_is_compact() {
    let cfg = HeroConfig::default();
    assert_eq!(cfg.layout.breakpoint, 768.0);

    let at = LayoutParams::for_width(&cfg, 768.0);
    assert!(at.is_compact);
    assert_eq!(at.title_size, cfg.title.size_compact);
    assert_eq!(at.title_tracking, cfg.title.tracking_compact);
    assert_eq!(at.font_size, cfg.layout.compact.font_size);
    assert_eq!(at.stage_spacing, cfg.layout.compact.stage_spacing);

    let above = LayoutParams::for_width(&cfg, 769.0);
    assert!(!above.is_compact);
    assert_eq!(above.title_size, cfg.title.size_desktop);
    assert_eq!(above.title_tracking, cfg.title.tracking_desktop);
    assert_eq!(above.font_size, cfg.layout.desktop.font_size);
}

#[test]
fn one_tick_later_scrolls_up() {
    for t in [0.0, 12_345.0, 39_000.0] {
        let a = layout_at(t, 1280.0, 800.0);
        let b = layout_at(t + 16.0, 1280.0, 800.0);
        assert!(b.progress > a.progress, "t={t}");
        assert!(b.baseline < a.baseline, "t={t}");
    }
}

#[test]
fn culled_stages_lie_outside_the_margin_band() {
    let cfg = HeroConfig::default();
    let margin = cfg.layout.cull_margin;
    let h = 800.0;
    for step in 0..200 {
        let l = layout_at(f64::from(step) * 200.0, 1280.0, h);
        assert_eq!(l.placements.len() + l.culled.len(), STAGES);
        for i in &l.culled {
            let y = l.baseline + *i as f64 * l.params.stage_spacing;
            assert!(y < -margin || y > h + margin, "stage {i} at {y}");
        }
        for p in &l.placements {
            assert!(p.stage_y >= -margin && p.stage_y <= h + margin);
        }
    }
}

#[test]
fn every_stage_is_shown_at_some_point_in_the_cycle() {
    let mut seen = [false; STAGES];
    for step in 0..1000 {
        let l = layout_at(f64::from(step) * 40.0, 1280.0, 800.0);
        for p in &l.placements {
            seen[p.index] = true;
        }
    }
    assert!(seen.iter().all(|s| *s), "{seen:?}");
}

#[test]
fn stages_alternate_sides() {
    let l = layout_at(8_000.0, 1280.0, 800.0);
    assert!(l.placements.len() >= 2);
    for p in &l.placements {
        assert_eq!(p.side, Side::for_index(p.index));
        match p.side {
            Side::Left => assert!(p.anchor.x < l.center_x),
            Side::Right => assert!(p.anchor.x > l.center_x),
        }
    }
}

#[test]
fn progress_ramps_stay_in_unit_interval() {
    for step in 0..400 {
        let l = layout_at(f64::from(step) * 100.0, 900.0, 600.0);
        for p in &l.placements {
            assert!((0.0..=1.0).contains(&p.fade_progress));
            assert!((0.0..=1.0).contains(&p.local_progress));
        }
    }
}

#[test]
fn runner_stays_between_spine_top_and_bottom() {
    let cfg = HeroConfig::default();
    for step in 0..500 {
        let l = layout_at(f64::from(step) * 80.0, 1280.0, 720.0);
        assert_eq!(l.runner.x, l.center_x);
        assert!(l.runner.y >= l.spine_top);
        assert!(l.runner.y <= 720.0 - cfg.runner.glow_radius);
    }
}

#[test]
fn layout_is_a_pure_function() {
    let a = layout_at(21_000.0, 1100.0, 700.0);
    let b = layout_at(21_000.0, 1100.0, 700.0);
    let c = layout_at(21_000.0 + 40_000.0 * 3.0, 1100.0, 700.0);
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn grid_offset_is_within_one_cell() {
    let cfg = HeroConfig::default();
    for step in 0..300 {
        let l = layout_at(f64::from(step) * 133.0, 640.0, 480.0);
        assert!(l.grid_offset >= 0.0 && l.grid_offset < cfg.grid.cell_size);
    }
}

#[test]
fn tiny_surface_keeps_runner_finite() {
    let l = layout_at(5_000.0, 10.0, 10.0);
    assert!(l.runner.y.is_finite());
    assert!(l.spine_top <= 10.0);
}
