use super::*;
use crate::driver::offline::QueuedScheduler;

fn mount(w: f64, h: f64) -> HeroView<QueuedScheduler> {
    HeroView::mount(
        Viewport::new(w, h),
        HeroConfig::default(),
        Theme::default(),
        CpuPainter::new(),
        QueuedScheduler::new(),
    )
    .unwrap()
}

fn pump(view: &mut HeroView<QueuedScheduler>, ts: f64) -> bool {
    let req = view.scheduler_mut().pop().unwrap();
    view.on_frame(req, ts)
}

#[test]
fn mount_requests_the_first_frame() {
    let view = mount(64.0, 48.0);
    assert!(view.is_mounted());
    assert_eq!(view.driver().scheduler().outstanding(), 1);
    assert!(view.last_frame().is_none());
}

#[test]
fn each_frame_presents_and_schedules_the_next() {
    let mut view = mount(64.0, 48.0);
    assert!(pump(&mut view, 0.0));
    assert!(pump(&mut view, 16.0));
    assert_eq!(view.frames_drawn(), 2);
    assert_eq!(view.driver().scheduler().outstanding(), 1);
    let frame = view.last_frame().unwrap();
    assert_eq!((frame.width, frame.height), (64, 48));
    assert!(view.last_report().unwrap().progress > 0.0);
}

#[test]
fn stale_request_is_ignored() {
    let mut view = mount(32.0, 32.0);
    let first = view.scheduler_mut().pop().unwrap();
    assert!(view.on_frame(first, 0.0));
    assert!(!view.on_frame(first, 16.0));
    assert_eq!(view.frames_drawn(), 1);
}

#[test]
fn unmount_stops_drawing_and_ignores_resize() {
    let mut view = mount(32.0, 32.0);
    let pending = view.driver().pending().unwrap();
    view.unmount();
    assert!(!view.is_mounted());
    assert!(!view.on_frame(pending, 0.0));
    assert_eq!(view.frames_drawn(), 0);
    assert!(!view.on_resize(Viewport::new(200.0, 100.0)));
    assert_eq!(view.surface().pixel_width(), 32);
    assert_eq!(view.driver().scheduler().cancelled(), 1);
    view.unmount();
}

#[test]
fn empty_viewport_runs_the_loop_without_presenting() {
    let mut view = mount(0.0, 0.0);
    assert!(pump(&mut view, 0.0));
    assert_eq!(view.frames_drawn(), 0);
    assert!(view.last_frame().is_none());

    assert!(view.on_resize(Viewport::new(20.0, 10.0)));
    assert!(pump(&mut view, 16.0));
    assert_eq!(view.frames_drawn(), 1);
}

#[test]
fn invalid_config_fails_to_mount() {
    let mut cfg = HeroConfig::default();
    cfg.grid.cell_size = -1.0;
    let err = HeroView::mount(
        Viewport::new(10.0, 10.0),
        cfg,
        Theme::default(),
        CpuPainter::new(),
        QueuedScheduler::new(),
    );
    assert!(err.is_err());
}
