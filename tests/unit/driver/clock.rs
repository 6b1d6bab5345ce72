use super::*;
use crate::driver::offline::QueuedScheduler;

#[test]
fn start_requests_exactly_one_frame() {
    let mut d = Driver::new(QueuedScheduler::new());
    assert!(!d.is_active());
    d.start();
    d.start();
    assert!(d.is_active());
    assert_eq!(d.scheduler().outstanding(), 1);
    assert_eq!(d.pending(), d.scheduler().peek());
}

#[test]
fn each_frame_schedules_the_next_before_returning() {
    let mut d = Driver::new(QueuedScheduler::new());
    d.start();
    let mut seen = Vec::new();
    for ts in [1000.0, 1016.0, 1032.0] {
        let req = d.scheduler_mut().pop().unwrap();
        assert!(d.on_frame(req, ts, |t| seen.push(t)));
        assert_eq!(d.scheduler().outstanding(), 1);
    }
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].since_start_ms, 0.0);
    assert_eq!(seen[2].since_start_ms, 32.0);
    assert_eq!(d.state().last_timestamp, Some(1032.0));
    assert_eq!(d.state().started_at, Some(1000.0));
}

#[test]
fn queued_callback_after_stop_does_not_draw() {
    let mut d = Driver::new(QueuedScheduler::new());
    d.start();
    // The host already dequeued the callback before stop arrived.
    let req = d.scheduler_mut().pop().unwrap();
    d.stop();

    let mut drew = false;
    assert!(!d.on_frame(req, 16.0, |_| drew = true));
    assert!(!drew);
    assert_eq!(d.scheduler().outstanding(), 0);
    assert_eq!(d.pending(), None);
}

#[test]
fn stop_cancels_the_pending_request() {
    let mut d = Driver::new(QueuedScheduler::new());
    d.start();
    d.stop();
    assert_eq!(d.scheduler().cancelled(), 1);
    assert_eq!(d.scheduler().outstanding(), 0);
    assert!(!d.is_active());
}

#[test]
fn stale_request_from_before_restart_is_ignored() {
    let mut d = Driver::new(QueuedScheduler::new());
    d.start();
    let old = d.scheduler_mut().pop().unwrap();
    d.stop();
    d.start();

    let mut calls = 0;
    assert!(!d.on_frame(old, 5.0, |_| calls += 1));
    let fresh = d.scheduler_mut().pop().unwrap();
    assert!(d.on_frame(fresh, 6.0, |_| calls += 1));
    assert_eq!(calls, 1);
}

#[test]
fn independent_drivers_keep_separate_state() {
    let mut a = Driver::new(QueuedScheduler::new());
    let mut b = Driver::new(QueuedScheduler::new());
    a.start();
    b.start();
    let ra = a.scheduler_mut().pop().unwrap();
    a.on_frame(ra, 500.0, |_| {});
    a.stop();
    assert!(b.is_active());
    assert_eq!(b.state().last_timestamp, None);
    assert_eq!(a.state().last_timestamp, Some(500.0));
}

#[test]
fn settled_time_has_infinite_elapsed() {
    let t = FrameTime::settled(40.0);
    assert_eq!(t.timestamp_ms, 40.0);
    assert!(t.since_start_ms.is_infinite());
}
