use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_frame_timestamps() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frame_duration_ms() - 1000.0 / 60.0).abs() < 1e-9);
    assert_eq!(fps.frames_to_ms(0), 0.0);
    assert!((fps.frames_to_ms(60) - 1000.0).abs() < 1e-9);
    assert_eq!(fps.secs_to_frames_floor(2.5), 150);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn hex_colors_parse_and_print() {
    assert_eq!(Rgba8::from_hex("#00A3FF").unwrap(), Rgba8::rgb(0, 163, 255));
    assert_eq!(
        Rgba8::from_hex("33333380").unwrap(),
        Rgba8::rgba(0x33, 0x33, 0x33, 0x80)
    );
    assert!(Rgba8::from_hex("#123").is_err());
    assert!(Rgba8::from_hex("#GG0000").is_err());
    assert_eq!(Rgba8::rgb(0, 163, 255).to_hex(), "#00A3FFFF");
}

#[test]
fn colors_deserialize_from_hex_or_array() {
    let c: Rgba8 = serde_json::from_value(serde_json::json!("#ff000080")).unwrap();
    assert_eq!(c, Rgba8::rgba(255, 0, 0, 128));
    let c: Rgba8 = serde_json::from_value(serde_json::json!([1, 2, 3])).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    assert!(serde_json::from_value::<Rgba8>(serde_json::json!([1, 2])).is_err());
}

#[test]
fn alpha_helpers_clamp() {
    assert_eq!(Rgba8::WHITE.with_alpha(0.5).a, 128);
    assert_eq!(Rgba8::WHITE.with_alpha(4.0).a, 255);
    assert_eq!(Rgba8::WHITE.with_alpha(f64::NAN).a, 0);
    assert_eq!(Rgba8::WHITE.with_alpha(0.5).fade(0.5).a, 64);
}

#[test]
fn viewport_sanitizes_degenerate_values() {
    let v = Viewport {
        width: -3.0,
        height: f64::NAN,
        device_pixel_ratio: 0.0,
    }
    .sanitized();
    assert_eq!(v.width, 0.0);
    assert_eq!(v.height, 0.0);
    assert_eq!(v.device_pixel_ratio, 1.0);

    let v = Viewport::new(800.0, 600.0).with_dpr(2.0).sanitized();
    assert_eq!(v, Viewport::new(800.0, 600.0).with_dpr(2.0));
}
