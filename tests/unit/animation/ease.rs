use super::*;

const ALL: [Ease; 4] = [
    Ease::Linear,
    Ease::TITLE,
    Ease::CubicBezier(0.42, 0.0, 0.58, 1.0),
    Ease::CubicBezier(0.0, 0.0, 0.58, 1.0),
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?}");
    }
}

#[test]
fn out_of_range_and_nan_inputs_clamp() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
        assert_eq!(e.apply(f64::NAN), e.apply(0.0));
    }
}

#[test]
fn eases_are_monotonic() {
    for e in ALL {
        let mut prev = e.apply(0.0);
        for i in 1..=100 {
            let v = e.apply(i as f64 / 100.0);
            assert!(v + 1e-6 >= prev, "{e:?} not monotonic at {i}");
            prev = v;
        }
    }
}

#[test]
fn linear_bezier_is_identity() {
    let e = Ease::CubicBezier(0.0, 0.0, 1.0, 1.0);
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((e.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn title_curve_front_loads_motion() {
    // cubic-bezier(0.25, 0.1, 0, 1) is well past halfway at the midpoint.
    assert!(Ease::TITLE.apply(0.5) > 0.8);
    assert!(Ease::TITLE.apply(0.1) < 0.5);
}

#[test]
fn eases_parse_from_config_json() {
    let e: Ease = serde_json::from_str(r#""Linear""#).unwrap();
    assert_eq!(e, Ease::Linear);
    let e: Ease = serde_json::from_str(r#"{"CubicBezier":[0.25,0.1,0.0,1.0]}"#).unwrap();
    assert_eq!(e, Ease::TITLE);
}
