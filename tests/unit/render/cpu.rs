use super::*;
use crate::foundation::core::Viewport;

fn surface(w: f64, h: f64, dpr: f64) -> Surface {
    Surface::with_viewport(Viewport::new(w, h).with_dpr(dpr))
}

#[test]
fn empty_surface_draws_nothing() {
    let mut p = CpuPainter::new();
    assert!(!p.begin_frame(&Surface::new()));
    p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgba8::WHITE);
    assert!(p.finish_frame().is_none());
    assert!(p.last_frame().is_none());
}

#[test]
fn finish_without_begin_is_none() {
    let mut p = CpuPainter::new();
    assert!(p.finish_frame().is_none());
}

#[test]
fn first_fade_clears_opaque_then_draws() {
    let s = surface(4.0, 4.0, 1.0);
    let mut p = CpuPainter::new();
    assert!(p.begin_frame(&s));
    p.fade(Rgba8::BLACK, 0.28);
    p.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba8::WHITE);
    let f = p.finish_frame().unwrap();
    assert_eq!((f.width, f.height), (4, 4));
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(3, 3), Some([0, 0, 0, 255]));
}

#[test]
fn fade_keeps_a_dimmed_trail_of_the_previous_frame() {
    let s = surface(4.0, 4.0, 1.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 0.5);
    p.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::WHITE);
    p.finish_frame().unwrap();

    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 0.5);
    let f = p.finish_frame().unwrap();
    let [r, g, b, a] = f.pixel(1, 1).unwrap();
    assert_eq!(a, 255);
    assert!((100..=160).contains(&r), "r = {r}");
    assert_eq!((r, g), (g, b));
}

#[test]
fn resize_drops_trail_history() {
    let mut s = surface(4.0, 4.0, 1.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 0.1);
    p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::WHITE);
    p.finish_frame().unwrap();

    assert!(s.resize(Viewport::new(6.0, 6.0)));
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 0.1);
    let f = p.finish_frame().unwrap();
    assert_eq!((f.width, f.height), (6, 6));
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn dpr_change_at_same_pixel_size_drops_trail_history() {
    let mut s = surface(2.0, 2.0, 2.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 0.1);
    p.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba8::WHITE);
    p.finish_frame().unwrap();

    assert!(s.resize(Viewport::new(4.0, 4.0).with_dpr(1.0)));
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 0.1);
    let f = p.finish_frame().unwrap();
    assert_eq!((f.width, f.height), (4, 4));
    assert!(f.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn device_pixel_ratio_scales_drawing() {
    let s = surface(2.0, 2.0, 2.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 1.0);
    p.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::WHITE);
    let f = p.finish_frame().unwrap();
    assert_eq!((f.width, f.height), (4, 4));
    assert_eq!(f.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn global_alpha_and_restore() {
    let s = surface(4.0, 4.0, 1.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 1.0);
    p.save();
    p.set_alpha(0.0);
    p.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::WHITE);
    p.restore();
    assert_eq!(p.alpha(), 1.0);
    let f = p.finish_frame().unwrap();
    assert_eq!(f.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn non_finite_geometry_is_skipped() {
    let s = surface(4.0, 4.0, 1.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 1.0);
    p.fill_rect(Rect::new(f64::NAN, 0.0, 4.0, 4.0), Rgba8::WHITE);
    p.fill_circle(Point::new(f64::INFINITY, 1.0), 2.0, Rgba8::WHITE);
    p.fill_radial(
        Point::new(2.0, 2.0),
        f64::NAN,
        &[GradientStop::new(0.0, Rgba8::WHITE)],
    );
    let f = p.finish_frame().unwrap();
    assert!(f.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn text_without_font_is_not_measured() {
    let mut p = CpuPainter::new();
    assert_eq!(p.measure_text("Garage startup", 15.0), None);
    assert!(p.font_family().is_none());
}

fn font(name: &str) -> Vec<u8> {
    std::fs::read(format!("{}/assets/fonts/{name}", env!("CARGO_MANIFEST_DIR"))).unwrap()
}

#[test]
fn theme_heading_picks_the_first_face() {
    let fonts = [font("DejaVuSans-Bold.ttf"), font("DejaVuSerif.ttf")];
    let p = CpuPainter::with_fonts(fonts.clone(), &Theme::default()).unwrap();
    let families = p.font_families();
    assert_eq!(families.len(), 2);
    assert_eq!(p.font_family().as_ref(), families.first());

    let serif = families[1].clone();
    let themed = Theme::with_heading(format!("'{serif}', sans-serif"));
    let p = CpuPainter::with_fonts(fonts, &themed).unwrap();
    assert_eq!(p.font_family(), Some(serif));
}

#[test]
fn gradient_title_text_paints_pixels() {
    let s = surface(120.0, 60.0, 1.0);
    let mut p = CpuPainter::with_font_bytes(font("DejaVuSans-Bold.ttf"), &Theme::default()).unwrap();
    assert!(p.measure_text("SISU", 40.0).unwrap() > 0.0);
    p.begin_frame(&s);
    p.fade(Rgba8::BLACK, 1.0);
    p.draw_text(
        "SISU",
        Point::new(4.0, 4.0),
        &TextStyle::solid(40.0, Rgba8::WHITE)
            .with_tracking(-2.0)
            .with_fill(TextFill::Vertical {
                top: Rgba8::WHITE,
                bottom: Rgba8::WHITE.with_alpha(0.9),
            }),
    );
    let f = p.finish_frame().unwrap();
    let lit = f.data.chunks_exact(4).filter(|px| px[0] > 128).count();
    assert!(lit > 50, "lit = {lit}");
}

#[test]
fn linear_fill_follows_its_stops() {
    let s = surface(4.0, 10.0, 1.0);
    let mut p = CpuPainter::new();
    p.begin_frame(&s);
    p.fade(Rgba8::WHITE, 1.0);
    p.fill_linear(
        Rect::new(0.0, 0.0, 4.0, 10.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        &[
            GradientStop::new(0.0, Rgba8::BLACK.with_alpha(0.0)),
            GradientStop::new(1.0, Rgba8::BLACK),
        ],
    );
    let f = p.finish_frame().unwrap();
    let top = f.pixel(1, 0).unwrap()[0];
    let bottom = f.pixel(1, 9).unwrap()[0];
    assert!(top > 200, "top = {top}");
    assert!(bottom < 60, "bottom = {bottom}");
}
