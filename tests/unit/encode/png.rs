use super::*;
use crate::foundation::core::Fps;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sisu-hero-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn file_names_are_zero_padded() {
    let sink = PngSequenceSink::new("out").with_prefix("hero");
    assert_eq!(
        sink.path_for(FrameIndex(42)),
        PathBuf::from("out").join("hero_00042.png")
    );
}

#[test]
fn writes_one_png_per_frame() {
    let dir = scratch_dir("png-seq");
    let mut sink = PngSequenceSink::new(&dir).with_background(Rgba8::rgb(0, 0, 255));
    sink.begin(SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &solid(4, 2, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(4, 2, [0, 0, 0, 0]))
        .unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let first = image::open(&sink.written()[0]).unwrap().to_rgba8();
    assert_eq!(first.dimensions(), (4, 2));
    assert_eq!(first.get_pixel(0, 0).0, [255, 0, 0, 255]);
    let second = image::open(&sink.written()[1]).unwrap().to_rgba8();
    assert_eq!(second.get_pixel(3, 1).0, [0, 0, 255, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejects_out_of_order_and_mismatched_frames() {
    let dir = scratch_dir("png-order");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(5), &solid(2, 2, [1, 1, 1, 255]))
        .unwrap();
    assert!(sink.push_frame(FrameIndex(5), &solid(2, 2, [1, 1, 1, 255])).is_err());
    assert!(sink.push_frame(FrameIndex(6), &solid(3, 2, [1, 1, 1, 255])).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_sized_config_is_rejected() {
    let mut sink = PngSequenceSink::new(scratch_dir("png-zero"));
    let err = sink.begin(SinkConfig {
        width: 0,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    });
    assert!(err.is_err());
}
