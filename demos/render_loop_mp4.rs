//! Encode one full hero loop to `target/demos/hero_loop.mp4` (requires `ffmpeg` on PATH).

use sisu_hero::{
    FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, FrameRange, HeroConfig, RenderSession, Theme,
    Viewport, is_ffmpeg_on_path,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    if !is_ffmpeg_on_path() {
        eprintln!("ffmpeg not found on PATH; skipping");
        return Ok(());
    }

    let font = std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/fonts/DejaVuSans-Bold.ttf"
    ))?;
    let session =
        RenderSession::new(HeroConfig::default(), Theme::default())?.with_font_bytes(font)?;
    let fps = Fps::new(30, 1)?;
    let frames = fps.secs_to_frames_floor(session.config().timing.duration_ms / 1000.0);
    let range = FrameRange::new(FrameIndex(0), FrameIndex(frames))?;

    let opts = FfmpegSinkOpts::new("target/demos/hero_loop.mp4")
        .with_background(session.config().palette.background);
    let mut sink = FfmpegSink::new(opts);
    let stats = session.render_range(Viewport::new(960.0, 540.0), fps, range, &mut sink)?;

    println!("encoded {} frames", stats.frames_rendered);
    Ok(())
}
