//! Render one settled hero frame to `target/demos/hero_frame.png`.
//!
//! Usage: `cargo run --example render_one_frame [time_ms] [font.ttf]`
//!
//! Text uses the bundled DejaVu Sans Bold unless a font file is given.

use std::path::PathBuf;

use sisu_hero::{FrameTime, HeroConfig, RenderSession, Theme, Viewport, write_png};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let time_ms: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(8_000.0);

    let font = match args.next() {
        Some(path) => std::fs::read(path)?,
        None => std::fs::read(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/assets/fonts/DejaVuSans-Bold.ttf"
        ))?,
    };
    let session =
        RenderSession::new(HeroConfig::default(), Theme::default())?.with_font_bytes(font)?;

    let frame = session.render_frame(
        Viewport::new(1280.0, 720.0).with_dpr(2.0),
        FrameTime::settled(time_ms),
    )?;

    let out = PathBuf::from("target/demos/hero_frame.png");
    write_png(&out, &frame, session.config().palette.background)?;
    println!("wrote {} ({}x{})", out.display(), frame.width, frame.height);
    Ok(())
}
