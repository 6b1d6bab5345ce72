use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use sisu_hero::{
    FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, FrameRange, FrameTime, HeroConfig,
    PngSequenceSink, RenderSession, Theme, Viewport,
};

/// Face used when no `--font` is given.
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

#[derive(Parser, Debug)]
#[command(name = "sisu-hero", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence (with motion trails).
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Hero config JSON (defaults to the built-in constants).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme JSON.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Font file for captions and the title; repeat to add fallback faces. Defaults to the
    /// bundled DejaVu Sans Bold.
    #[arg(long)]
    font: Vec<PathBuf>,

    /// Skip text entirely (no captions, no title).
    #[arg(long, default_value_t = false, conflicts_with = "font")]
    no_text: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Loop timestamp in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Length in seconds (defaults to one full loop).
    #[arg(long)]
    seconds: Option<f64>,

    /// First frame index.
    #[arg(long, default_value_t = 0)]
    start_frame: u64,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    seq: SequenceArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    seq: SequenceArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of overwriting an existing output.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn open_session(common: &CommonArgs) -> anyhow::Result<RenderSession> {
    let config = match &common.config {
        Some(path) => HeroConfig::from_path(path)?,
        None => HeroConfig::default(),
    };
    let theme = match &common.theme {
        Some(path) => Theme::from_path(path)?,
        None => Theme::default(),
    };
    let mut session = RenderSession::new(config, theme)?;
    if common.no_text {
        return Ok(session);
    }
    if common.font.is_empty() {
        return Ok(session
            .with_font_bytes(BUNDLED_FONT.to_vec())
            .context("load bundled font")?);
    }
    for path in &common.font {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        session = session
            .with_font_bytes(bytes)
            .with_context(|| format!("load font '{}'", path.display()))?;
    }
    Ok(session)
}

fn viewport(common: &CommonArgs) -> Viewport {
    Viewport::new(common.width, common.height).with_dpr(common.dpr)
}

fn frame_range(session: &RenderSession, seq: &SequenceArgs) -> anyhow::Result<(Fps, FrameRange)> {
    let fps = Fps::new(seq.fps, 1)?;
    let seconds = seq
        .seconds
        .unwrap_or(session.config().timing.duration_ms / 1000.0);
    let frames = fps.secs_to_frames_floor(seconds);
    if frames == 0 {
        anyhow::bail!("--seconds {seconds} yields no frames at {} fps", seq.fps);
    }
    let range = FrameRange::new(
        FrameIndex(seq.start_frame),
        FrameIndex(seq.start_frame.saturating_add(frames)),
    )?;
    Ok((fps, range))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = open_session(&args.common)?;
    let frame = session.render_frame(viewport(&args.common), FrameTime::settled(args.time_ms))?;

    sisu_hero::write_png(&args.out, &frame, session.config().palette.background)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let session = open_session(&args.common)?;
    let (fps, range) = frame_range(&session, &args.seq)?;
    let mut sink =
        PngSequenceSink::new(&args.out_dir).with_background(session.config().palette.background);

    let stats = session
        .render_range(viewport(&args.common), fps, range, &mut sink)
        .with_context(|| format!("render png sequence into '{}'", args.out_dir.display()))?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = open_session(&args.common)?;
    let (fps, range) = frame_range(&session, &args.seq)?;
    let mut opts =
        FfmpegSinkOpts::new(&args.out).with_background(session.config().palette.background);
    opts.overwrite = !args.no_overwrite;
    let mut sink = FfmpegSink::new(opts);

    let stats = session
        .render_range(viewport(&args.common), fps, range, &mut sink)
        .with_context(|| format!("render mp4 '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_rendered
    );
    Ok(())
}
