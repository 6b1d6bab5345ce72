use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{HeroError, HeroResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha (straight alpha, alpha ignored).
    pub bg: Rgba8,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg: Rgba8::BLACK,
        }
    }

    /// Flatten over `bg` instead of black.
    pub fn with_background(mut self, bg: Rgba8) -> Self {
        self.bg = bg;
        self
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to its stdin.
///
/// Output is H.264 in yuv420p, which requires even dimensions.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Output options.
    pub fn opts(&self) -> &FfmpegSinkOpts {
        &self.opts
    }
}

impl std::fmt::Debug for FfmpegSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegSink")
            .field("opts", &self.opts)
            .field("running", &self.child.is_some())
            .field("cfg", &self.cfg)
            .field("last_idx", &self.last_idx)
            .finish()
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> HeroResult<()> {
        validate_video_config(cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(HeroError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(HeroError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        // Frames are flattened to opaque RGBA before they reach stdin (push_frame).
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);
        cmd.args([
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            HeroError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HeroError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| HeroError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "spawned ffmpeg"
        );

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeroResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| HeroError::encode("ffmpeg sink not started"))?;
        check_order(self.last_idx, idx)?;
        self.last_idx = Some(idx);
        check_frame_size(cfg, frame)?;

        flatten_to_opaque_rgba8(&mut self.scratch, frame, self.opts.bg)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(HeroError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            HeroError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> HeroResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| HeroError::encode("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| HeroError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| HeroError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| HeroError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(HeroError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg finished");
        self.cfg = None;
        Ok(())
    }
}

fn validate_video_config(cfg: SinkConfig) -> HeroResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(HeroError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(HeroError::validation(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(HeroError::validation(
            "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    Ok(())
}

pub(crate) fn check_order(last: Option<FrameIndex>, idx: FrameIndex) -> HeroResult<()> {
    if let Some(last) = last
        && idx.0 <= last.0
    {
        return Err(HeroError::encode(format!(
            "sink received out-of-order frame index {} after {}",
            idx.0, last.0
        )));
    }
    Ok(())
}

pub(crate) fn check_frame_size(cfg: &SinkConfig, frame: &FrameRGBA) -> HeroResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(HeroError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
        return Err(HeroError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // rawvideo input takes its rate from `-r` before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Composite `frame` over `bg` into opaque RGBA8.
///
/// Straight-alpha frames are premultiplied on the fly.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    frame: &FrameRGBA,
    bg: Rgba8,
) -> HeroResult<()> {
    let src = &frame.data;
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HeroError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg.r);
    let bg_g = u16::from(bg.g);
    let bg_b = u16::from(bg.b);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let premul = |c: u8| {
            if frame.premultiplied {
                u16::from(c)
            } else {
                mul_div255_u16(u16::from(c), a)
            }
        };
        let inv = 255u16 - a;
        let r = premul(s[0]) + mul_div255_u16(bg_r, inv);
        let g = premul(s[1]) + mul_div255_u16(bg_g, inv);
        let b = premul(s[2]) + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> HeroResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
