use crate::encode::ffmpeg::{check_frame_size, check_order, ensure_parent_dir, flatten_to_opaque_rgba8};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{HeroError, HeroResult};
use crate::render::frame::FrameRGBA;
use std::path::{Path, PathBuf};

/// Sink writing each frame as `<dir>/<prefix>_<index:05>.png`.
///
/// Frames are flattened over an opaque background, like the MP4 path, so the files match what
/// the encoder would see.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    bg: Rgba8,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing `frame_00000.png`, `frame_00001.png`, ... into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_owned(),
            bg: Rgba8::BLACK,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
            written: Vec::new(),
        }
    }

    /// Use `prefix` for file names.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Flatten over `bg` instead of black.
    pub fn with_background(mut self, bg: Rgba8) -> Self {
        self.bg = bg;
        self
    }

    /// File path used for frame `idx`.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, idx.0))
    }

    /// Files written since the last `begin`.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> HeroResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(HeroError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            HeroError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeroResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| HeroError::encode("png sink not started"))?;
        check_order(self.last_idx, idx)?;
        self.last_idx = Some(idx);
        check_frame_size(cfg, frame)?;

        flatten_to_opaque_rgba8(&mut self.scratch, frame, self.bg)?;
        let path = self.path_for(idx);
        save_rgba8(&path, &self.scratch, frame.width, frame.height)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> HeroResult<()> {
        if self.cfg.take().is_none() {
            return Err(HeroError::encode("png sink not started"));
        }
        tracing::debug!(
            dir = %self.dir.display(),
            frames = self.written.len(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Write one frame to `path` as an opaque PNG, flattened over `bg`.
pub fn write_png(path: &Path, frame: &FrameRGBA, bg: Rgba8) -> HeroResult<()> {
    let mut buf = vec![0u8; frame.data.len()];
    flatten_to_opaque_rgba8(&mut buf, frame, bg)?;
    ensure_parent_dir(path)?;
    save_rgba8(path, &buf, frame.width, frame.height)
}

fn save_rgba8(path: &Path, data: &[u8], width: u32, height: u32) -> HeroResult<()> {
    image::save_buffer_with_format(
        path,
        data,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| HeroError::encode(format!("failed to write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
