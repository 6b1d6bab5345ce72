use crate::compositor::Compositor;
use crate::config::hero::HeroConfig;
use crate::config::theme::Theme;
use crate::driver::clock::FrameTime;
use crate::driver::offline::OfflineClock;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRange, Viewport};
use crate::foundation::error::{HeroError, HeroResult};
use crate::render::cpu::CpuPainter;
use crate::render::frame::FrameRGBA;
use crate::surface::Surface;
use crate::view::HeroView;

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Timestamp of the first frame.
    pub first_timestamp_ms: f64,
    /// Timestamp of the last frame.
    pub last_timestamp_ms: f64,
}

/// Renders hero frames without a host.
///
/// A session validates its configuration and fonts once. Single frames are rendered on a fresh
/// surface (no trail history); ranges run a [`HeroView`] against an [`OfflineClock`], so trails
/// and the title entrance behave as they would on screen.
#[derive(Debug)]
pub struct RenderSession {
    config: HeroConfig,
    theme: Theme,
    fonts: Vec<Vec<u8>>,
}

impl RenderSession {
    /// Construct a session over `config` and `theme`. Text is not drawn until a font is set.
    pub fn new(config: HeroConfig, theme: Theme) -> HeroResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            theme,
            fonts: Vec::new(),
        })
    }

    /// Add the face in `font_bytes`. Faces are tried in the order of the theme's heading
    /// families, then in the order they were added.
    pub fn with_font_bytes(mut self, font_bytes: Vec<u8>) -> HeroResult<Self> {
        self.fonts.push(font_bytes);
        let painter = self.painter()?;
        tracing::debug!(families = ?painter.font_families(), "session fonts loaded");
        Ok(self)
    }

    /// Active configuration.
    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    /// Theme input.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn painter(&self) -> HeroResult<CpuPainter> {
        CpuPainter::with_fonts(self.fonts.iter().cloned(), &self.theme)
    }

    /// Render one frame at `time` on a fresh surface sized to `viewport`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn render_frame(&self, viewport: Viewport, time: FrameTime) -> HeroResult<FrameRGBA> {
        let surface = Surface::with_viewport(viewport);
        let mut painter = self.painter()?;
        if !painter.begin_frame(&surface) {
            return Err(HeroError::render(format!(
                "cannot render into an empty {}x{} surface",
                surface.pixel_width(),
                surface.pixel_height()
            )));
        }
        let compositor = Compositor::new(self.config.clone(), self.theme.clone());
        let report = compositor.draw_frame(&mut painter, &surface, time);
        tracing::debug!(
            progress = report.progress,
            drawn = report.drawn.len(),
            "rendered frame"
        );
        painter
            .finish_frame()
            .ok_or_else(|| HeroError::render("painter produced no frame"))
    }

    /// Render `range` at `fps` and stream frames into `sink`.
    ///
    /// Frame `i` is stamped `i / fps`. The loop starts at `range.start`, so the title entrance
    /// plays from the first frame of the range. The sink receives frames in strictly increasing
    /// index order and is always finalized once `begin` succeeded.
    #[tracing::instrument(level = "debug", skip(self, sink))]
    pub fn render_range(
        &self,
        viewport: Viewport,
        fps: Fps,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> HeroResult<RenderStats> {
        if range.is_empty() {
            return Err(HeroError::validation(
                "render_range range must be non-empty",
            ));
        }

        let clock = OfflineClock::new(fps, fps.frames_to_ms(range.start.0));
        let mut view = HeroView::mount(
            viewport,
            self.config.clone(),
            self.theme.clone(),
            self.painter()?,
            clock,
        )?;
        if view.surface().is_empty() {
            return Err(HeroError::validation(
                "render_range viewport must be non-empty",
            ));
        }

        let cfg = SinkConfig {
            width: view.surface().pixel_width(),
            height: view.surface().pixel_height(),
            fps,
        };
        sink.begin(cfg)?;
        let result = push_range(&mut view, range, sink);
        let ended = sink.end();
        view.unmount();

        let stats = result?;
        ended?;
        tracing::debug!(
            frames = stats.frames_rendered,
            width = cfg.width,
            height = cfg.height,
            "rendered range"
        );
        Ok(stats)
    }
}

fn push_range(
    view: &mut HeroView<OfflineClock>,
    range: FrameRange,
    sink: &mut dyn FrameSink,
) -> HeroResult<RenderStats> {
    let mut stats = RenderStats {
        frames_total: range.len_frames(),
        ..RenderStats::default()
    };
    for idx in range.start.0..range.end.0 {
        let (request, ts) = view
            .scheduler_mut()
            .tick()
            .ok_or_else(|| HeroError::render("offline clock has no pending frame"))?;
        if !view.on_frame(request, ts) {
            return Err(HeroError::render(format!(
                "frame {idx} was not drawn (view stopped)"
            )));
        }
        let frame = view
            .last_frame()
            .ok_or_else(|| HeroError::render(format!("frame {idx} produced no pixels")))?;
        sink.push_frame(FrameIndex(idx), frame)?;

        if stats.frames_rendered == 0 {
            stats.first_timestamp_ms = ts;
        }
        stats.last_timestamp_ms = ts;
        stats.frames_rendered += 1;
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
