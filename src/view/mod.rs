//! The mountable hero view: surface, frame loop, compositor and CPU painter in one value.

use crate::compositor::{Compositor, FrameReport};
use crate::config::hero::HeroConfig;
use crate::config::theme::Theme;
use crate::driver::clock::{Driver, FrameRequest, FrameScheduler};
use crate::foundation::core::Viewport;
use crate::foundation::error::HeroResult;
use crate::render::cpu::CpuPainter;
use crate::render::frame::FrameRGBA;
use crate::surface::Surface;

/// Hero background bound to a host scheduler.
///
/// The host forwards three kinds of events: viewport resizes ([`HeroView::on_resize`]), frame
/// callbacks for the request it was handed ([`HeroView::on_frame`]) and teardown
/// ([`HeroView::unmount`]). Everything runs on the caller's thread.
#[derive(Debug)]
pub struct HeroView<S: FrameScheduler> {
    surface: Surface,
    driver: Driver<S>,
    compositor: Compositor,
    painter: CpuPainter,
    mounted: bool,
    frames_drawn: u64,
    last_report: Option<FrameReport>,
}

impl<S: FrameScheduler> HeroView<S> {
    /// Size the surface to `viewport` and start the frame loop.
    pub fn mount(
        viewport: Viewport,
        config: HeroConfig,
        theme: Theme,
        painter: CpuPainter,
        scheduler: S,
    ) -> HeroResult<Self> {
        config.validate()?;
        let surface = Surface::with_viewport(viewport);
        let mut driver = Driver::new(scheduler);
        driver.start();
        tracing::debug!(
            width = surface.width(),
            height = surface.height(),
            dpr = surface.device_pixel_ratio(),
            "hero view mounted"
        );
        Ok(Self {
            surface,
            driver,
            compositor: Compositor::new(config, theme),
            painter,
            mounted: true,
            frames_drawn: 0,
            last_report: None,
        })
    }

    /// Viewport changed. Ignored after unmount. Returns whether the pixel buffer was reset.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        if !self.mounted {
            tracing::trace!("resize after unmount ignored");
            return false;
        }
        self.surface.resize(viewport)
    }

    /// Host frame callback. Returns `false` when the callback was stale or the view is stopped.
    pub fn on_frame(&mut self, request: FrameRequest, timestamp_ms: f64) -> bool {
        let Self {
            surface,
            driver,
            compositor,
            painter,
            frames_drawn,
            last_report,
            ..
        } = self;
        driver.on_frame(request, timestamp_ms, |time| {
            if !painter.begin_frame(surface) {
                return;
            }
            let report = compositor.draw_frame(painter, surface, time);
            if painter.finish_frame().is_some() {
                *frames_drawn += 1;
                *last_report = Some(report);
            }
        })
    }

    /// Stop the loop and cancel the pending frame request.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.driver.stop();
        self.mounted = false;
        tracing::debug!(frames = self.frames_drawn, "hero view unmounted");
    }

    /// Whether the view is between mount and unmount.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.painter.last_frame()
    }

    /// Report of the most recently presented frame.
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    /// Frames presented since mount.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Current surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The compositor drawing each frame.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// The frame loop.
    pub fn driver(&self) -> &Driver<S> {
        &self.driver
    }

    /// The host scheduler, for hosts that pump it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/view.rs"]
mod tests;
