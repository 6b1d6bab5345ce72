//! `sisu-hero` is the animation engine behind the SISU Ventures hero banner.
//!
//! The hero background is a time-driven 2D loop: a scrolling grid, a vertical life-story
//! timeline whose stages reveal small vignette drawings as they rise into view, a spine with
//! markers and captions, and a glowing runner that tracks overall progress.
//!
//! The public API is split along the loop's responsibilities:
//!
//! - [`Surface`] tracks viewport size and device-pixel-ratio scaling
//! - [`Driver`] runs the frame loop against a host [`FrameScheduler`]
//! - [`Compositor`] draws one frame from a timestamp onto any [`Painter`]
//! - [`HeroView`] ties them together as a mountable view
//! - [`RenderSession`] renders frames offline into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Easing curves.
pub mod animation;
/// Per-frame composition of grid, stages and chrome.
pub mod compositor;
/// Tunable constants and theme input.
pub mod config;
/// Frame loop lifecycle and host scheduling.
pub mod driver;
/// Encoding sinks.
pub mod encode;
/// Pure per-frame layout math.
pub mod layout;
/// Painter trait and backends.
pub mod render;
/// Offline rendering.
pub mod session;
/// Stage catalog and vignette drawing procedures.
pub mod stages;
/// Drawable surface sizing.
pub mod surface;
/// Mountable hero view.
pub mod view;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Vec2, Viewport,
};
pub use crate::foundation::error::{HeroError, HeroResult};

pub use crate::animation::ease::Ease;
pub use crate::compositor::{Compositor, FrameReport};
pub use crate::config::hero::HeroConfig;
pub use crate::config::theme::Theme;
pub use crate::driver::clock::{AnimationState, Driver, FrameRequest, FrameScheduler, FrameTime};
pub use crate::driver::offline::{OfflineClock, QueuedScheduler};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layout::{FrameLayout, LayoutParams, Side, StagePlacement, global_progress};
pub use crate::render::cpu::CpuPainter;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::painter::{GradientStop, Painter, TextFill, TextStyle};
pub use crate::render::recording::{DrawCommand, DrawOp, RecordingPainter};
pub use crate::session::render_session::{RenderSession, RenderStats};
pub use crate::stages::{Stage, StageDraw, catalog};
pub use crate::surface::Surface;
pub use crate::view::HeroView;
