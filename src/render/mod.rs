/// CPU raster backend powered by `vello_cpu`.
pub mod cpu;
/// Rendered frame buffers.
pub mod frame;
/// The drawing interface.
pub mod painter;
/// Command-recording backend.
pub mod recording;
pub(crate) mod text;
