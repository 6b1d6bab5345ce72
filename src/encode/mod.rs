/// System `ffmpeg` MP4 sink.
pub mod ffmpeg;
/// PNG image-sequence sink.
pub mod png;
/// Sink contract and in-memory sink.
pub mod sink;
