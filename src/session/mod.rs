/// Offline frame and range rendering.
pub mod render_session;
