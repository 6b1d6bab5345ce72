/// Frame loop lifecycle.
pub mod clock;
/// Built-in schedulers.
pub mod offline;
