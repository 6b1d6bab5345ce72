/// Normalized easing curves.
pub mod ease;
