/// Animation constants.
pub mod hero;
/// Theme input from the embedding page.
pub mod theme;
