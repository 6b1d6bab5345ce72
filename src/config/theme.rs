use crate::foundation::error::{HeroError, HeroResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Title font stack of the site.
pub const DEFAULT_HEADING: &str = "-apple-system, BlinkMacSystemFont, 'SF Pro Display', sans-serif";

/// Theme object handed down by the embedding page.
///
/// Only `fonts.heading` is read; everything else in the page theme (colors, breakpoints) is
/// accepted and ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// Font families.
    #[serde(default)]
    pub fonts: ThemeFonts,
}

/// Font families of a [`Theme`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThemeFonts {
    /// CSS-style family list used for the hero title.
    #[serde(default = "default_heading")]
    pub heading: String,
}

fn default_heading() -> String {
    DEFAULT_HEADING.to_owned()
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            heading: default_heading(),
        }
    }
}

impl Theme {
    /// Theme with a custom heading family list.
    pub fn with_heading(heading: impl Into<String>) -> Self {
        Self {
            fonts: ThemeFonts {
                heading: heading.into(),
            },
        }
    }

    /// Parse a theme from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HeroResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HeroError::validation(format!("parse theme JSON: {e}")))
    }

    /// Parse a theme from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HeroResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| HeroError::validation(format!("open theme '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Individual families of the heading list, unquoted, in preference order.
    pub fn heading_families(&self) -> Vec<String> {
        self.fonts
            .heading
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"').trim())
            .filter(|f| !f.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/theme.rs"]
mod tests;
