use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{HeroError, HeroResult};

/// Entries kept before the layout cache is dropped wholesale.
const LAYOUT_CACHE_CAP: usize = 256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Layout cache key: text, size bits, tracking bits.
type LayoutKey = (String, u32, u32);

/// Stateful helper for shaping captions and the title with Parley.
///
/// Faces come only from caller-supplied font bytes. Without any there is nothing to shape with:
/// [`TextLayoutEngine::layout`] returns `None` and callers fall back to estimates. System fonts
/// are never consulted so output does not depend on the host.
///
/// Text is shaped against a family stack: the preferred families (the theme's heading list)
/// that have been registered, in preference order, followed by every other registered family in
/// registration order. Glyphs missing from the first face fall through to the next.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: Vec<String>,
    preferred: Vec<String>,
    cache: HashMap<LayoutKey, Arc<parley::Layout<TextBrushRgba8>>>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("font_stack", &self.font_stack())
            .field("cached_layouts", &self.cache.len())
            .finish()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts and no font.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
            preferred: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Set the preferred family order, usually [`crate::Theme::heading_families`].
    pub(crate) fn set_preferred(&mut self, preferred: Vec<String>) {
        self.preferred = preferred;
        self.cache.clear();
    }

    /// Register the face in `font_bytes` and return its family name.
    ///
    /// A family outside the preferred list is still used (after the preferred ones), with a
    /// warning.
    pub(crate) fn load_font(&mut self, font_bytes: Vec<u8>) -> HeroResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HeroError::validation("no font families registered from font bytes"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HeroError::validation("registered font family has no name"))?
            .to_string();

        if !self.preferred.is_empty() && !self.is_preferred(&family) {
            tracing::warn!(
                family = %family,
                preferred = ?self.preferred,
                "font bytes register a family outside the heading stack; using it as a fallback"
            );
        } else {
            tracing::debug!(family = %family, "registered heading font");
        }

        if !self.registered.iter().any(|f| f.eq_ignore_ascii_case(&family)) {
            self.registered.push(family.clone());
        }
        self.cache.clear();
        Ok(family)
    }

    fn is_preferred(&self, family: &str) -> bool {
        self.preferred.iter().any(|p| p.eq_ignore_ascii_case(family))
    }

    /// Registered families in the order text is shaped against them.
    pub(crate) fn font_stack(&self) -> Vec<String> {
        let mut stack: Vec<String> = self
            .preferred
            .iter()
            .filter_map(|p| {
                self.registered
                    .iter()
                    .find(|f| f.eq_ignore_ascii_case(p))
                    .cloned()
            })
            .collect();
        for family in &self.registered {
            if !stack.contains(family) {
                stack.push(family.clone());
            }
        }
        stack
    }

    /// Family tried first, if any face is registered.
    pub(crate) fn family(&self) -> Option<String> {
        self.font_stack().into_iter().next()
    }

    /// Shape `text` on one line at `size_px` with `tracking_px` after every character.
    ///
    /// Brush is white; callers paint their own fill. Each glyph run carries the face it was
    /// shaped with.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        tracking_px: f32,
    ) -> Option<Arc<parley::Layout<TextBrushRgba8>>> {
        if !size_px.is_finite() || size_px <= 0.0 || !tracking_px.is_finite() {
            return None;
        }
        let stack = self.font_stack();
        if stack.is_empty() {
            return None;
        }

        let key = (text.to_owned(), size_px.to_bits(), tracking_px.to_bits());
        if let Some(layout) = self.cache.get(&key) {
            return Some(Arc::clone(layout));
        }

        let families: Vec<parley::style::FontFamily<'static>> = stack
            .into_iter()
            .map(|f| parley::style::FontFamily::Named(Cow::Owned(f)))
            .collect();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::List(Cow::Owned(families)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(tracking_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::WHITE));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        if self.cache.len() >= LAYOUT_CACHE_CAP {
            self.cache.clear();
        }
        let layout = Arc::new(layout);
        self.cache.insert(key, Arc::clone(&layout));
        Some(layout)
    }

    /// Advance width of `text` at `size_px` with `tracking_px` letter spacing.
    pub(crate) fn measure(&mut self, text: &str, size_px: f32, tracking_px: f32) -> Option<f64> {
        self.layout(text, size_px, tracking_px)
            .map(|l| f64::from(l.width()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
