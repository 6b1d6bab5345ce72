use crate::foundation::core::{Affine, Viewport};

/// Largest pixel dimension the raster backend addresses.
pub const MAX_PIXEL_DIMENSION: u32 = u16::MAX as u32;

/// Drawable surface dimensions, kept in sync with the viewport.
///
/// The backing pixel buffer is `logical size × device pixel ratio`; drawing is issued in logical
/// pixels through [`Surface::base_transform`].
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    logical_width: f64,
    logical_height: f64,
    device_pixel_ratio: f64,
    pixel_width: u32,
    pixel_height: u32,
    generation: u64,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// An unsized surface; drawing is a no-op until the first [`Surface::resize`].
    pub fn new() -> Self {
        Self {
            logical_width: 0.0,
            logical_height: 0.0,
            device_pixel_ratio: 1.0,
            pixel_width: 0,
            pixel_height: 0,
            generation: 0,
        }
    }

    /// A surface already sized to `viewport`.
    pub fn with_viewport(viewport: Viewport) -> Self {
        let mut s = Self::new();
        s.resize(viewport);
        s
    }

    /// Resize the backing buffer to match `viewport`.
    ///
    /// Returns `true` when the pixel buffer changed size or the device pixel ratio changed;
    /// either discards retained pixels. Calling this again with the same viewport is a no-op.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let v = viewport.sanitized();
        let pixel_width = to_pixels(v.width * v.device_pixel_ratio, "width");
        let pixel_height = to_pixels(v.height * v.device_pixel_ratio, "height");

        let reset = pixel_width != self.pixel_width
            || pixel_height != self.pixel_height
            || v.device_pixel_ratio != self.device_pixel_ratio;

        self.logical_width = v.width;
        self.logical_height = v.height;
        self.device_pixel_ratio = v.device_pixel_ratio;
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;

        if reset {
            self.generation = self.generation.wrapping_add(1);
            tracing::debug!(
                logical_width = v.width,
                logical_height = v.height,
                dpr = v.device_pixel_ratio,
                pixel_width,
                pixel_height,
                "surface resized"
            );
        }
        reset
    }

    /// Logical (displayed) width.
    pub fn width(&self) -> f64 {
        self.logical_width
    }

    /// Logical (displayed) height.
    pub fn height(&self) -> f64 {
        self.logical_height
    }

    /// Backing buffer width in device pixels.
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Backing buffer height in device pixels.
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Device pixel ratio in effect.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Uniform scale from logical to device pixels.
    pub fn base_transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }

    /// Bumped every time the pixel buffer changes size or scale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` when there is nothing to draw into.
    pub fn is_empty(&self) -> bool {
        self.pixel_width == 0
            || self.pixel_height == 0
            || self.logical_width <= 0.0
            || self.logical_height <= 0.0
    }
}

fn to_pixels(v: f64, axis: &str) -> u32 {
    let px = v.round();
    if px <= 0.0 {
        return 0;
    }
    if px > f64::from(MAX_PIXEL_DIMENSION) {
        tracing::warn!(axis, requested = px, "surface clamped to raster limit");
        return MAX_PIXEL_DIMENSION;
    }
    px as u32
}

#[cfg(test)]
#[path = "../../tests/unit/surface/surface.rs"]
mod tests;
