//! The drawing-surface seam between the compositor and a concrete target.

use nocturne_core::{Color, PixelRatio};

/// A position in backing-buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Backing-buffer dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// One gradient stop. `color.alpha` is the stop's opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, `0.0..=1.0`.
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Vertical gradient from `y0` to `y1` filling the whole buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub y0: f32,
    pub y1: f32,
    pub stops: [ColorStop; 3],
}

/// A radial gradient painted inside the ellipse it defines.
///
/// The gradient runs from `center` (offset 0) to `radius` (offset 1) along the
/// major axis. The minor axis is `radius * aspect`, and the whole shape is
/// rotated by `rotation` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialFill {
    pub center: Point,
    pub radius: f32,
    pub aspect: f32,
    pub rotation: f32,
    pub stops: [ColorStop; 3],
}

/// Post-processing applied to subsequent fills.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Filter {
    #[default]
    None,
    /// Gaussian blur; the standard deviation is in logical units (cells) and
    /// is scaled by the pixel ratio.
    Blur(f32),
}

/// A 2D target the compositor paints into.
///
/// Every fill blends source-over onto what is already there.
pub trait Surface {
    /// Current backing-buffer size.
    fn size(&self) -> PixelSize;

    /// Resize the backing buffer. Contents are unspecified afterwards.
    fn resize(&mut self, size: PixelSize);

    /// Set the pixels-per-logical-unit scale.
    fn set_pixel_ratio(&mut self, ratio: PixelRatio);

    /// Set the filter used by following fills.
    fn set_filter(&mut self, filter: Filter);

    /// Fill the whole buffer with a vertical gradient.
    fn fill_linear(&mut self, gradient: &LinearGradient);

    /// Fill an ellipse with a radial gradient.
    fn fill_radial(&mut self, fill: &RadialFill);

    /// Fill the whole buffer with a flat colour.
    fn fill_all(&mut self, color: Color);
}
