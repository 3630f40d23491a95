//! A [`Surface`] that records draw calls instead of rasterizing them.

use nocturne_core::{Color, PixelRatio};

use crate::surface::{Filter, LinearGradient, PixelSize, RadialFill, Surface};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize(PixelSize),
    PixelRatio(PixelRatio),
    Filter(Filter),
    Linear(LinearGradient),
    Radial(RadialFill),
    FillAll(Color),
}

/// Records every call made through [`Surface`].
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: PixelSize,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drop the recorded calls, keeping the size.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Radial fills recorded so far.
    pub fn radial_fills(&self) -> impl Iterator<Item = &RadialFill> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Radial(fill) => Some(fill),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn resize(&mut self, size: PixelSize) {
        self.size = size;
        self.calls.push(DrawCall::Resize(size));
    }

    fn set_pixel_ratio(&mut self, ratio: PixelRatio) {
        self.calls.push(DrawCall::PixelRatio(ratio));
    }

    fn set_filter(&mut self, filter: Filter) {
        self.calls.push(DrawCall::Filter(filter));
    }

    fn fill_linear(&mut self, gradient: &LinearGradient) {
        self.calls.push(DrawCall::Linear(*gradient));
    }

    fn fill_radial(&mut self, fill: &RadialFill) {
        self.calls.push(DrawCall::Radial(*fill));
    }

    fn fill_all(&mut self, color: Color) {
        self.calls.push(DrawCall::FillAll(color));
    }
}
