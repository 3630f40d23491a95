//! Writes a [`Raster`] into a ratatui buffer using half-block cells.

use nocturne_core::Rgb;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::to_terminal;
use crate::error::{Result, SkyError};
use crate::raster::Raster;
use crate::surface::Surface;

/// The glyph every sky cell is drawn with: fg paints the top half, bg the
/// bottom half.
pub const HALF_BLOCK: &str = "▀";

/// Colour encoding supported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Ansi256,
}

impl ColorDepth {
    /// Inspect the process environment.
    pub fn detect() -> Result<Self> {
        Self::from_env(|key| std::env::var(key).ok())
    }

    /// Inspect an environment given as a lookup function.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            return Err(SkyError::UnsupportedSurface("NO_COLOR is set".into()));
        }
        if lookup("TERM").as_deref() == Some("dumb") {
            return Err(SkyError::UnsupportedSurface("TERM is dumb".into()));
        }

        let truecolor = lookup("COLORTERM")
            .map(|v| v.to_ascii_lowercase())
            .is_some_and(|v| v == "truecolor" || v == "24bit");
        Ok(if truecolor {
            ColorDepth::TrueColor
        } else {
            ColorDepth::Ansi256
        })
    }
}

/// Presents a raster over a cell area.
///
/// Each cell covers `ratio.x` by `ratio.y` raster pixels. The upper half of
/// the pixel rows is averaged into the foreground, the lower half into the
/// background. Cells outside the raster are left untouched.
#[derive(Debug, Clone, Copy)]
pub struct SkyWidget<'a> {
    raster: &'a Raster,
    depth: ColorDepth,
}

impl<'a> SkyWidget<'a> {
    pub fn new(raster: &'a Raster, depth: ColorDepth) -> Self {
        Self { raster, depth }
    }
}

impl Widget for SkyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.raster.size();
        if size.is_empty() {
            return;
        }
        let ratio = self.raster.pixel_ratio();
        let (rx, ry) = (u32::from(ratio.x.max(1)), u32::from(ratio.y.max(1)));
        let cols = (size.width / rx).min(u32::from(area.width)) as u16;
        let rows = (size.height / ry).min(u32::from(area.height)) as u16;

        let top_rows = ry.div_ceil(2);
        for row in 0..rows {
            for col in 0..cols {
                let px = u32::from(col) * rx;
                let py = u32::from(row) * ry;
                let top = self.average(px, py, rx, top_rows);
                let bottom = if ry == 1 {
                    top
                } else {
                    self.average(px, py + top_rows, rx, ry - top_rows)
                };

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_terminal(top, self.depth))
                        .set_bg(to_terminal(bottom, self.depth));
                }
            }
        }
    }
}

impl SkyWidget<'_> {
    fn average(&self, x: u32, y: u32, w: u32, h: u32) -> Rgb {
        let mut sum = Rgb::BLACK;
        let mut count = 0.0;
        for py in y..y + h {
            for px in x..x + w {
                if let Some(p) = self.raster.pixel(px, py) {
                    sum = Rgb::new(sum.r + p.r, sum.g + p.g, sum.b + p.b);
                    count += 1.0;
                }
            }
        }
        if count == 0.0 {
            return Rgb::BLACK;
        }
        Rgb::new(sum.r / count, sum.g / count, sum.b / count)
    }
}
