//! Paints one frame of the sky onto a [`Surface`].

use nocturne_core::Color;

use crate::projection::{center_of, project};
use crate::sky::Sky;
use crate::surface::{ColorStop, Filter, LinearGradient, Point, RadialFill, Surface};

/// Horizontal-to-vertical ratio of the nebula ellipse is `1 : NEBULA_ASPECT`.
pub const NEBULA_ASPECT: f32 = 0.6;

/// Star glow radius relative to the projected size.
pub const GLOW_SCALE: f32 = 2.0;

/// Default blur of the ambient wash, in cells.
pub const DEFAULT_WASH_BLUR: f32 = 12.0;

const BACKGROUND: [Color; 3] = [
    Color::hsl(240.0, 0.5, 0.04),
    Color::hsl(255.0, 0.45, 0.09),
    Color::hsl(230.0, 0.5, 0.03),
];

const WASH: Color = Color::hsla(271.0, 0.76, 0.53, 0.05);

/// Frame compositor. Holds no per-frame state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compositor {
    wash_blur: f32,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DEFAULT_WASH_BLUR)
    }
}

impl Compositor {
    pub fn new(wash_blur: f32) -> Self {
        Self {
            wash_blur: wash_blur.max(0.0),
        }
    }

    /// Background, nebulas, stars, then the blurred wash.
    pub fn paint<S: Surface + ?Sized>(&self, sky: &Sky, surface: &mut S) {
        let size = surface.size();
        if size.is_empty() {
            return;
        }

        surface.fill_linear(&background(size.height as f32));

        for nebula in sky.nebulas() {
            let base = nebula.color;
            surface.fill_radial(&RadialFill {
                center: Point::new(nebula.x, nebula.y),
                radius: nebula.size,
                aspect: NEBULA_ASPECT,
                rotation: nebula.angle,
                stops: [
                    ColorStop::new(0.0, base.with_alpha(nebula.opacity)),
                    ColorStop::new(0.5, base.with_alpha(nebula.opacity * 0.5)),
                    ColorStop::new(1.0, base.with_alpha(0.0)),
                ],
            });
        }

        let center = center_of(size.width, size.height);
        for star in sky.stars() {
            let projected = project(star, center);
            if projected.size <= 0.0 {
                continue;
            }
            let base = star.color;
            surface.fill_radial(&RadialFill {
                center: Point::new(projected.x, projected.y),
                radius: projected.size * GLOW_SCALE,
                aspect: 1.0,
                rotation: 0.0,
                stops: [
                    ColorStop::new(0.0, base.with_alpha(star.brightness)),
                    ColorStop::new(0.4, base.with_alpha(star.brightness * 0.3)),
                    ColorStop::new(1.0, base.with_alpha(0.0)),
                ],
            });
        }

        surface.set_filter(Filter::Blur(self.wash_blur));
        surface.fill_all(WASH);
        surface.set_filter(Filter::None);
    }
}

fn background(height: f32) -> LinearGradient {
    LinearGradient {
        y0: 0.0,
        y1: height,
        stops: [
            ColorStop::new(0.0, BACKGROUND[0]),
            ColorStop::new(0.5, BACKGROUND[1]),
            ColorStop::new(1.0, BACKGROUND[2]),
        ],
    }
}
