//! Typed HSLA colours and their RGB form.

use std::fmt;

/// A colour in hue/saturation/lightness space with straight alpha.
///
/// The simulation only ever stores colours in this form; conversion to RGB
/// happens at the drawing boundary through [`Color::to_rgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Hue in degrees. Any value is accepted and wrapped into `0..360`.
    pub hue: f32,
    /// Saturation (0.0 - 1.0).
    pub saturation: f32,
    /// Lightness (0.0 - 1.0).
    pub lightness: f32,
    /// Alpha (0.0 - 1.0).
    pub alpha: f32,
}

impl Color {
    /// An opaque colour.
    pub const fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    /// A colour with explicit alpha.
    pub const fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// The same colour with a different alpha.
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Convert to RGB, ignoring alpha.
    pub fn to_rgb(self) -> Rgb {
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Rgb::new(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.hue.rem_euclid(360.0) / 360.0;

        Rgb::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.0}, {:.0}%, {:.0}%, {:.2})",
            self.hue.rem_euclid(360.0),
            self.saturation * 100.0,
            self.lightness * 100.0,
            self.alpha
        )
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Linear RGB triple with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantize to 8-bit channels.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Source-over blend of `src` with the given coverage onto `self`.
    pub fn blend(self, src: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        Rgb::new(
            src.r * a + self.r * (1.0 - a),
            src.g * a + self.g * (1.0 - a),
            src.b * a + self.b * (1.0 - a),
        )
    }
}
