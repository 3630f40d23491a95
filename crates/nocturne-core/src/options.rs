//! Tunable options for the sky renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Animation speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Factor applied to every per-tick rate.
    pub fn rate_multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }
}

impl fmt::Display for AnimationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        };
        f.write_str(name)
    }
}

impl FromStr for AnimationSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(AnimationSpeed::Slow),
            "medium" => Ok(AnimationSpeed::Medium),
            "fast" => Ok(AnimationSpeed::Fast),
            other => Err(format!(
                "unknown speed '{other}', expected slow, medium or fast"
            )),
        }
    }
}

/// Largest accepted star population.
pub const MAX_STAR_COUNT: usize = 100_000;

/// Largest accepted nebula population.
pub const MAX_NEBULA_COUNT: usize = 64;

/// Largest accepted meteor overlay.
pub const MAX_METEOR_COUNT: usize = 64;

/// Largest accepted raster pixels per cell along either axis.
pub const MAX_PIXEL_RATIO: u16 = 8;

/// Hue range (degrees) that star and nebula colours are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBand {
    pub hue_min: f32,
    pub hue_max: f32,
}

impl Default for ColorBand {
    /// Blue through purple.
    fn default() -> Self {
        Self {
            hue_min: 200.0,
            hue_max: 280.0,
        }
    }
}

impl ColorBand {
    /// Hue at position `t` (0.0 - 1.0) across the band.
    pub fn hue_at(&self, t: f32) -> f32 {
        self.hue_min + (self.hue_max - self.hue_min) * t.clamp(0.0, 1.0)
    }

    /// A band is usable when it is finite and not inverted.
    pub fn is_valid(&self) -> bool {
        self.hue_min.is_finite() && self.hue_max.is_finite() && self.hue_min <= self.hue_max
    }
}

/// Raster pixels per terminal cell along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelRatio {
    pub x: u16,
    pub y: u16,
}

impl Default for PixelRatio {
    /// One column and two rows per cell, matching half-block glyphs.
    fn default() -> Self {
        Self { x: 1, y: 2 }
    }
}

impl PixelRatio {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_PIXEL_RATIO).contains(&self.x) && (1..=MAX_PIXEL_RATIO).contains(&self.y)
    }
}

/// Population and appearance settings for one mounted sky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyOptions {
    /// Number of star particles.
    pub star_count: usize,
    /// Number of nebula clouds.
    pub nebula_count: usize,
    /// Number of meteor streaks in the overlay.
    pub meteor_count: usize,
    /// Global animation speed.
    pub speed: AnimationSpeed,
    /// Hue band for stars and nebulas.
    pub color_band: ColorBand,
}

impl SkyOptions {
    /// These options with every population capped at its limit.
    pub fn clamped(&self) -> Self {
        Self {
            star_count: self.star_count.min(MAX_STAR_COUNT),
            nebula_count: self.nebula_count.min(MAX_NEBULA_COUNT),
            meteor_count: self.meteor_count.min(MAX_METEOR_COUNT),
            ..self.clone()
        }
    }
}

impl Default for SkyOptions {
    fn default() -> Self {
        Self {
            star_count: 1500,
            nebula_count: 3,
            meteor_count: 8,
            speed: AnimationSpeed::default(),
            color_band: ColorBand::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_parse() {
        assert_eq!("slow".parse::<AnimationSpeed>(), Ok(AnimationSpeed::Slow));
        assert_eq!("FAST".parse::<AnimationSpeed>(), Ok(AnimationSpeed::Fast));
        assert!("warp".parse::<AnimationSpeed>().is_err());
    }

    #[test]
    fn test_speed_display_roundtrip() {
        for speed in [AnimationSpeed::Slow, AnimationSpeed::Medium, AnimationSpeed::Fast] {
            assert_eq!(speed.to_string().parse::<AnimationSpeed>(), Ok(speed));
        }
    }

    #[test]
    fn test_color_band_hue_at() {
        let band = ColorBand::default();
        assert_eq!(band.hue_at(0.0), 200.0);
        assert_eq!(band.hue_at(1.0), 280.0);
        assert_eq!(band.hue_at(2.0), 280.0);
        assert!(band.is_valid());
        assert!(
            !ColorBand {
                hue_min: 300.0,
                hue_max: 100.0
            }
            .is_valid()
        );
    }

    #[test]
    fn test_sky_options_defaults() {
        let options = SkyOptions::default();
        assert_eq!(options.star_count, 1500);
        assert_eq!(options.nebula_count, 3);
        assert_eq!(options.meteor_count, 8);
    }

    #[test]
    fn test_clamped_caps_populations() {
        let options = SkyOptions {
            star_count: usize::MAX,
            nebula_count: 1_000,
            meteor_count: 65,
            speed: AnimationSpeed::Fast,
            ..SkyOptions::default()
        }
        .clamped();
        assert_eq!(options.star_count, MAX_STAR_COUNT);
        assert_eq!(options.nebula_count, MAX_NEBULA_COUNT);
        assert_eq!(options.meteor_count, MAX_METEOR_COUNT);
        assert_eq!(options.speed, AnimationSpeed::Fast);
        assert_eq!(SkyOptions::default().clamped(), SkyOptions::default());
    }

    #[test]
    fn test_pixel_ratio_bounds() {
        assert!(PixelRatio::default().is_valid());
        assert!(PixelRatio::new(MAX_PIXEL_RATIO, MAX_PIXEL_RATIO).is_valid());
        assert!(!PixelRatio::new(0, 2).is_valid());
        assert!(!PixelRatio::new(1, MAX_PIXEL_RATIO + 1).is_valid());
        assert!(!PixelRatio::new(u16::MAX, u16::MAX).is_valid());
    }

    #[test]
    fn test_partial_options_deserialize() {
        let options: SkyOptions = toml::from_str("star_count = 40\nspeed = \"fast\"").unwrap();
        assert_eq!(options.star_count, 40);
        assert_eq!(options.speed, AnimationSpeed::Fast);
        assert_eq!(options.nebula_count, 3);
    }
}
