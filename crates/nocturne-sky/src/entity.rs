//! Star and nebula records and the factory that randomizes them.

use std::f32::consts::TAU;

use nocturne_core::{Color, ColorBand};
use rand::Rng;

/// Far end of the depth axis. Stars live in `0.0..MAX_DEPTH`.
pub const MAX_DEPTH: f32 = 2000.0;

/// A single star particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Reference x position in backing-buffer pixels.
    pub x: f32,
    /// Reference y position in backing-buffer pixels.
    pub y: f32,
    /// Depth, `0.0` is nearest.
    pub z: f32,
    /// Base radius in pixels.
    pub size: f32,
    pub color: Color,
    /// Drift rate for both the orbit and the depth approach.
    pub speed: f32,
    /// Current intensity.
    pub brightness: f32,
    /// Ceiling for `brightness`.
    pub max_brightness: f32,
    /// Signed per-tick brightness step.
    pub twinkle_speed: f32,
}

/// A large, slowly rotating gradient ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct NebulaCloud {
    pub x: f32,
    pub y: f32,
    /// Major radius in pixels.
    pub size: f32,
    pub color: Color,
    /// Current rotation in radians.
    pub angle: f32,
    /// Rotation rate.
    pub speed: f32,
    /// Base alpha of the gradient centre.
    pub opacity: f32,
}

/// Create a randomized star inside a `width` x `height` buffer.
///
/// Returns `None` when either dimension is zero; creation is deferred until
/// a real size is known.
pub fn create_star(
    rng: &mut impl Rng,
    width: u32,
    height: u32,
    band: &ColorBand,
) -> Option<Star> {
    if width == 0 || height == 0 {
        return None;
    }

    let max_brightness = rng.random_range(0.5..1.0);
    let twinkle = rng.random_range(0.005..0.02);

    Some(Star {
        x: rng.random_range(0.0..width as f32),
        y: rng.random_range(0.0..height as f32),
        z: rng.random_range(0.0..MAX_DEPTH),
        size: rng.random_range(0.5..2.0),
        color: Color::hsl(
            band.hue_at(rng.random()),
            rng.random_range(0.7..1.0),
            rng.random_range(0.8..1.0),
        ),
        speed: rng.random_range(0.1..0.5),
        brightness: rng.random_range(0.0..=max_brightness),
        max_brightness,
        twinkle_speed: if rng.random_bool(0.5) { twinkle } else { -twinkle },
    })
}

/// Create a randomized nebula cloud inside a `width` x `height` buffer.
///
/// Returns `None` when either dimension is zero.
pub fn create_nebula(
    rng: &mut impl Rng,
    width: u32,
    height: u32,
    band: &ColorBand,
) -> Option<NebulaCloud> {
    if width == 0 || height == 0 {
        return None;
    }

    let short_side = width.min(height) as f32;

    Some(NebulaCloud {
        x: rng.random_range(0.0..width as f32),
        y: rng.random_range(0.0..height as f32),
        size: short_side * rng.random_range(0.3..0.6),
        color: Color::hsl(
            band.hue_at(rng.random()),
            rng.random_range(0.5..0.8),
            rng.random_range(0.2..0.4),
        ),
        angle: rng.random_range(0.0..TAU),
        speed: rng.random_range(0.0005..0.0015),
        opacity: rng.random_range(0.1..0.3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_size_defers_creation() {
        let mut rng = StdRng::seed_from_u64(1);
        let band = ColorBand::default();
        assert!(create_star(&mut rng, 0, 600, &band).is_none());
        assert!(create_star(&mut rng, 800, 0, &band).is_none());
        assert!(create_nebula(&mut rng, 0, 0, &band).is_none());
    }

    #[test]
    fn test_star_fields_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let band = ColorBand::default();
        for _ in 0..2000 {
            let star = create_star(&mut rng, 800, 600, &band).unwrap();
            assert!((0.0..800.0).contains(&star.x));
            assert!((0.0..600.0).contains(&star.y));
            assert!((0.0..MAX_DEPTH).contains(&star.z));
            assert!((0.5..1.0).contains(&star.max_brightness));
            assert!(star.brightness >= 0.0 && star.brightness <= star.max_brightness);
            assert!((0.005..0.02).contains(&star.twinkle_speed.abs()));
            assert!((band.hue_min..=band.hue_max).contains(&star.color.hue));
            assert!(star.color.lightness >= 0.8);
        }
    }

    #[test]
    fn test_twinkle_sign_is_mixed() {
        let mut rng = StdRng::seed_from_u64(11);
        let band = ColorBand::default();
        let stars: Vec<Star> = (0..200)
            .filter_map(|_| create_star(&mut rng, 100, 100, &band))
            .collect();
        assert!(stars.iter().any(|s| s.twinkle_speed > 0.0));
        assert!(stars.iter().any(|s| s.twinkle_speed < 0.0));
    }

    #[test]
    fn test_nebula_fields_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let band = ColorBand::default();
        for _ in 0..500 {
            let nebula = create_nebula(&mut rng, 400, 200, &band).unwrap();
            assert!((60.0..120.0).contains(&nebula.size));
            assert!((0.1..0.3).contains(&nebula.opacity));
            assert!((0.0..TAU).contains(&nebula.angle));
            assert!(nebula.color.lightness < 0.4);
        }
    }

    #[test]
    fn test_custom_band_is_respected() {
        let mut rng = StdRng::seed_from_u64(5);
        let band = ColorBand {
            hue_min: 10.0,
            hue_max: 20.0,
        };
        let star = create_star(&mut rng, 10, 10, &band).unwrap();
        assert!((10.0..=20.0).contains(&star.color.hue));
    }
}
