//! The simulation state: one star population and one nebula population.

use nocturne_core::SkyOptions;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::entity::{NebulaCloud, Star, create_nebula, create_star};
use crate::projection::{BASE_RATE, advance_nebula, advance_star, center_of};
use crate::surface::PixelSize;

/// Stars and nebulas owned by one mounted renderer.
///
/// The population is created once, on the first positive buffer size, and
/// is never rebuilt afterwards; resizes only move the projection centre.
#[derive(Debug)]
pub struct Sky {
    stars: Vec<Star>,
    nebulas: Vec<NebulaCloud>,
    options: SkyOptions,
    rng: StdRng,
    populated: bool,
}

impl Sky {
    /// A sky seeded from the operating system.
    pub fn new(options: SkyOptions) -> Self {
        Self::from_rng(options, StdRng::from_os_rng())
    }

    /// A reproducible sky.
    pub fn with_seed(options: SkyOptions, seed: u64) -> Self {
        Self::from_rng(options, StdRng::seed_from_u64(seed))
    }

    /// Populations past their limits are capped.
    fn from_rng(options: SkyOptions, rng: StdRng) -> Self {
        let options = options.clamped();
        Self {
            stars: Vec::with_capacity(options.star_count),
            nebulas: Vec::with_capacity(options.nebula_count),
            options,
            rng,
            populated: false,
        }
    }

    /// Create the population for `size` if it does not exist yet.
    ///
    /// Returns `true` when this call created it. A zero size defers creation.
    pub fn populate(&mut self, size: PixelSize) -> bool {
        if self.populated || size.is_empty() {
            return false;
        }

        let band = self.options.color_band;
        for _ in 0..self.options.star_count {
            if let Some(star) = create_star(&mut self.rng, size.width, size.height, &band) {
                self.stars.push(star);
            }
        }
        for _ in 0..self.options.nebula_count {
            if let Some(nebula) = create_nebula(&mut self.rng, size.width, size.height, &band) {
                self.nebulas.push(nebula);
            }
        }
        self.populated = true;

        debug!(
            stars = self.stars.len(),
            nebulas = self.nebulas.len(),
            width = size.width,
            height = size.height,
            "populated sky"
        );
        true
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn nebulas(&self) -> &[NebulaCloud] {
        &self.nebulas
    }

    pub fn options(&self) -> &SkyOptions {
        &self.options
    }

    #[cfg(test)]
    pub(crate) fn stars_mut(&mut self) -> &mut Vec<Star> {
        &mut self.stars
    }

    /// Effective per-second multiplier for every rate.
    pub fn rate(&self) -> f32 {
        BASE_RATE * self.options.speed.rate_multiplier()
    }

    /// Advance every entity by `dt` seconds around the centre of `size`.
    pub fn update(&mut self, dt: f32, size: PixelSize) {
        let rate = self.rate();
        let center = center_of(size.width, size.height);

        for star in &mut self.stars {
            advance_star(star, dt, rate, center);
        }
        for nebula in &mut self.nebulas {
            advance_nebula(nebula, dt, rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MAX_DEPTH;
    use nocturne_core::{AnimationSpeed, MAX_NEBULA_COUNT, MAX_STAR_COUNT};

    fn small_options() -> SkyOptions {
        SkyOptions {
            star_count: 50,
            nebula_count: 3,
            ..SkyOptions::default()
        }
    }

    #[test]
    fn test_zero_size_defers_population() {
        let mut sky = Sky::with_seed(small_options(), 1);
        assert!(!sky.populate(PixelSize::new(0, 40)));
        assert!(!sky.is_populated());
        assert!(sky.stars().is_empty());

        assert!(sky.populate(PixelSize::new(80, 40)));
        assert_eq!(sky.stars().len(), 50);
        assert_eq!(sky.nebulas().len(), 3);
    }

    #[test]
    fn test_population_is_created_once() {
        let mut sky = Sky::with_seed(small_options(), 2);
        sky.populate(PixelSize::new(80, 40));
        let before = sky.stars().to_vec();

        assert!(!sky.populate(PixelSize::new(160, 80)));
        assert_eq!(sky.stars(), &before[..]);
    }

    #[test]
    fn test_default_population_size() {
        let mut sky = Sky::with_seed(SkyOptions::default(), 3);
        sky.populate(PixelSize::new(200, 100));
        assert_eq!(sky.stars().len(), 1500);
        assert_eq!(sky.nebulas().len(), 3);
    }

    #[test]
    fn test_seeded_skies_match() {
        let mut a = Sky::with_seed(small_options(), 99);
        let mut b = Sky::with_seed(small_options(), 99);
        a.populate(PixelSize::new(64, 64));
        b.populate(PixelSize::new(64, 64));
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.nebulas(), b.nebulas());
    }

    #[test]
    fn test_speed_scales_rate() {
        let fast = Sky::with_seed(
            SkyOptions {
                speed: AnimationSpeed::Fast,
                ..small_options()
            },
            0,
        );
        let slow = Sky::with_seed(
            SkyOptions {
                speed: AnimationSpeed::Slow,
                ..small_options()
            },
            0,
        );
        assert_eq!(fast.rate(), 4.0 * slow.rate());
    }

    #[test]
    fn test_oversized_counts_are_capped() {
        let options = SkyOptions {
            star_count: usize::MAX,
            nebula_count: usize::MAX,
            ..SkyOptions::default()
        };
        let mut sky = Sky::with_seed(options, 5);
        assert_eq!(sky.options().star_count, MAX_STAR_COUNT);
        assert_eq!(sky.options().nebula_count, MAX_NEBULA_COUNT);

        sky.populate(PixelSize::new(4, 4));
        assert!(sky.stars().len() <= MAX_STAR_COUNT);
        assert!(sky.nebulas().len() <= MAX_NEBULA_COUNT);
    }

    #[test]
    fn test_update_keeps_invariants() {
        let mut sky = Sky::with_seed(small_options(), 4);
        let size = PixelSize::new(120, 60);
        sky.populate(size);
        for _ in 0..600 {
            sky.update(0.05, size);
            for star in sky.stars() {
                assert!(star.z >= 0.0 && star.z < MAX_DEPTH);
                assert!(star.brightness >= 0.0 && star.brightness <= star.max_brightness);
            }
        }
    }
}
