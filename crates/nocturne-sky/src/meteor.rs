//! Decorative meteor streaks drawn above the presented sky.
//!
//! Meteors run on their own schedule measured from the first host timestamp
//! they see. They never touch the star or nebula population.

use nocturne_core::{Color, MAX_METEOR_COUNT, Rgb};
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::{from_terminal, to_terminal};
use crate::present::{ColorDepth, HALF_BLOCK};

/// Offset between consecutive meteors' first appearance.
pub const STAGGER_MS: f64 = 1500.0;

/// Fraction of a flight spent fading in.
pub const FADE_IN: f32 = 0.1;

/// Fraction of a flight spent fading out.
pub const FADE_OUT: f32 = 0.3;

/// Travel direction in half-block pixels: leftwards and down, at 45 degrees
/// on square cells.
const DIRECTION: (f32, f32) = (-std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2);

/// Distance a head travels per flight, as a fraction of the viewport width.
const TRAVEL: f32 = 0.35;

const STREAK: Color = Color::hsl(220.0, 0.6, 0.95);

/// One streak and its repeating schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Start of the head as a fraction of the viewport width.
    pub start_x: f32,
    /// Start of the head as a fraction of the viewport height.
    pub start_y: f32,
    /// Tail length in cells.
    pub length: f32,
    pub delay_ms: f64,
    pub duration_ms: f64,
    /// Flight plus the gap before the next one.
    pub period_ms: f64,
}

/// Where a meteor is in its current flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorPhase {
    /// `0.0..1.0` through the flight.
    pub progress: f32,
    pub opacity: f32,
}

impl Meteor {
    /// A randomized meteor, the `index`-th of its overlay.
    pub fn random(rng: &mut impl Rng, index: usize) -> Self {
        let duration_ms = rng.random_range(1200.0..2000.0);
        Self {
            start_x: rng.random_range(0.5..1.0),
            start_y: rng.random_range(0.0..0.4),
            length: rng.random_range(6.0..16.0),
            delay_ms: index as f64 * STAGGER_MS + rng.random_range(0.0..STAGGER_MS),
            duration_ms,
            period_ms: duration_ms + rng.random_range(8000.0..16000.0),
        }
    }

    /// Phase at `elapsed_ms` since the overlay epoch, `None` between flights.
    pub fn sample(&self, elapsed_ms: f64) -> Option<MeteorPhase> {
        if elapsed_ms < self.delay_ms || self.period_ms <= 0.0 {
            return None;
        }
        let t = (elapsed_ms - self.delay_ms) % self.period_ms;
        if t >= self.duration_ms {
            return None;
        }
        let progress = (t / self.duration_ms) as f32;
        Some(MeteorPhase {
            progress,
            opacity: envelope(progress),
        })
    }

    /// Head position in half-block pixels for a `width` x `height` cell area.
    pub fn head(&self, progress: f32, width: u16, height: u16) -> (f32, f32) {
        let w = f32::from(width);
        let distance = progress * TRAVEL * w;
        (
            self.start_x * w + DIRECTION.0 * distance,
            self.start_y * f32::from(height) * 2.0 + DIRECTION.1 * distance,
        )
    }
}

/// Fade in, hold at full opacity, then fade out.
pub fn envelope(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p < FADE_IN {
        p / FADE_IN
    } else if p > 1.0 - FADE_OUT {
        (1.0 - p) / FADE_OUT
    } else {
        1.0
    }
}

/// The full set of meteors with their latest phases.
#[derive(Debug)]
pub struct MeteorOverlay {
    meteors: Vec<Meteor>,
    epoch: Option<f64>,
    current: Vec<Option<MeteorPhase>>,
}

impl MeteorOverlay {
    /// At most [`MAX_METEOR_COUNT`] meteors are created.
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let meteors: Vec<Meteor> = (0..count.min(MAX_METEOR_COUNT))
            .map(|i| Meteor::random(rng, i))
            .collect();
        Self::from_meteors(meteors)
    }

    pub fn from_meteors(meteors: Vec<Meteor>) -> Self {
        let current = vec![None; meteors.len()];
        Self {
            meteors,
            epoch: None,
            current,
        }
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    /// Restart every schedule from the next timestamp.
    pub fn reset(&mut self) {
        self.epoch = None;
        self.current.fill(None);
    }

    /// Sample every meteor at a raw host timestamp.
    pub fn advance(&mut self, now_ms: f64) {
        let epoch = *self.epoch.get_or_insert(now_ms);
        let elapsed = (now_ms - epoch).max(0.0);
        for (slot, meteor) in self.current.iter_mut().zip(&self.meteors) {
            *slot = meteor.sample(elapsed);
        }
    }

    /// Meteors currently in flight.
    pub fn visible(&self) -> impl Iterator<Item = (&Meteor, MeteorPhase)> {
        self.meteors
            .iter()
            .zip(&self.current)
            .filter_map(|(m, phase)| phase.map(|p| (m, p)))
    }
}

/// Blends the visible meteors into already presented half-block cells.
#[derive(Debug, Clone, Copy)]
pub struct MeteorLayer<'a> {
    overlay: &'a MeteorOverlay,
    depth: ColorDepth,
}

impl<'a> MeteorLayer<'a> {
    pub fn new(overlay: &'a MeteorOverlay, depth: ColorDepth) -> Self {
        Self { overlay, depth }
    }
}

impl Widget for MeteorLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let streak = STREAK.to_rgb();
        let rows = i32::from(area.height) * 2;

        for (meteor, phase) in self.overlay.visible() {
            let (hx, hy) = meteor.head(phase.progress, area.width, area.height);
            let steps = (meteor.length * 2.0).ceil().max(1.0) as usize;

            for i in 0..steps {
                let back = i as f32 * 0.5;
                let px = (hx - DIRECTION.0 * back).round() as i32;
                let py = (hy - DIRECTION.1 * back).round() as i32;
                if px < 0 || py < 0 || px >= i32::from(area.width) || py >= rows {
                    continue;
                }
                let fade = 1.0 - i as f32 / steps as f32;
                let alpha = phase.opacity * fade;

                let pos = (area.x + px as u16, area.y + (py / 2) as u16);
                let Some(cell) = buf.cell_mut(pos) else {
                    continue;
                };
                let top = py % 2 == 0;
                let painted = cell.symbol() == HALF_BLOCK;
                let fg = painted.then(|| from_terminal(cell.fg)).flatten();
                let bg = painted.then(|| from_terminal(cell.bg)).flatten();
                let (mut fg, mut bg) = (fg.unwrap_or(Rgb::BLACK), bg.unwrap_or(Rgb::BLACK));

                if top {
                    fg = fg.blend(streak, alpha);
                } else {
                    bg = bg.blend(streak, alpha);
                }
                cell.set_symbol(HALF_BLOCK)
                    .set_fg(to_terminal(fg, self.depth))
                    .set_bg(to_terminal(bg, self.depth));
            }
        }
    }
}
