//! Per-tick motion and depth projection.
//!
//! Stars orbit the buffer centre at a fixed radius, oscillate in brightness,
//! and approach the viewer along `z`. The orbit radius and angle are derived
//! from the stored `x, y` every tick rather than kept as polar state.

use crate::entity::{MAX_DEPTH, NebulaCloud, Star};
use crate::surface::Point;

/// Per-60fps-frame equivalent: rates are expressed per frame at 60 fps and
/// multiplied by `delta_time * BASE_RATE`.
pub const BASE_RATE: f32 = 60.0;

/// Angular advance per unit of star speed, relative to the depth advance.
pub const ORBIT_RATE: f32 = 0.001;

/// Radii below this are treated as sitting on the centre.
const MIN_ORBIT_RADIUS: f32 = 1e-4;

/// Largest depth strictly below [`MAX_DEPTH`].
const DEPTH_CEILING: f32 = MAX_DEPTH - MAX_DEPTH * f32::EPSILON;

/// A star mapped to screen space for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Centre of a `width` x `height` buffer.
pub fn center_of(width: u32, height: u32) -> Point {
    Point::new(width as f32 / 2.0, height as f32 / 2.0)
}

/// Advance one star by `dt` seconds. `rate` is [`BASE_RATE`] times the
/// global speed multiplier.
pub fn advance_star(star: &mut Star, dt: f32, rate: f32, center: Point) {
    let step = dt * rate;

    orbit(star, star.speed * step * ORBIT_RATE, center);
    twinkle(star, step);

    star.z = wrap_depth(star.z - star.speed * step);
}

/// Advance one nebula's rotation by `dt` seconds.
pub fn advance_nebula(nebula: &mut NebulaCloud, dt: f32, rate: f32) {
    nebula.angle = (nebula.angle + nebula.speed * dt * rate).rem_euclid(std::f32::consts::TAU);
}

/// Perspective factor for a depth: 0 at the far plane, 1 at the viewer.
pub fn depth_scale(z: f32) -> f32 {
    (MAX_DEPTH - z) / MAX_DEPTH
}

/// Project a star's reference position and size through its depth.
pub fn project(star: &Star, center: Point) -> ProjectedStar {
    let scale = depth_scale(star.z);
    ProjectedStar {
        x: center.x + (star.x - center.x) * scale,
        y: center.y + (star.y - center.y) * scale,
        size: star.size * scale,
    }
}

/// Rotate the star about `center` by `delta_angle`, keeping its radius.
fn orbit(star: &mut Star, delta_angle: f32, center: Point) {
    let dx = star.x - center.x;
    let dy = star.y - center.y;
    let radius = dx.hypot(dy);
    if radius < MIN_ORBIT_RADIUS {
        return;
    }

    let angle = dy.atan2(dx) + delta_angle;
    star.x = center.x + radius * angle.cos();
    star.y = center.y + radius * angle.sin();
}

/// Triangle-wave brightness: the step direction flips on leaving
/// `0..=max_brightness`, and brightness is pinned to the crossed bound.
fn twinkle(star: &mut Star, step: f32) {
    star.brightness += star.twinkle_speed * step;

    if star.brightness > star.max_brightness {
        star.brightness = star.max_brightness;
        star.twinkle_speed = -star.twinkle_speed;
    } else if star.brightness < 0.0 {
        star.brightness = 0.0;
        star.twinkle_speed = -star.twinkle_speed;
    }
}

/// Wrap a depth that went negative back towards the far plane.
fn wrap_depth(z: f32) -> f32 {
    if z >= 0.0 {
        return z.min(DEPTH_CEILING);
    }
    z.rem_euclid(MAX_DEPTH).min(DEPTH_CEILING)
}
