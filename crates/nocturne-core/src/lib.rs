//! Core types shared by the nocturne crates.

mod color;
mod options;

pub use color::{Color, Rgb};
pub use options::{
    AnimationSpeed, ColorBand, MAX_METEOR_COUNT, MAX_NEBULA_COUNT, MAX_PIXEL_RATIO, MAX_STAR_COUNT,
    PixelRatio, SkyOptions,
};
