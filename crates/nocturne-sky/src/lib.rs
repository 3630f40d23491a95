//! Procedural star field with nebulas, depth projection and a meteor
//! overlay, painted into a software raster and presented with ratatui.

pub mod clock;
pub mod color;
pub mod compositor;
pub mod entity;
pub mod error;
pub mod meteor;
pub mod present;
pub mod projection;
pub mod raster;
#[cfg(test)]
mod recorder;
pub mod renderer;
pub mod resize;
pub mod sky;
pub mod surface;

pub use error::{Result, SkyError};
pub use present::ColorDepth;
pub use renderer::{RendererSettings, SkyRenderer};
pub use resize::ResizeMode;
