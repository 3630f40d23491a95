use thiserror::Error;

/// Errors raised while mounting a sky renderer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkyError {
    /// The terminal cannot display the sky.
    #[error("unsupported surface: {0}")]
    UnsupportedSurface(String),
}

pub type Result<T> = std::result::Result<T, SkyError>;
