use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid rows and columns must both be positive.
    #[error("Grid dimensions must be positive, got {rows}x{cols}.")]
    InvalidDimensions { rows: usize, cols: usize },
    /// Target frame rate must lie within `MIN_FPS..=MAX_FPS`.
    #[error("Frame rate must be between 1 and 60 fps, got {0}.")]
    InvalidFrameRate(u32),
    /// Drawing surface must have a positive size.
    #[error("Surface size must be positive, got {width}x{height}.")]
    InvalidSurface { width: u32, height: u32 },
    #[error("Could not determine config directory.")]
    NoConfigDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
