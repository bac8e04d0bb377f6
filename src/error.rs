use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("Invalid point for track {key}: coordinates are not finite numbers")]
    InvalidPoint { key: String },

    #[error("Surface mismatch: {layer} is {actual:?}, expected {expected:?}")]
    SurfaceMismatch {
        layer: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "opencv")]
    #[error("OpenCV Error: {0}")]
    OpenCv(#[from] opencv::Error),
}
