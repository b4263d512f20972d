//! Error types for the drone camera tracker

use roitrack::TrackError;
use thiserror::Error;

/// Result type alias for the drone camera tracker
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Errors that can occur while setting up or running the tracker
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error(transparent)]
    Track(#[from] TrackError),

    #[cfg(feature = "opencv")]
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Region selection was cancelled")]
    RoiCancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl TrackingError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<TrackingError> for TrackError {
    /// Collapse into the core error so backends can be driven by the polling loop
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::Track(inner) => inner,
            other => TrackError::backend(other.to_string()),
        }
    }
}
