//! Error types for ROI tracking

use thiserror::Error;

/// Result type alias for the tracking crate
pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors that can occur while tracking a region of interest
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Bounding box has invalid format: expected 4 components, got {components}")]
    InvalidBbox { components: usize },

    #[error("Cannot initialize {name} tracker")]
    TrackerInit { name: String },

    #[error("Failed to read image {failures} times in a row, exiting")]
    ReadFailuresExceeded { failures: u32 },

    #[error("Failed to read image: {0}")]
    FrameRead(String),

    #[error("Tracker backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackError {
    pub fn frame_read<S: Into<String>>(msg: S) -> Self {
        Self::FrameRead(msg.into())
    }

    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Read failures are recoverable inside the polling loop, everything else is fatal
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::FrameRead(_))
    }
}
