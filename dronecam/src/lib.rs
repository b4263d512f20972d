//! Drone camera ROI tracker
//!
//! Polls an image file written by the drone camera, runs a set of OpenCV
//! trackers seeded with a user-selected region, prints the region as a
//! fraction of the frame for the flight controller and shows a debug overlay.

pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod source;

#[cfg(feature = "opencv")]
pub mod app;
#[cfg(feature = "opencv")]
pub mod cv_tracker;
#[cfg(feature = "opencv")]
pub mod display;
#[cfg(feature = "opencv")]
pub mod frame;
#[cfg(feature = "opencv")]
pub mod roi;

pub use config::TrackingConfig;
pub use error::{Result, TrackingError};

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
