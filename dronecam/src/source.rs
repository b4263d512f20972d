//! Frame source backed by an image file that the camera keeps overwriting

use std::path::Path;

#[cfg(feature = "opencv")]
use opencv::{
    core::{self, Mat},
    imgcodecs::{self, IMREAD_COLOR},
    prelude::*,
};
#[cfg(feature = "opencv")]
use roitrack::{FrameSource, TrackError};
#[cfg(feature = "opencv")]
use std::path::PathBuf;

#[cfg(feature = "opencv")]
use crate::error::{Result, TrackingError};
#[cfg(feature = "opencv")]
use crate::frame::CvFrame;

/// The drone camera writes PPM frames upside down
pub fn needs_flip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ppm"))
        .unwrap_or(false)
}

#[cfg(feature = "opencv")]
pub struct ImageFileSource {
    path: PathBuf,
    path_str: String,
    flip: bool,
}

#[cfg(feature = "opencv")]
impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let path_str = path
            .to_str()
            .ok_or_else(|| TrackingError::config(format!("invalid path {}", path.display())))?
            .to_string();
        let flip = needs_flip(&path);

        log::info!(
            "Polling image {}{}",
            path.display(),
            if flip { " (flipped)" } else { "" }
        );

        Ok(Self {
            path,
            path_str,
            flip,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the file once. A missing or half-written file is a read failure.
    pub fn read_frame(&self) -> roitrack::Result<CvFrame> {
        let mat = imgcodecs::imread(&self.path_str, IMREAD_COLOR)
            .map_err(|e| TrackError::frame_read(format!("{}: {}", self.path_str, e)))?;

        if mat.empty() {
            return Err(TrackError::frame_read(format!(
                "{} could not be decoded",
                self.path_str
            )));
        }

        if !self.flip {
            return Ok(CvFrame::new(mat));
        }

        let mut flipped = Mat::default();
        core::flip(&mat, &mut flipped, 0).map_err(|e| TrackError::backend(e.to_string()))?;
        Ok(CvFrame::new(flipped))
    }
}

#[cfg(feature = "opencv")]
impl FrameSource<CvFrame> for ImageFileSource {
    fn read(&mut self) -> roitrack::Result<CvFrame> {
        self.read_frame()
    }
}
