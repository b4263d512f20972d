//! Bounding box representation and frame normalization

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TrackError};

/// Axis-aligned box in pixel units of the frame it was measured on
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from `[x, y, width, height, ...]`
    ///
    /// Components past the fourth are ignored. Fewer than four is an error.
    pub fn from_components(components: &[f64]) -> Result<Self> {
        match components {
            [x, y, width, height, ..] => Ok(Self::new(*x, *y, *width, *height)),
            _ => Err(TrackError::InvalidBbox {
                components: components.len(),
            }),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the box has no extent, e.g. a cancelled selection
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Top-left and bottom-right corners, truncated to whole pixels
    pub fn corners(&self) -> ((i32, i32), (i32, i32)) {
        (
            (self.x as i32, self.y as i32),
            ((self.x + self.width) as i32, (self.y + self.height) as i32),
        )
    }

    pub fn is_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= frame_width as f64
            && self.y + self.height <= frame_height as f64
    }

    /// Express the box as a fraction of the frame dimensions
    pub fn normalized(&self, frame_width: u32, frame_height: u32) -> NormalizedBbox {
        let fw = frame_width as f64;
        let fh = frame_height as f64;
        NormalizedBbox {
            x: self.x / fw,
            y: self.y / fh,
            width: self.width / fw,
            height: self.height / fh,
        }
    }
}

impl fmt::Display for Bbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bbox(x={:.1}, y={:.1}, w={:.1}, h={:.1})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Box expressed as fractions of the frame width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedBbox {
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}
