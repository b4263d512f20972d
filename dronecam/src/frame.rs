//! OpenCV frame wrapper

use image::RgbImage;
use opencv::{core::Mat, imgproc, prelude::*};
use roitrack::Frame;

use crate::error::{Result, TrackingError};

/// Decoded BGR frame as returned by `imread`
pub struct CvFrame {
    mat: Mat,
}

impl CvFrame {
    pub fn new(mat: Mat) -> Self {
        Self { mat }
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn mat_mut(&mut self) -> &mut Mat {
        &mut self.mat
    }

    /// Copy into an RGB image for the `image` ecosystem
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let mut rgb_mat = Mat::default();
        imgproc::cvt_color_def(&self.mat, &mut rgb_mat, imgproc::COLOR_BGR2RGB)?;

        let data = rgb_mat.data_bytes()?.to_vec();
        RgbImage::from_vec(self.width(), self.height(), data)
            .ok_or_else(|| TrackingError::config("frame buffer does not match its dimensions"))
    }
}

impl Frame for CvFrame {
    fn width(&self) -> u32 {
        self.mat.cols().max(0) as u32
    }

    fn height(&self) -> u32 {
        self.mat.rows().max(0) as u32
    }
}
