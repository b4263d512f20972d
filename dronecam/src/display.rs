//! HighGUI debug overlay and optional snapshot output

use opencv::{
    core::{Mat, Point, Scalar},
    highgui, imgproc,
    prelude::*,
};
use roitrack::{Display, LoopControl, TrackError, TrackResult, TrackerKind};
use std::path::PathBuf;

use crate::annotate;
use crate::config::TrackingConfig;
use crate::error::Result;
use crate::frame::CvFrame;

const FONT_SCALE: f64 = 0.75;
const TEXT_THICKNESS: i32 = 2;

fn bgr_scalar(color: [u8; 3]) -> Scalar {
    Scalar::new(color[0] as f64, color[1] as f64, color[2] as f64, 0.0)
}

fn put_label(mat: &mut Mat, text: &str, origin: Point, color: Scalar) -> opencv::Result<()> {
    imgproc::put_text(
        mat,
        text,
        origin,
        imgproc::FONT_HERSHEY_SIMPLEX,
        FONT_SCALE,
        color,
        TEXT_THICKNESS,
        imgproc::LINE_8,
        false,
    )
}

/// Draw tracker boxes, the FPS counter and the tracker legend in place
pub fn draw_overlay(
    mat: &mut Mat,
    results: &[TrackResult],
    trackers: &[TrackerKind],
    fps: f64,
) -> opencv::Result<()> {
    for result in results {
        let ((x1, y1), (x2, y2)) = result.bbox.corners();
        imgproc::rectangle_points(
            mat,
            Point::new(x1, y1),
            Point::new(x2, y2),
            bgr_scalar(result.kind.color()),
            annotate::BOX_THICKNESS,
            imgproc::LINE_8,
            0,
        )?;
    }

    put_label(
        mat,
        &format!("FPS : {}", fps as i64),
        Point::new(annotate::FPS_ORIGIN.0, annotate::FPS_ORIGIN.1),
        Scalar::new(50.0, 170.0, 50.0, 0.0),
    )?;

    let mut y = annotate::LEGEND_STEP;
    for kind in trackers {
        put_label(mat, kind.name(), Point::new(0, y), bgr_scalar(kind.color()))?;
        y += annotate::LEGEND_STEP;
    }
    Ok(())
}

pub struct CvDisplay {
    window: Option<String>,
    wait_ms: i32,
    quit_key: Option<char>,
    snapshot_path: Option<PathBuf>,
}

impl CvDisplay {
    pub fn new(config: &TrackingConfig) -> Self {
        let mut window = None;
        if !config.headless {
            match highgui::named_window(&config.window_name, highgui::WINDOW_AUTOSIZE) {
                Ok(()) => window = Some(config.window_name.clone()),
                Err(e) => log::warn!("Failed to open display window: {}. Running headless.", e),
            }
        }

        Self {
            window,
            wait_ms: config.wait_ms,
            quit_key: config.quit_key,
            snapshot_path: config.snapshot_path.clone(),
        }
    }

    pub fn is_headless(&self) -> bool {
        self.window.is_none()
    }

    fn write_snapshot(
        &self,
        frame: &CvFrame,
        results: &[TrackResult],
        trackers: &[TrackerKind],
        fps: f64,
    ) -> Result<()> {
        let Some(path) = self.snapshot_path.as_ref() else {
            return Ok(());
        };
        let mut img = frame.to_rgb_image()?;
        annotate::annotate_frame(&mut img, results, trackers, fps);
        img.save(path)?;
        Ok(())
    }

    fn present(
        &mut self,
        frame: &mut CvFrame,
        results: &[TrackResult],
        trackers: &[TrackerKind],
        fps: f64,
    ) -> Result<LoopControl> {
        self.write_snapshot(frame, results, trackers, fps)?;

        let Some(window) = self.window.as_deref() else {
            return Ok(LoopControl::Continue);
        };

        draw_overlay(frame.mat_mut(), results, trackers, fps)?;
        highgui::imshow(window, frame.mat())?;

        let key = highgui::wait_key(self.wait_ms)?;
        match self.quit_key {
            Some(quit) if key >= 0 && (key & 0xFF) as u8 as char == quit => Ok(LoopControl::Quit),
            _ => Ok(LoopControl::Continue),
        }
    }
}

impl Display<CvFrame> for CvDisplay {
    fn show(
        &mut self,
        frame: &mut CvFrame,
        results: &[TrackResult],
        trackers: &[TrackerKind],
        fps: f64,
    ) -> roitrack::Result<LoopControl> {
        self.present(frame, results, trackers, fps)
            .map_err(TrackError::from)
    }
}

impl Drop for CvDisplay {
    fn drop(&mut self) {
        if let Some(window) = self.window.as_deref() {
            let _ = highgui::destroy_window(window);
        }
    }
}
