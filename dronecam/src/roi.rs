//! Region of interest selection on the first frame

use opencv::highgui;
use roitrack::Bbox;

use crate::config::TrackingConfig;
use crate::error::{Result, TrackingError};
use crate::frame::CvFrame;

const SELECTOR_WINDOW: &str = "ROI selector";

/// Let the operator drag a rectangle over the frame
pub fn select_interactively(frame: &CvFrame) -> Result<Bbox> {
    log::info!("Select the target and press SPACE or ENTER, C to cancel");
    let rect = highgui::select_roi(SELECTOR_WINDOW, frame.mat(), false, false, true)?;
    highgui::destroy_window(SELECTOR_WINDOW)?;

    let bbox = Bbox::new(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    if bbox.is_empty() {
        return Err(TrackingError::RoiCancelled);
    }
    Ok(bbox)
}

/// Preset region from the configuration, otherwise ask the operator
pub fn resolve(config: &TrackingConfig, frame: &CvFrame) -> Result<Bbox> {
    if let Some(bbox) = config.roi_bbox()? {
        log::info!("Using preset region {}", bbox);
        return Ok(bbox);
    }
    if config.headless {
        return Err(TrackingError::config(
            "headless runs need a preset region (--roi x,y,w,h)",
        ));
    }
    select_interactively(frame)
}
