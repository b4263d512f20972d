//! Wires the OpenCV backends into the polling loop

use roitrack::{LoopStats, PollingLoop, Reporter, TrackerSet};
use std::io;

use crate::config::TrackingConfig;
use crate::cv_tracker::create_tracker;
use crate::display::CvDisplay;
use crate::error::Result;
use crate::frame::CvFrame;
use crate::roi;
use crate::source::ImageFileSource;

/// Select the region on the first frame, then track it until the loop ends
pub fn run(config: &TrackingConfig) -> Result<LoopStats> {
    config.validate()?;

    let mut source = ImageFileSource::new(config.resolved_image_path()?)?;
    let first = source.read_frame()?;
    let bbox = roi::resolve(config, &first)?;

    let mut trackers: TrackerSet<CvFrame> = TrackerSet::new();
    for kind in config.unique_trackers() {
        trackers.insert(kind, create_tracker(kind)?);
    }
    trackers.initialize(&first, bbox)?;
    log::info!(
        "Tracking {} with {}",
        bbox,
        trackers
            .kinds()
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut display = CvDisplay::new(config);
    if display.is_headless() && config.polling.poll_interval_ms == 0 {
        log::warn!("Headless with no poll interval, the image is re-read in a tight loop");
    }

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), config.output_format);

    let stats = PollingLoop::new(config.polling.clone()).run(
        &mut source,
        &mut trackers,
        &mut display,
        &mut reporter,
    )?;

    log::info!(
        "Processed {} frames ({} tracked, {} read failures) at {:.1} FPS",
        stats.total_frames,
        stats.tracked_frames,
        stats.read_failures,
        stats.average_fps
    );
    Ok(stats)
}
