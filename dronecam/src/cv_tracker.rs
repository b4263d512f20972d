//! OpenCV tracker adapters
//!
//! KCF, CSRT and MIL live on the current tracking API which works on integer
//! rectangles. MOSSE, MedianFlow, Boosting and TLD only exist on the legacy
//! API which works on `Rect2d`.

use opencv::{
    core::{Rect, Rect2d},
    prelude::*,
    tracking, video,
};
use roitrack::{Bbox, TrackError, TrackerKind, VisualTracker};

use crate::error::Result;
use crate::frame::CvFrame;

fn backend_error(kind: TrackerKind, err: opencv::Error) -> TrackError {
    TrackError::backend(format!("{}: {}", kind, err))
}

/// Adapter for trackers on the current API
pub struct CvTracker<T> {
    kind: TrackerKind,
    inner: T,
}

impl<T: video::TrackerTrait> CvTracker<T> {
    pub fn new(kind: TrackerKind, inner: T) -> Self {
        Self { kind, inner }
    }
}

impl<T: video::TrackerTrait> VisualTracker<CvFrame> for CvTracker<T> {
    fn init(&mut self, frame: &CvFrame, roi: Bbox) -> roitrack::Result<bool> {
        let rect = Rect::new(
            roi.x as i32,
            roi.y as i32,
            roi.width as i32,
            roi.height as i32,
        );
        self.inner
            .init(frame.mat(), rect)
            .map_err(|e| backend_error(self.kind, e))?;
        Ok(true)
    }

    fn update(&mut self, frame: &CvFrame) -> roitrack::Result<Option<Bbox>> {
        let mut rect = Rect::default();
        let found = self
            .inner
            .update(frame.mat(), &mut rect)
            .map_err(|e| backend_error(self.kind, e))?;

        Ok(found.then(|| {
            Bbox::new(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            )
        }))
    }
}

/// Adapter for trackers that only exist on the legacy API
pub struct LegacyTracker<T> {
    kind: TrackerKind,
    inner: T,
}

impl<T: tracking::legacy_TrackerTrait> LegacyTracker<T> {
    pub fn new(kind: TrackerKind, inner: T) -> Self {
        Self { kind, inner }
    }
}

impl<T: tracking::legacy_TrackerTrait> VisualTracker<CvFrame> for LegacyTracker<T> {
    fn init(&mut self, frame: &CvFrame, roi: Bbox) -> roitrack::Result<bool> {
        let rect = Rect2d::new(roi.x, roi.y, roi.width, roi.height);
        self.inner
            .init(frame.mat(), rect)
            .map_err(|e| backend_error(self.kind, e))
    }

    fn update(&mut self, frame: &CvFrame) -> roitrack::Result<Option<Bbox>> {
        let mut rect = Rect2d::default();
        let found = self
            .inner
            .update(frame.mat(), &mut rect)
            .map_err(|e| backend_error(self.kind, e))?;

        Ok(found.then(|| Bbox::new(rect.x, rect.y, rect.width, rect.height)))
    }
}

/// Build an uninitialized tracker of the given kind
pub fn create_tracker(kind: TrackerKind) -> Result<Box<dyn VisualTracker<CvFrame>>> {
    log::debug!("Creating {} tracker", kind);

    let tracker: Box<dyn VisualTracker<CvFrame>> = match kind {
        TrackerKind::Kcf => Box::new(CvTracker::new(kind, tracking::TrackerKCF::create_def()?)),
        TrackerKind::Csrt => Box::new(CvTracker::new(kind, tracking::TrackerCSRT::create_def()?)),
        TrackerKind::Mil => Box::new(CvTracker::new(kind, video::TrackerMIL::create_def()?)),
        TrackerKind::Mosse => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerMOSSE::create()?,
        )),
        TrackerKind::MedianFlow => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerMedianFlow::create_def()?,
        )),
        TrackerKind::Boosting => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerBoosting::create_def()?,
        )),
        TrackerKind::Tld => Box::new(LegacyTracker::new(
            kind,
            tracking::legacy_TrackerTLD::create_def()?,
        )),
    };

    Ok(tracker)
}
