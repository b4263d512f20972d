//! Single-target ROI tracking orchestration
//!
//! This crate runs a fixed set of visual trackers over frames that are polled
//! from a source, and reports where the region of interest went. It does not
//! implement any tracking algorithm: trackers, frame sources and displays are
//! supplied by the caller through the traits below.
//!
//! # Unified Interface
//!
//! ```rust,ignore
//! use roitrack::{Bbox, PollingLoop, PollingConfig, TrackerSet};
//!
//! let mut trackers = TrackerSet::new();
//! trackers.insert(TrackerKind::Kcf, Box::new(my_kcf));
//! trackers.initialize(&first_frame, Bbox::new(10.0, 10.0, 40.0, 40.0))?;
//!
//! let stats = PollingLoop::new(PollingConfig::default())
//!     .run(&mut source, &mut trackers, &mut display, &mut reporter)?;
//! ```

pub mod bbox;
pub mod error;
pub mod polling;
pub mod report;
pub mod tracker;

pub use bbox::{Bbox, NormalizedBbox};
pub use error::{Result, TrackError};
pub use polling::{Display, FrameSource, LoopControl, LoopStats, PollingConfig, PollingLoop};
pub use report::{OutputFormat, Reporter};
pub use tracker::{Frame, TrackResult, TrackerKind, TrackerSet, VisualTracker};
