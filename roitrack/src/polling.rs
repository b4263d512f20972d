//! Polling loop: re-read the frame, run the trackers, report, display
//!
//! The loop is fully sequential. It stops when the display asks to quit, when
//! the optional frame budget is used up, or when the source fails too many
//! times in a row.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::{Duration, Instant};

use crate::error::{Result, TrackError};
use crate::report::Reporter;
use crate::tracker::{Frame, TrackResult, TrackerKind, TrackerSet};

/// Produces a freshly decoded frame on every call
pub trait FrameSource<F: Frame> {
    /// Read the next frame. `TrackError::FrameRead` is retried by the loop,
    /// any other error ends it.
    fn read(&mut self) -> Result<F>;
}

/// What the display wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Debug overlay for the frame of the current iteration
pub trait Display<F: Frame> {
    fn show(
        &mut self,
        frame: &mut F,
        results: &[TrackResult],
        trackers: &[TrackerKind],
        fps: f64,
    ) -> Result<LoopControl>;
}

/// Configuration for the polling loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Consecutive read failures tolerated before giving up
    pub max_fails: u32,
    /// Stop after this many successfully read frames
    pub max_frames: Option<u64>,
    /// Pause between iterations, for sources without a display to block on
    pub poll_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_fails: 20,
            max_frames: None,
            poll_interval_ms: 0,
        }
    }
}

/// Loop statistics
#[derive(Debug, Clone, Default)]
pub struct LoopStats {
    pub total_frames: u64,
    pub tracked_frames: u64,
    pub read_failures: u64,
    pub total_processing_time: Duration,
    pub average_fps: f64,
}

impl LoopStats {
    fn calculate_averages(&mut self) {
        let secs = self.total_processing_time.as_secs_f64();
        if self.total_frames > 0 && secs > 0.0 {
            self.average_fps = self.total_frames as f64 / secs;
        }
    }
}

pub struct PollingLoop {
    config: PollingConfig,
}

impl PollingLoop {
    pub fn new(config: PollingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    /// Run until quit, frame budget, or the failure ceiling
    pub fn run<F, S, D, W>(
        &self,
        source: &mut S,
        trackers: &mut TrackerSet<F>,
        display: &mut D,
        reporter: &mut Reporter<W>,
    ) -> Result<LoopStats>
    where
        F: Frame,
        S: FrameSource<F>,
        D: Display<F>,
        W: Write,
    {
        let mut stats = LoopStats::default();
        let kinds = trackers.kinds();
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let mut fails = 0u32;

        loop {
            if fails >= self.config.max_fails {
                log::error!("Failed to read image {} times in a row, exiting", fails);
                return Err(TrackError::ReadFailuresExceeded { failures: fails });
            }

            if let Some(max_frames) = self.config.max_frames {
                if stats.total_frames >= max_frames {
                    log::info!("Frame budget of {} reached", max_frames);
                    break;
                }
            }

            let frame_start = Instant::now();

            let mut frame = match source.read() {
                Ok(frame) => frame,
                Err(e) if e.is_read_failure() => {
                    log::warn!("{}", e);
                    fails += 1;
                    stats.read_failures += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            fails = 0;
            stats.total_frames += 1;

            let results = trackers.update(&frame);
            if !results.is_empty() {
                stats.tracked_frames += 1;
            }

            reporter.report(&results, &frame)?;

            let elapsed = frame_start.elapsed().as_secs_f64();
            let fps = if elapsed > 0.0 { 1.0 / elapsed } else { 0.0 };

            let control = display.show(&mut frame, &results, &kinds, fps)?;

            if stats.total_frames % 100 == 0 {
                log::debug!(
                    "Processed {} frames, {} tracked",
                    stats.total_frames,
                    stats.tracked_frames
                );
            }

            if !interval.is_zero() {
                std::thread::sleep(interval);
            }

            stats.total_processing_time += frame_start.elapsed();

            if control == LoopControl::Quit {
                log::info!("Quit requested after {} frames", stats.total_frames);
                break;
            }
        }

        stats.calculate_averages();
        Ok(stats)
    }
}
