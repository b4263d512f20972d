//! Command line arguments

use clap::Parser;
use roitrack::{OutputFormat, TrackerKind};
use std::path::PathBuf;

use crate::config::{parse_components, TrackingConfig};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "dronecam",
    about = "Track a selected region across a continuously rewritten camera image"
)]
pub struct Args {
    /// Image file to poll (default: droneCam.ppm)
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// JSON configuration file; flags given here take precedence
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Comma separated trackers, e.g. kcf,mosse,csrt
    #[arg(long, value_delimiter = ',')]
    pub trackers: Option<Vec<TrackerKind>>,

    /// Preset region `x,y,w,h` instead of selecting it on screen
    #[arg(long, value_name = "X,Y,W,H", allow_hyphen_values = true)]
    pub roi: Option<String>,

    /// Consecutive read failures before exiting
    #[arg(long)]
    pub max_fails: Option<u32>,

    /// Stop after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Output line format: tuple or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Do not open a window
    #[arg(long)]
    pub headless: bool,

    /// Sleep between iterations in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Key wait after each displayed frame in milliseconds
    #[arg(long)]
    pub wait_ms: Option<i32>,

    /// Ignore the quit key and run until reads keep failing
    #[arg(long)]
    pub no_quit_key: bool,

    /// Save the annotated frame to this file after every iteration
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    /// Merge flags over the configuration file (or the defaults)
    pub fn into_config(self) -> Result<TrackingConfig> {
        let mut config = match &self.config {
            Some(path) => TrackingConfig::from_file(path)?,
            None => TrackingConfig::default(),
        };

        if let Some(image) = self.image {
            config.image_path = image;
        }
        if let Some(trackers) = self.trackers {
            config.trackers = trackers;
        }
        if let Some(roi) = self.roi.as_deref() {
            config.roi = Some(parse_components(roi)?);
        }
        if let Some(max_fails) = self.max_fails {
            config.polling.max_fails = max_fails;
        }
        if self.max_frames.is_some() {
            config.polling.max_frames = self.max_frames;
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if self.headless {
            config.headless = true;
        }
        if let Some(interval) = self.poll_interval_ms {
            config.polling.poll_interval_ms = interval;
        }
        if let Some(wait_ms) = self.wait_ms {
            config.wait_ms = wait_ms;
        }
        if self.no_quit_key {
            config.quit_key = None;
        }
        if self.snapshot.is_some() {
            config.snapshot_path = self.snapshot;
        }

        config.validate()?;
        Ok(config)
    }
}
