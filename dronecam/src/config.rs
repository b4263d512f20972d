//! Runtime configuration
//!
//! Defaults reproduce the live setup: poll `droneCam.ppm` in the working
//! directory, run KCF and MOSSE, show a window and quit on `q`. A JSON file
//! can override any field; command line flags override the file.

use roitrack::{Bbox, OutputFormat, PollingConfig, TrackerKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackingError};

pub const DEFAULT_IMAGE_PATH: &str = "droneCam.ppm";
pub const DEFAULT_WINDOW_NAME: &str = "Tracking";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Image file rewritten by the camera
    pub image_path: PathBuf,
    /// Trackers to run, in reporting priority order
    pub trackers: Vec<TrackerKind>,
    /// Preset region `[x, y, w, h]`; interactive selection when absent
    pub roi: Option<Vec<f64>>,
    pub output_format: OutputFormat,
    /// Run without a window
    pub headless: bool,
    pub window_name: String,
    /// Milliseconds to wait for a key press after showing a frame
    pub wait_ms: i32,
    /// Key that stops the loop; `None` runs until the source gives up
    pub quit_key: Option<char>,
    /// Write the annotated frame here after every iteration
    pub snapshot_path: Option<PathBuf>,
    pub polling: PollingConfig,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            trackers: TrackerKind::DEFAULT_SET.to_vec(),
            roi: None,
            output_format: OutputFormat::Tuple,
            headless: false,
            window_name: DEFAULT_WINDOW_NAME.to_string(),
            wait_ms: 1,
            quit_key: Some('q'),
            snapshot_path: None,
            polling: PollingConfig::default(),
        }
    }
}

impl TrackingConfig {
    /// Load a JSON configuration file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TrackingError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trackers.is_empty() {
            return Err(TrackingError::config("at least one tracker is required"));
        }
        if self.image_path.as_os_str().is_empty() {
            return Err(TrackingError::config("image path is empty"));
        }
        if self.polling.max_fails == 0 {
            return Err(TrackingError::config("max_fails must be at least 1"));
        }
        if self.wait_ms < 0 {
            return Err(TrackingError::config("wait_ms cannot be negative"));
        }
        Ok(())
    }

    /// Trackers with duplicates removed, first occurrence wins
    pub fn unique_trackers(&self) -> Vec<TrackerKind> {
        let mut kinds: Vec<TrackerKind> = Vec::with_capacity(self.trackers.len());
        for kind in &self.trackers {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }

    /// Image path made absolute against the working directory
    pub fn resolved_image_path(&self) -> Result<PathBuf> {
        if self.image_path.is_absolute() {
            return Ok(self.image_path.clone());
        }
        Ok(std::env::current_dir()?.join(&self.image_path))
    }

    /// Preset region, if one was configured
    pub fn roi_bbox(&self) -> Result<Option<Bbox>> {
        match &self.roi {
            None => Ok(None),
            Some(components) => {
                let bbox = Bbox::from_components(components)?;
                if bbox.is_empty() {
                    return Err(TrackingError::RoiCancelled);
                }
                Ok(Some(bbox))
            }
        }
    }
}

/// Parse `x,y,w,h` into its numeric components
pub fn parse_components(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| TrackingError::config(format!("invalid ROI value '{}': {}", part, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackingConfig::default();
        assert_eq!(config.image_path, PathBuf::from("droneCam.ppm"));
        assert_eq!(config.trackers, vec![TrackerKind::Kcf, TrackerKind::Mosse]);
        assert_eq!(config.polling.max_fails, 20);
        assert_eq!(config.quit_key, Some('q'));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TrackingConfig = serde_json::from_str(
            r#"{"trackers": ["csrt", "MedianFlow"], "headless": true, "polling": {"max_fails": 5}}"#,
        )
        .unwrap();

        assert_eq!(config.trackers, vec![TrackerKind::Csrt, TrackerKind::MedianFlow]);
        assert!(config.headless);
        assert_eq!(config.polling.max_fails, 5);
        assert_eq!(config.polling.max_frames, None);
        assert_eq!(config.window_name, "Tracking");
    }

    #[test]
    fn test_unknown_tracker_in_json() {
        let err = serde_json::from_str::<TrackingConfig>(r#"{"trackers": ["goturn"]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_trackers() {
        let config = TrackingConfig {
            trackers: vec![],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TrackingError::ConfigError(_))));
    }

    #[test]
    fn test_unique_trackers_keeps_first() {
        let config = TrackingConfig {
            trackers: vec![TrackerKind::Mosse, TrackerKind::Kcf, TrackerKind::Mosse],
            ..Default::default()
        };
        assert_eq!(config.unique_trackers(), vec![TrackerKind::Mosse, TrackerKind::Kcf]);
    }

    #[test]
    fn test_roi_components() {
        assert_eq!(parse_components("1, 2,3.5,4").unwrap(), vec![1.0, 2.0, 3.5, 4.0]);
        assert!(parse_components("1,two,3,4").is_err());

        let config = TrackingConfig {
            roi: Some(parse_components("1,2,3").unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            config.roi_bbox(),
            Err(TrackingError::Track(roitrack::TrackError::InvalidBbox { components: 3 }))
        ));
    }

    #[test]
    fn test_zero_sized_roi_is_cancelled() {
        let config = TrackingConfig {
            roi: Some(vec![10.0, 10.0, 0.0, 0.0]),
            ..Default::default()
        };
        assert!(matches!(config.roi_bbox(), Err(TrackingError::RoiCancelled)));
    }

    #[test]
    fn test_relative_path_is_resolved() {
        let resolved = TrackingConfig::default().resolved_image_path().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("droneCam.ppm"));
    }
}
