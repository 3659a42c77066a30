//! Monitor configuration, loadable from a JSON file
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.

use crate::error::{MonitorError, Result};
use centroidtrack::{CentroidTrackerConfig, LeftoverPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How leftovers are handled after matching (see [`LeftoverPolicy`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverMode {
    #[default]
    CardinalityGated,
    Symmetric,
}

impl From<LeftoverMode> for LeftoverPolicy {
    fn from(mode: LeftoverMode) -> Self {
        match mode {
            LeftoverMode::CardinalityGated => LeftoverPolicy::CardinalityGated,
            LeftoverMode::Symmetric => LeftoverPolicy::Symmetric,
        }
    }
}

/// Configuration for the centroid tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Frames an identity survives without a match
    pub max_disappeared: u32,
    /// Largest centroid jump (pixels) still matched to the same identity
    pub max_distance: f64,
    /// Minimum spacing (pixels) between a new identity and tracked ones
    pub min_distance: f64,
    pub leftover_policy: LeftoverMode,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 40,
            max_distance: 50.0,
            min_distance: 30.0,
            leftover_policy: LeftoverMode::CardinalityGated,
        }
    }
}

impl From<&TrackingConfig> for CentroidTrackerConfig {
    fn from(config: &TrackingConfig) -> Self {
        CentroidTrackerConfig {
            max_disappeared: config.max_disappeared,
            max_distance: config.max_distance,
            min_distance: config.min_distance,
            leftover_policy: config.leftover_policy.into(),
        }
    }
}

/// Configuration for a monitoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Detections at or below this confidence are ignored
    pub confidence_threshold: f32,
    /// Detector class id treated as a person
    pub person_class_id: u32,
    /// IoU above which two person boxes are merged
    pub merge_iou_threshold: f64,
    pub tracking: TrackingConfig,
    /// Half height of the counting band around the frame middle
    pub crossing_band_half_height: i32,
    /// First hour (0-23) counted as night
    pub night_start_hour: u32,
    /// First hour (0-23) counted as day again
    pub night_end_hour: u32,
    /// Directory receiving lone-woman snapshots
    pub snapshot_dir: PathBuf,
    /// JSON file overwritten with the latest record
    pub record_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            person_class_id: crate::types::PERSON_CLASS_ID,
            merge_iou_threshold: centroidtrack::DEFAULT_MERGE_IOU,
            tracking: TrackingConfig::default(),
            crossing_band_half_height: centroidtrack::trajectory::DEFAULT_BAND_HALF_HEIGHT,
            night_start_hour: 18,
            night_end_hour: 6,
            snapshot_dir: PathBuf::from("."),
            record_path: PathBuf::from("people_count.json"),
        }
    }
}

impl MonitorConfig {
    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| MonitorError::config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(MonitorError::config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.merge_iou_threshold) {
            return Err(MonitorError::config(format!(
                "merge_iou_threshold must be within [0, 1], got {}",
                self.merge_iou_threshold
            )));
        }
        if self.tracking.max_distance < 0.0 || self.tracking.min_distance < 0.0 {
            return Err(MonitorError::config("tracking distances must not be negative"));
        }
        if self.crossing_band_half_height < 0 {
            return Err(MonitorError::config(
                "crossing_band_half_height must not be negative",
            ));
        }
        if self.night_start_hour > 23 || self.night_end_hour > 23 {
            return Err(MonitorError::config(format!(
                "night hours must be within 0-23, got {}..{}",
                self.night_start_hour, self.night_end_hour
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_abs_diff_eq!(config.confidence_threshold, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(config.merge_iou_threshold, 0.3, epsilon = 1e-12);
        assert_eq!(config.tracking.max_disappeared, 40);
        assert_eq!(config.record_path, PathBuf::from("people_count.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MonitorConfig::from_json(
            r#"{ "tracking": { "max_distance": 80.0, "leftover_policy": "symmetric" } }"#,
        )
        .unwrap();
        assert_abs_diff_eq!(config.tracking.max_distance, 80.0, epsilon = 1e-12);
        assert_eq!(config.tracking.max_disappeared, 40);
        assert_eq!(config.tracking.leftover_policy, LeftoverMode::Symmetric);
        assert_eq!(config.night_start_hour, 18);

        let tracker: CentroidTrackerConfig = (&config.tracking).into();
        assert_eq!(tracker.leftover_policy, LeftoverPolicy::Symmetric);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(MonitorConfig::from_json(r#"{ "night_start_hour": 24 }"#).is_err());
        assert!(MonitorConfig::from_json(r#"{ "confidence_threshold": 1.5 }"#).is_err());
        assert!(MonitorConfig::from_json(r#"{ "tracking": { "min_distance": -1.0 } }"#).is_err());
        assert!(MonitorConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "confidence_threshold": 0.4 }}"#).unwrap();

        let config = MonitorConfig::from_file(file.path()).unwrap();
        assert_abs_diff_eq!(config.confidence_threshold, 0.4, epsilon = 1e-6);

        let missing = MonitorConfig::from_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(MonitorError::ConfigError(_))));
    }
}
