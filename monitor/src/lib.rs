//! Safety Monitor Library
//!
//! Per-frame people monitoring on top of `centroidtrack`: person boxes are
//! merged, tracked and counted as they cross the middle of the frame, and a
//! lone woman seen at night raises an alert with a saved snapshot.
//!
//! Person detection and attribute classification are injected through the
//! [`Detector`] and [`AttributeClassifier`] traits.

pub mod alert;
pub mod clock;
pub mod config;
pub mod detector_trait;
pub mod error;
pub mod frame_pipeline;
pub mod image_utils;
pub mod persistence;
pub mod types;

pub use alert::{AlertDecision, AlertEvaluator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LeftoverMode, MonitorConfig, TrackingConfig};
pub use detector_trait::{AttributeClassifier, Detector, FixedClassifier, ReplayDetector};
pub use error::{MonitorError, Result};
pub use frame_pipeline::FramePipeline;
pub use persistence::{
    JpegSnapshotWriter, JsonRecordWriter, NullWriter, RecordWriter, SnapshotWriter,
};
pub use types::{AlertRecord, AttributeCounts, AttributeLabel, Detection, PERSON_CLASS_ID};

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
