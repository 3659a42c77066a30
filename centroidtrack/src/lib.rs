//! Centroid-based multi-object tracking library
//!
//! Assigns persistent ids to per-frame detections by greedy nearest-centroid
//! matching, consolidates duplicate boxes before tracking and counts
//! directional crossings of a horizontal band.
//!
//! ```rust,ignore
//! use centroidtrack::{merge_boxes, BoundingBox, CentroidTracker, TrajectoryStore};
//!
//! let mut tracker = CentroidTracker::default();
//! let mut trajectories = TrajectoryStore::default();
//!
//! let boxes = merge_boxes(&[BoundingBox::new(10, 10, 50, 90)], 0.3);
//! let objects = tracker.update(&boxes);
//! trajectories.count(&objects, 480);
//! ```

pub mod bbox;
pub mod trackers;
pub mod trajectory;

pub use bbox::{calculate_iou, merge_boxes, BoundingBox, Centroid, DEFAULT_MERGE_IOU};
pub use trackers::{
    CentroidTracker, CentroidTrackerConfig, LeftoverPolicy, ObjectTracker, TrackedIdentity,
};
pub use trajectory::{Crossing, CrossingBand, Trajectory, TrajectoryStore};
