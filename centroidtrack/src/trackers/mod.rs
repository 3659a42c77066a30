//! Multi-object tracking implementations
//!
//! Trackers consume one frame of boxes at a time and hand back the current
//! id -> centroid mapping. The pipeline only talks to them through
//! [`ObjectTracker`].

use crate::bbox::{BoundingBox, Centroid};
use std::collections::BTreeMap;

mod centroid;

pub use centroid::{
    distance_matrix, greedy_assignment, CentroidTracker, CentroidTrackerConfig, LeftoverPolicy,
    TrackedIdentity,
};

/// Common interface for frame-by-frame trackers
pub trait ObjectTracker: Send {
    /// Update tracker with the boxes of one frame
    ///
    /// # Arguments
    /// * `boxes` - merged detections for the frame, possibly empty
    ///
    /// # Returns
    /// Every identity still alive after the update, keyed by id
    fn update(&mut self, boxes: &[BoundingBox]) -> BTreeMap<u32, Centroid>;

    /// Drop all identities
    fn clear(&mut self);

    /// Number of identities currently alive
    fn num_tracked(&self) -> usize;
}

impl ObjectTracker for CentroidTracker {
    fn update(&mut self, boxes: &[BoundingBox]) -> BTreeMap<u32, Centroid> {
        self.update(boxes)
    }

    fn clear(&mut self) {
        self.clear()
    }

    fn num_tracked(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_behind_trait_object() {
        let mut tracker: Box<dyn ObjectTracker> = Box::new(CentroidTracker::default());

        let objects = tracker.update(&[
            BoundingBox::new(0, 0, 20, 20),
            BoundingBox::new(200, 200, 220, 220),
        ]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(tracker.num_tracked(), 2);

        tracker.clear();
        assert_eq!(tracker.num_tracked(), 0);

        // ids keep counting after a clear
        let objects = tracker.update(&[BoundingBox::new(0, 0, 20, 20)]);
        assert!(objects.contains_key(&2));
    }
}
