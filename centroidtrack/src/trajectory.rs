//! Per-identity trajectories and up/down counting across a horizontal band

use crate::bbox::Centroid;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Default half height (pixels) of the counting band around the frame middle
pub const DEFAULT_BAND_HALF_HEIGHT: i32 = 30;

/// Horizontal strip, inclusive on both edges, where crossings are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingBand {
    pub top: i32,
    pub bottom: i32,
}

impl CrossingBand {
    /// Band centred on `frame_height / 2` (integer halving)
    pub fn for_frame_height(frame_height: u32, half_height: i32) -> Self {
        let middle = (frame_height / 2) as i32;
        Self {
            top: middle - half_height,
            bottom: middle + half_height,
        }
    }

    pub fn contains(&self, y: i32) -> bool {
        self.top <= y && y <= self.bottom
    }
}

/// Direction an identity was counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Up,
    Down,
}

/// Trajectory record of one identity
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub id: u32,
    pub history: Vec<Centroid>,
    /// Set once the identity has been counted; never cleared
    pub counted: bool,
}

impl Trajectory {
    fn new(id: u32, centroid: Centroid) -> Self {
        Self {
            id,
            history: vec![centroid],
            counted: false,
        }
    }

    /// Mean y of every recorded position
    pub fn mean_y(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.history.iter().map(|c| c.y as f64).sum();
        sum / self.history.len() as f64
    }
}

/// Session-owned trajectories plus monotonic up/down totals
#[derive(Debug, Clone)]
pub struct TrajectoryStore {
    band_half_height: i32,
    trajectories: HashMap<u32, Trajectory>,
    total_up: u64,
    total_down: u64,
}

impl Default for TrajectoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_BAND_HALF_HEIGHT)
    }
}

impl TrajectoryStore {
    pub fn new(band_half_height: i32) -> Self {
        Self {
            band_half_height,
            trajectories: HashMap::new(),
            total_up: 0,
            total_down: 0,
        }
    }

    pub fn total_up(&self) -> u64 {
        self.total_up
    }

    pub fn total_down(&self) -> u64 {
        self.total_down
    }

    pub fn trajectory(&self, id: u32) -> Option<&Trajectory> {
        self.trajectories.get(&id)
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Record this frame's tracker output and count first band entries.
    ///
    /// Direction is the new y minus the mean y of the positions seen so far.
    /// An identity's first sighting only starts its trajectory.
    pub fn count(
        &mut self,
        tracked: &BTreeMap<u32, Centroid>,
        frame_height: u32,
    ) -> Vec<(u32, Crossing)> {
        let band = CrossingBand::for_frame_height(frame_height, self.band_half_height);
        let mut crossings = Vec::new();

        for (&id, &centroid) in tracked {
            let trajectory = match self.trajectories.entry(id) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    slot.insert(Trajectory::new(id, centroid));
                    continue;
                }
            };

            let direction = centroid.y as f64 - trajectory.mean_y();
            trajectory.history.push(centroid);

            if trajectory.counted || !band.contains(centroid.y) {
                continue;
            }

            let crossing = if direction < 0.0 {
                Crossing::Up
            } else if direction > 0.0 {
                Crossing::Down
            } else {
                continue;
            };

            trajectory.counted = true;
            match crossing {
                Crossing::Up => self.total_up += 1,
                Crossing::Down => self.total_down += 1,
            }
            log::debug!("identity {} counted {:?} at y={}", id, crossing, centroid.y);
            crossings.push((id, crossing));
        }

        crossings
    }

    /// Forget trajectories of identities missing from the tracker output.
    /// Totals are untouched.
    pub fn prune(&mut self, tracked: &BTreeMap<u32, Centroid>) {
        self.trajectories.retain(|id, _| tracked.contains_key(id));
    }
}
