//! Greedy nearest-centroid tracker with disappearance tolerance

use crate::bbox::{BoundingBox, Centroid};
use ndarray::prelude::*;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// How unmatched rows (tracked identities) and columns (new centroids) are
/// handled after greedy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftoverPolicy {
    /// Only one side is processed, picked by comparing the two counts: with
    /// at least as many identities as centroids the leftover identities age,
    /// otherwise the leftover centroids may register. With equal counts an
    /// unmatched centroid is dropped for that frame.
    #[default]
    CardinalityGated,
    /// Leftover identities always age and leftover centroids are always
    /// offered for registration.
    Symmetric,
}

/// Tuning for [`CentroidTracker`]
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidTrackerConfig {
    /// Frames an identity may go unmatched before it is dropped
    pub max_disappeared: u32,
    /// Largest centroid jump (pixels) accepted as the same object
    pub max_distance: f64,
    /// New identities must be at least this far from every tracked centroid
    pub min_distance: f64,
    pub leftover_policy: LeftoverPolicy,
}

impl Default for CentroidTrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 50,
            max_distance: 50.0,
            min_distance: 30.0,
            leftover_policy: LeftoverPolicy::CardinalityGated,
        }
    }
}

/// One persistent identity
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedIdentity {
    pub id: u32,
    /// Position from the last matched frame
    pub centroid: Centroid,
    /// Consecutive frames without a match
    pub disappeared_frames: u32,
    /// Registration centroid followed by every matched centroid
    pub history: Vec<Centroid>,
}

impl TrackedIdentity {
    fn new(id: u32, centroid: Centroid) -> Self {
        Self {
            id,
            centroid,
            disappeared_frames: 0,
            history: vec![centroid],
        }
    }
}

/// Pairwise Euclidean distances, rows = tracked, cols = incoming
pub fn distance_matrix(tracked: &[Centroid], incoming: &[Centroid]) -> Array2<f64> {
    let n_rows = tracked.len();
    let n_cols = incoming.len();

    if n_rows == 0 || n_cols == 0 {
        return Array2::zeros((n_rows, n_cols));
    }

    // Rows in parallel, written into the matrix afterwards
    let rows: Vec<Vec<f64>> = tracked
        .par_iter()
        .map(|from| incoming.iter().map(|to| from.distance(to)).collect())
        .collect();

    let mut distances = Array2::zeros((n_rows, n_cols));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, d) in row.into_iter().enumerate() {
            distances[[i, j]] = d;
        }
    }
    distances
}

/// Greedy row-by-row assignment.
///
/// Rows are visited in ascending order of their smallest distance (ties keep
/// row order). Each row proposes its nearest column (first one on ties); the
/// pair is accepted if neither side is taken yet and the distance does not
/// exceed `max_distance`.
pub fn greedy_assignment(distances: ArrayView2<f64>, max_distance: f64) -> Vec<(usize, usize)> {
    let proposals: Vec<(usize, usize, f64)> = distances
        .outer_iter()
        .enumerate()
        .filter_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (col, &d)| match best {
                    Some((_, best_d)) if best_d <= d => best,
                    _ => Some((col, d)),
                })
                .map(|(col, d)| (row, col, d))
        })
        .collect();

    let mut order = proposals;
    order.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut used_rows = vec![false; distances.nrows()];
    let mut used_cols = vec![false; distances.ncols()];
    let mut pairs = Vec::new();

    for (row, col, d) in order {
        if used_rows[row] || used_cols[col] {
            continue;
        }
        if d > max_distance {
            continue;
        }
        used_rows[row] = true;
        used_cols[col] = true;
        pairs.push((row, col));
    }

    pairs
}

/// Multi-object tracker keyed purely on centroid distance
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    config: CentroidTrackerConfig,
    next_id: u32,
    identities: BTreeMap<u32, TrackedIdentity>,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(CentroidTrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: CentroidTrackerConfig) -> Self {
        Self {
            config,
            next_id: 0,
            identities: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &CentroidTrackerConfig {
        &self.config
    }

    /// Id the next registration will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn identity(&self, id: u32) -> Option<&TrackedIdentity> {
        self.identities.get(&id)
    }

    /// Tracked identities in id order
    pub fn identities(&self) -> impl Iterator<Item = &TrackedIdentity> {
        self.identities.values()
    }

    /// Current id -> centroid mapping
    pub fn objects(&self) -> BTreeMap<u32, Centroid> {
        self.identities
            .iter()
            .map(|(id, identity)| (*id, identity.centroid))
            .collect()
    }

    /// Drop every identity. Ids keep counting up from where they were.
    pub fn clear(&mut self) {
        self.identities.clear();
    }

    pub(crate) fn register(&mut self, centroid: Centroid) -> u32 {
        let id = self.next_id;
        self.identities.insert(id, TrackedIdentity::new(id, centroid));
        self.next_id += 1;
        log::debug!("registered identity {} at {}", id, centroid);
        id
    }

    pub(crate) fn deregister(&mut self, id: u32) {
        if self.identities.remove(&id).is_some() {
            log::debug!("deregistered identity {}", id);
        }
    }

    /// Bump the miss counter and drop the identity once it runs out of frames
    fn mark_disappeared(&mut self, id: u32) {
        let expired = match self.identities.get_mut(&id) {
            Some(identity) => {
                identity.disappeared_frames += 1;
                identity.disappeared_frames > self.config.max_disappeared
            }
            None => false,
        };
        if expired {
            self.deregister(id);
        }
    }

    /// Register `centroid` unless an existing identity sits closer than `min_distance`
    fn register_if_clear(&mut self, centroid: Centroid) -> Option<u32> {
        let too_close = self
            .identities
            .values()
            .any(|identity| identity.centroid.distance(&centroid) < self.config.min_distance);

        if too_close {
            log::debug!("skipped registration at {}: too close to a tracked identity", centroid);
            None
        } else {
            Some(self.register(centroid))
        }
    }

    /// Feed one frame of boxes and return the id -> centroid mapping
    pub fn update(&mut self, boxes: &[BoundingBox]) -> BTreeMap<u32, Centroid> {
        if boxes.is_empty() {
            let ids: Vec<u32> = self.identities.keys().copied().collect();
            for id in ids {
                self.mark_disappeared(id);
            }
            return self.objects();
        }

        let incoming: Vec<Centroid> = boxes.iter().map(BoundingBox::centroid).collect();

        if self.identities.is_empty() {
            for centroid in incoming {
                self.register(centroid);
            }
            return self.objects();
        }

        let ids: Vec<u32> = self.identities.keys().copied().collect();
        let tracked: Vec<Centroid> = self.identities.values().map(|i| i.centroid).collect();

        let distances = distance_matrix(&tracked, &incoming);
        let pairs = greedy_assignment(distances.view(), self.config.max_distance);

        let mut used_rows = vec![false; ids.len()];
        let mut used_cols = vec![false; incoming.len()];

        for &(row, col) in &pairs {
            used_rows[row] = true;
            used_cols[col] = true;

            if let Some(identity) = self.identities.get_mut(&ids[row]) {
                identity.centroid = incoming[col];
                identity.disappeared_frames = 0;
                identity.history.push(incoming[col]);
            }
        }

        let leftover_rows: Vec<u32> = (0..ids.len())
            .filter(|&row| !used_rows[row])
            .map(|row| ids[row])
            .collect();
        let leftover_cols: Vec<Centroid> = (0..incoming.len())
            .filter(|&col| !used_cols[col])
            .map(|col| incoming[col])
            .collect();

        log::debug!(
            "matched {} of {} identities to {} centroids",
            pairs.len(),
            ids.len(),
            incoming.len()
        );

        let (age_rows, offer_cols) = match self.config.leftover_policy {
            LeftoverPolicy::CardinalityGated => {
                let rows_dominate = ids.len() >= incoming.len();
                (rows_dominate, !rows_dominate)
            }
            LeftoverPolicy::Symmetric => (true, true),
        };

        if age_rows {
            for id in leftover_rows {
                self.mark_disappeared(id);
            }
        }

        if offer_cols {
            for centroid in leftover_cols {
                self.register_if_clear(centroid);
            }
        } else if !leftover_cols.is_empty() {
            log::debug!("{} unmatched centroids dropped", leftover_cols.len());
        }

        self.objects()
    }
}
