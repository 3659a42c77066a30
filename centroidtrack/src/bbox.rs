//! Integer pixel boxes, centroids and overlapping-box consolidation

use std::fmt;

/// Pixel-aligned bounding box with inclusive integer corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width counted in pixels, both edges included
    pub fn width(&self) -> i64 {
        (self.x2 as i64 - self.x1 as i64 + 1).max(0)
    }

    /// Height counted in pixels, both edges included
    pub fn height(&self) -> i64 {
        (self.y2 as i64 - self.y1 as i64 + 1).max(0)
    }

    /// Saturates for boxes spanning the whole `i32` range
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Geometric center, truncated toward zero
    pub fn centroid(&self) -> Centroid {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;
        Centroid::new(mid(self.x1, self.x2), mid(self.y1, self.y2))
    }

    /// Smallest box containing both `self` and `other`
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// True when x1 < x2 and y1 < y2
    pub fn is_valid(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Integer center point of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl Centroid {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another centroid
    pub fn distance(&self, other: &Centroid) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Default overlap above which two detections are treated as one object
pub const DEFAULT_MERGE_IOU: f64 = 0.3;

/// IoU with inclusive-pixel areas (a 0..10 box is 11 pixels wide)
pub fn calculate_iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let inter = BoundingBox {
        x1: a.x1.max(b.x1),
        y1: a.y1.max(b.y1),
        x2: a.x2.min(b.x2),
        y2: a.y2.min(b.y2),
    };
    let inter_area = inter.area() as f64;
    let union = a.area() as f64 + b.area() as f64 - inter_area;

    if union > 0.0 {
        inter_area / union
    } else {
        0.0
    }
}

/// Collapse overlapping detections into single boxes.
///
/// Boxes are consumed front to back. Each popped box absorbs every remaining
/// box whose IoU with it exceeds `iou_threshold`, and the grown box goes
/// straight to the output. It is not compared again, so a chain A-B-C where
/// only neighbours overlap enough can come out as two boxes.
pub fn merge_boxes(boxes: &[BoundingBox], iou_threshold: f64) -> Vec<BoundingBox> {
    let mut pending: Vec<BoundingBox> = boxes.to_vec();
    let mut merged = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let seed = pending.remove(0);

        // Candidates are judged against the seed as it was popped
        let (absorbed, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|other| calculate_iou(&seed, other) > iou_threshold);
        pending = rest;

        let grown = absorbed.iter().fold(seed, |acc, other| acc.union(other));
        if !absorbed.is_empty() {
            log::debug!("merged {} boxes into {}", absorbed.len() + 1, grown);
        }
        merged.push(grown);
    }

    merged
}
