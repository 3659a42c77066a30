/// Per-frame monitoring pipeline
///
/// Each frame goes through:
/// 1. Filtering: person detections above the confidence threshold
/// 2. Merging: overlapping person boxes collapse into one
/// 3. Tracking + counting: centroid tracker update, band crossings
/// 4. Attributes: every merged box is cropped and classified
/// 5. Alert: lone woman at night, with a snapshot of the frame
///
/// Nothing escapes the frame boundary. Every call returns an [`AlertRecord`]
/// and hands it to the record writer, including frames that failed.
use crate::alert::AlertEvaluator;
use crate::clock::Clock;
use crate::config::MonitorConfig;
use crate::detector_trait::{AttributeClassifier, Detector};
use crate::error::{MonitorError, Result};
use crate::image_utils::crop_region;
use crate::persistence::{JpegSnapshotWriter, JsonRecordWriter, RecordWriter, SnapshotWriter};
use crate::types::{format_timestamp, AlertRecord, AttributeCounts, AttributeLabel, Detection};
use centroidtrack::{merge_boxes, BoundingBox, CentroidTracker, TrajectoryStore};
use chrono::{NaiveDateTime, Timelike};
use image::RgbImage;

/// One monitoring session: tracker, trajectories and writers
pub struct FramePipeline {
    config: MonitorConfig,
    tracker: CentroidTracker,
    trajectories: TrajectoryStore,
    evaluator: AlertEvaluator,
    snapshots: Box<dyn SnapshotWriter>,
    records: Box<dyn RecordWriter>,
    frames_processed: u64,
}

impl FramePipeline {
    /// Session writing snapshots and records where `config` points
    pub fn new(config: MonitorConfig) -> Result<Self> {
        let snapshots = JpegSnapshotWriter::new(config.snapshot_dir.clone());
        let records = JsonRecordWriter::new(config.record_path.clone());
        Self::with_writers(config, Box::new(snapshots), Box::new(records))
    }

    pub fn with_writers(
        config: MonitorConfig,
        snapshots: Box<dyn SnapshotWriter>,
        records: Box<dyn RecordWriter>,
    ) -> Result<Self> {
        config.validate()?;

        log::info!(
            "Monitor session: conf>{:.2}, merge IoU>{:.2}, max_disappeared={}, max_distance={:.0}px, night {}h-{}h",
            config.confidence_threshold,
            config.merge_iou_threshold,
            config.tracking.max_disappeared,
            config.tracking.max_distance,
            config.night_start_hour,
            config.night_end_hour
        );

        Ok(Self {
            tracker: CentroidTracker::new((&config.tracking).into()),
            trajectories: TrajectoryStore::new(config.crossing_band_half_height),
            evaluator: AlertEvaluator::new(config.night_start_hour, config.night_end_hour),
            config,
            snapshots,
            records,
            frames_processed: 0,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn trajectories(&self) -> &TrajectoryStore {
        &self.trajectories
    }

    pub fn total_up(&self) -> u64 {
        self.trajectories.total_up()
    }

    pub fn total_down(&self) -> u64 {
        self.trajectories.total_down()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Run the detector, then process the frame.
    ///
    /// A failing detector leaves the frame with no detections, so tracked
    /// identities simply age.
    pub fn process_with_detector(
        &mut self,
        frame: &RgbImage,
        detector: &mut dyn Detector,
        classifier: &mut dyn AttributeClassifier,
        clock: &dyn Clock,
    ) -> AlertRecord {
        let detections = match detector.detect(frame) {
            Ok(detections) => detections,
            Err(e) => {
                let err = MonitorError::detection(format!("{}: {}", detector.name(), e));
                log::warn!("⚠️  {}", err);
                Vec::new()
            }
        };
        self.process_frame(frame, &detections, classifier, clock)
    }

    /// Process one frame's detections into an [`AlertRecord`]
    pub fn process_frame(
        &mut self,
        frame: &RgbImage,
        detections: &[Detection],
        classifier: &mut dyn AttributeClassifier,
        clock: &dyn Clock,
    ) -> AlertRecord {
        let at = clock.now();
        self.frames_processed += 1;

        let record = match self.run(frame, detections, classifier, at) {
            Ok(record) => record,
            Err(e) => {
                log::error!("Frame {} failed: {}", self.frames_processed, e);
                AlertRecord::failed(at, e)
            }
        };

        if let Err(e) = self.records.write(&record) {
            log::warn!("⚠️  Could not write record: {}", e);
        }
        record
    }

    fn run(
        &mut self,
        frame: &RgbImage,
        detections: &[Detection],
        classifier: &mut dyn AttributeClassifier,
        at: NaiveDateTime,
    ) -> Result<AlertRecord> {
        let boxes = self.person_boxes(detections)?;
        let merged = merge_boxes(&boxes, self.config.merge_iou_threshold);

        // tracking state commits before any classifier call
        let objects = self.tracker.update(&merged);
        for (id, crossing) in self.trajectories.count(&objects, frame.height()) {
            log::info!(
                "Identity {} crossed {:?} (up={}, down={})",
                id,
                crossing,
                self.trajectories.total_up(),
                self.trajectories.total_down()
            );
        }
        self.trajectories.prune(&objects);

        let counts = classify_regions(frame, &merged, classifier);
        let decision = self
            .evaluator
            .evaluate(objects.len(), counts.men, counts.women, at.hour());

        if decision.snapshot {
            log::info!("🚨 Lone woman detected at night ({})", format_timestamp(at));
            match self.snapshots.write(frame, at) {
                Ok(path) => log::info!("Snapshot saved to {}", path.display()),
                Err(e) => log::warn!("⚠️  Snapshot not saved: {}", e),
            }
        }

        log::debug!(
            "Frame {}: {} detections -> {} boxes -> {} tracked, men={}, women={}, unknown={}",
            self.frames_processed,
            detections.len(),
            merged.len(),
            objects.len(),
            counts.men,
            counts.women,
            counts.unknown
        );

        Ok(AlertRecord {
            people_count: objects.len() as u32,
            men: counts.men,
            women: counts.women,
            lone_women: decision.lone_women,
            timestamp: format_timestamp(at),
            error: None,
        })
    }

    /// Confident person detections as pixel boxes
    fn person_boxes(&self, detections: &[Detection]) -> Result<Vec<BoundingBox>> {
        let mut boxes = Vec::with_capacity(detections.len());

        for det in detections.iter().filter(|d| {
            d.class_id == self.config.person_class_id
                && d.confidence > self.config.confidence_threshold
        }) {
            let bbox = det.to_pixel_box().ok_or_else(|| {
                MonitorError::frame(format!(
                    "non-finite detection ({}, {}, {}, {})",
                    det.x1, det.y1, det.x2, det.y2
                ))
            })?;
            if !bbox.is_valid() {
                log::debug!("Skipping degenerate box {}", bbox);
                continue;
            }
            boxes.push(bbox);
        }

        Ok(boxes)
    }
}

/// Tally attribute labels over the cropped boxes. Empty crops are skipped and
/// classifier failures count as unknown.
fn classify_regions(
    frame: &RgbImage,
    boxes: &[BoundingBox],
    classifier: &mut dyn AttributeClassifier,
) -> AttributeCounts {
    let mut counts = AttributeCounts::default();

    for bbox in boxes {
        let Some(region) = crop_region(frame, bbox) else {
            log::debug!("Empty crop for {}", bbox);
            continue;
        };
        match classifier.classify(&region) {
            Ok(label) => counts.add(label),
            Err(e) => {
                log::warn!("⚠️  {}", MonitorError::classification(e));
                counts.add(AttributeLabel::Unknown);
            }
        }
    }

    counts
}
