/// Injected model interfaces
///
/// The pipeline never runs a model itself. Person detection and attribute
/// classification are supplied by the caller through these traits so any
/// backend (or a deterministic stand-in) can be plugged in.
use crate::types::{AttributeLabel, Detection};
use image::RgbImage;
use std::collections::VecDeque;

/// Common interface for object detectors
pub trait Detector: Send {
    /// Detect objects in a single frame
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, String>;

    /// Get the detector name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Labels one cropped person
pub trait AttributeClassifier {
    fn classify(&mut self, region: &RgbImage) -> Result<AttributeLabel, String>;
}

impl<F> AttributeClassifier for F
where
    F: FnMut(&RgbImage) -> Result<AttributeLabel, String>,
{
    fn classify(&mut self, region: &RgbImage) -> Result<AttributeLabel, String> {
        self(region)
    }
}

/// Classifier that labels every crop the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub AttributeLabel);

impl AttributeClassifier for FixedClassifier {
    fn classify(&mut self, _region: &RgbImage) -> Result<AttributeLabel, String> {
        Ok(self.0)
    }
}

/// Detector that plays back pre-recorded per-frame results
#[derive(Debug, Default)]
pub struct ReplayDetector {
    frames: VecDeque<Result<Vec<Detection>, String>>,
}

impl ReplayDetector {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<Detection>, String>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Detector for ReplayDetector {
    /// Once the recording runs out every frame is empty
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>, String> {
        self.frames.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_classifier() {
        let mut calls = 0;
        let mut classifier = |region: &RgbImage| {
            calls += 1;
            if region.width() > 10 {
                Ok(AttributeLabel::Woman)
            } else {
                Err("too small".to_string())
            }
        };

        assert_eq!(
            classifier.classify(&RgbImage::new(20, 20)),
            Ok(AttributeLabel::Woman)
        );
        assert!(classifier.classify(&RgbImage::new(5, 5)).is_err());
        drop(classifier);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_replay_detector() {
        let frame = RgbImage::new(4, 4);
        let mut detector = ReplayDetector::new(vec![
            Ok(vec![Detection::person(0.0, 0.0, 2.0, 2.0, 0.9)]),
            Err("camera glitch".to_string()),
        ]);

        assert_eq!(detector.detect(&frame).unwrap().len(), 1);
        assert!(detector.detect(&frame).is_err());
        assert_eq!(detector.remaining(), 0);
        assert!(detector.detect(&frame).unwrap().is_empty());
    }
}
