//! Type definitions shared by the frame pipeline

use centroidtrack::BoundingBox;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// COCO class id the detector uses for people
pub const PERSON_CLASS_ID: u32 = 0;

/// Raw detector output in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// Detection confidence score (0-1)
    pub confidence: f32,
    pub class_id: u32,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32, class_id: u32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class_id,
        }
    }

    /// Person detection shorthand
    pub fn person(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Self {
        Self::new(x1, y1, x2, y2, confidence, PERSON_CLASS_ID)
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Truncate to an integer pixel box. `None` for non-finite coordinates.
    pub fn to_pixel_box(&self) -> Option<BoundingBox> {
        if !self.is_finite() {
            return None;
        }
        Some(BoundingBox::new(
            self.x1 as i32,
            self.y1 as i32,
            self.x2 as i32,
            self.y2 as i32,
        ))
    }
}

/// Attribute predicted for a cropped person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeLabel {
    Man,
    Woman,
    Unknown,
}

impl AttributeLabel {
    /// Parse a classifier label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Man" | "man" | "Male" | "male" => Self::Man,
            "Woman" | "woman" | "Female" | "female" => Self::Woman,
            _ => Self::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Man => "Man",
            Self::Woman => "Woman",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AttributeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-frame tally of classified people
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeCounts {
    pub men: u32,
    pub women: u32,
    pub unknown: u32,
}

impl AttributeCounts {
    pub fn add(&mut self, label: AttributeLabel) {
        match label {
            AttributeLabel::Man => self.men += 1,
            AttributeLabel::Woman => self.women += 1,
            AttributeLabel::Unknown => self.unknown += 1,
        }
    }
}

/// Output of one frame, also the document the record writer persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub people_count: u32,
    pub men: u32,
    pub women: u32,
    /// 1 when a single woman is alone at night, else 0
    pub lone_women: u8,
    /// Local ISO-8601 time the frame was processed
    pub timestamp: String,
    pub error: Option<String>,
}

impl AlertRecord {
    /// Zeroed record stamped with `at`
    pub fn empty(at: NaiveDateTime) -> Self {
        Self {
            people_count: 0,
            men: 0,
            women: 0,
            lone_women: 0,
            timestamp: format_timestamp(at),
            error: None,
        }
    }

    /// Zeroed record carrying a frame failure
    pub fn failed(at: NaiveDateTime, error: impl fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(at)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// `YYYY-MM-DDTHH:MM:SS.ffffff`
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(12, 5, 7, 250)
            .unwrap()
    }

    #[test]
    fn test_detection_to_pixel_box_truncates() {
        let det = Detection::person(10.9, 20.2, 50.7, 90.99, 0.9);
        assert_eq!(det.to_pixel_box(), Some(BoundingBox::new(10, 20, 50, 90)));
        assert!(Detection::person(f32::NAN, 0.0, 1.0, 1.0, 0.9)
            .to_pixel_box()
            .is_none());
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(AttributeLabel::from_label("Man"), AttributeLabel::Man);
        assert_eq!(AttributeLabel::from_label("Woman"), AttributeLabel::Woman);
        assert_eq!(AttributeLabel::from_label("child"), AttributeLabel::Unknown);
    }

    #[test]
    fn test_attribute_counts() {
        let mut counts = AttributeCounts::default();
        for label in [AttributeLabel::Woman, AttributeLabel::Man, AttributeLabel::Unknown] {
            counts.add(label);
        }
        counts.add(AttributeLabel::Woman);
        assert_eq!(
            counts,
            AttributeCounts {
                men: 1,
                women: 2,
                unknown: 1
            }
        );
    }

    #[test]
    fn test_record_json_shape() {
        let record = AlertRecord {
            people_count: 1,
            women: 1,
            lone_women: 1,
            ..AlertRecord::empty(noon())
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["people_count"], 1);
        assert_eq!(value["lone_women"], 1);
        assert_eq!(value["timestamp"], "2024-03-09T12:05:07.000250");
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_failed_record_is_zeroed() {
        let record = AlertRecord::failed(noon(), "boom");
        assert_eq!(record.people_count, 0);
        assert_eq!(record.error.as_deref(), Some("boom"));
        assert!(record.is_error());
    }
}
