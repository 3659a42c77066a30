//! Snapshot and latest-record writers
//!
//! Both are best-effort collaborators: the pipeline logs their failures and
//! carries on.

use crate::error::{MonitorError, Result};
use crate::types::AlertRecord;
use chrono::NaiveDateTime;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists the frame that raised an alert
pub trait SnapshotWriter: Send {
    /// Returns where the snapshot landed
    fn write(&mut self, frame: &RgbImage, at: NaiveDateTime) -> Result<PathBuf>;
}

/// Persists the latest per-frame record
pub trait RecordWriter: Send {
    fn write(&mut self, record: &AlertRecord) -> Result<()>;
}

/// `lone_woman_<YYYYMMDD_HHMMSS>.jpg`
pub fn snapshot_file_name(at: NaiveDateTime) -> String {
    format!("lone_woman_{}.jpg", at.format("%Y%m%d_%H%M%S"))
}

/// Saves JPEG snapshots into a directory
#[derive(Debug, Clone)]
pub struct JpegSnapshotWriter {
    dir: PathBuf,
}

impl JpegSnapshotWriter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl SnapshotWriter for JpegSnapshotWriter {
    fn write(&mut self, frame: &RgbImage, at: NaiveDateTime) -> Result<PathBuf> {
        let path = self.dir.join(snapshot_file_name(at));
        frame
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .map_err(|e| MonitorError::persistence(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// Overwrites a single pretty-printed JSON document
#[derive(Debug, Clone)]
pub struct JsonRecordWriter {
    path: PathBuf,
}

impl JsonRecordWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the last written record
    pub fn read(&self) -> Result<AlertRecord> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl RecordWriter for JsonRecordWriter {
    fn write(&mut self, record: &AlertRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)
            .map_err(|e| MonitorError::persistence(format!("{}: {}", self.path.display(), e)))
    }
}

/// Discards everything; for sessions that keep no files
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWriter;

impl SnapshotWriter for NullWriter {
    fn write(&mut self, _frame: &RgbImage, _at: NaiveDateTime) -> Result<PathBuf> {
        Ok(PathBuf::new())
    }
}

impl RecordWriter for NullWriter {
    fn write(&mut self, _record: &AlertRecord) -> Result<()> {
        Ok(())
    }
}
