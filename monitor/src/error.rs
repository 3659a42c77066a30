//! Error types for the safety monitor

use thiserror::Error;

/// Result type alias for the monitor library
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Errors that can occur while processing frames
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Detection unavailable: {0}")]
    DetectionUnavailable(String),

    #[error("Attribute classification failed: {0}")]
    AttributeClassificationFailed(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Frame processing failed: {0}")]
    FrameProcessingFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MonitorError {
    pub fn detection<S: Into<String>>(msg: S) -> Self {
        Self::DetectionUnavailable(msg.into())
    }

    pub fn classification<S: Into<String>>(msg: S) -> Self {
        Self::AttributeClassificationFailed(msg.into())
    }

    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Self::PersistenceFailed(msg.into())
    }

    pub fn frame<S: Into<String>>(msg: S) -> Self {
        Self::FrameProcessingFailed(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }
}
