//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while scanning and inspecting images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// File discovery events
    Scan(ScanEvent),
    /// Per-image inspection events
    Inspect(InspectEvent),
}

/// Events during file discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Discovery has started
    Started { paths: Vec<PathBuf> },
    /// An image file was found
    ImageFound { path: PathBuf },
    /// An error occurred but discovery continues
    Error { path: PathBuf, message: String },
    /// Discovery completed
    Completed { total_images: usize },
}

/// Events during inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InspectEvent {
    /// A batch of images is about to be inspected
    Started { total: usize },
    /// Work on one image has begun
    ImageStarted { path: PathBuf },
    /// One image moved to a new stage
    StageChanged { path: PathBuf, stage: InspectStage },
    /// One image was fully inspected
    ImageCompleted { path: PathBuf, likely_synthetic: bool },
    /// One image failed; the batch continues
    ImageFailed { path: PathBuf, message: String },
    /// The batch finished
    Completed { inspected: usize, failed: usize },
}

/// Stages of inspecting a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectStage {
    ReadingMetadata,
    RecognizingText,
    Captioning,
    AssessingAuthenticity,
}

impl std::fmt::Display for InspectStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectStage::ReadingMetadata => write!(f, "Reading metadata"),
            InspectStage::RecognizingText => write!(f, "Recognizing text"),
            InspectStage::Captioning => write!(f, "Generating caption"),
            InspectStage::AssessingAuthenticity => write!(f, "Assessing authenticity"),
        }
    }
}
