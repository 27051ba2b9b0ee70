//! # Inspector Module
//!
//! Runs the full inspection of an image: metadata, location, authenticity
//! verdict and, when backends are configured, text recognition and
//! captioning.
//!
//! ## Failure Policy
//! - An unreadable file or a failed model call aborts that image
//! - GPS problems never abort; they surface in the report's location status
//! - Batches keep going past failed images and report them separately
//!
//! ## Example
//! ```rust,ignore
//! let inspector = Inspector::builder()
//!     .text_recognizer(Box::new(CommandModel::new("tesseract", ["{path}", "stdout"])))
//!     .build();
//!
//! let report = inspector.inspect(Path::new("photo.jpg"))?;
//! println!("{}", report.authenticity.verdict);
//! ```

use crate::config::ScannerConfig;
use crate::core::authenticity::{AuthenticityAssessment, AuthenticityHeuristic, HeuristicConfig};
use crate::core::inference::{Captioner, TextRecognizer};
use crate::core::metadata::{self, ImageMetadata};
use crate::error::Result;
use crate::events::{null_sender, Event, EventSender, InspectEvent, InspectStage};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything learned about one image
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    pub path: PathBuf,
    pub inspected_at: DateTime<Utc>,
    /// Recognized text; `None` when no recognizer is configured
    pub text: Option<String>,
    /// Generated caption; `None` when no captioner is configured
    pub description: Option<String>,
    pub metadata: ImageMetadata,
    pub authenticity: AuthenticityAssessment,
}

impl ImageReport {
    pub fn is_likely_synthetic(&self) -> bool {
        self.authenticity.verdict.is_synthetic()
    }
}

/// An image the batch could not inspect
#[derive(Debug, Clone, Serialize)]
pub struct InspectFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Results of inspecting several images, in input order
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub reports: Vec<ImageReport>,
    pub failures: Vec<InspectFailure>,
}

/// Orchestrates the per-image inspection
pub struct Inspector {
    heuristic: AuthenticityHeuristic,
    text_recognizer: Option<Box<dyn TextRecognizer>>,
    captioner: Option<Box<dyn Captioner>>,
}

impl Inspector {
    pub fn builder() -> InspectorBuilder {
        InspectorBuilder::default()
    }

    /// Build from a loaded configuration
    pub fn from_config(config: &ScannerConfig) -> Self {
        let mut builder = Self::builder().heuristic(config.heuristic.clone());
        if let Some(ref model) = config.text_recognition {
            builder = builder.text_recognizer(Box::new(model.clone()));
        }
        if let Some(ref model) = config.captioning {
            builder = builder.captioner(Box::new(model.clone()));
        }
        builder.build()
    }

    pub fn inspect(&self, path: &Path) -> Result<ImageReport> {
        self.inspect_with_events(path, &null_sender())
    }

    pub fn inspect_with_events(&self, path: &Path, events: &EventSender) -> Result<ImageReport> {
        events.send(Event::Inspect(InspectEvent::ImageStarted {
            path: path.to_path_buf(),
        }));

        events.stage(path, InspectStage::ReadingMetadata);
        let metadata = metadata::extract_metadata(path)?;

        let text = match self.text_recognizer {
            Some(ref recognizer) => {
                events.stage(path, InspectStage::RecognizingText);
                Some(recognizer.recognize_text(path)?)
            }
            None => None,
        };

        let description = match self.captioner {
            Some(ref captioner) => {
                events.stage(path, InspectStage::Captioning);
                Some(captioner.describe(path)?)
            }
            None => None,
        };

        events.stage(path, InspectStage::AssessingAuthenticity);
        let authenticity = self.heuristic.assess(&metadata.tags);

        tracing::info!(
            path = %path.display(),
            tags = metadata.tags.len(),
            verdict = %authenticity.verdict,
            "Inspected image"
        );

        events.send(Event::Inspect(InspectEvent::ImageCompleted {
            path: path.to_path_buf(),
            likely_synthetic: authenticity.verdict.is_synthetic(),
        }));

        Ok(ImageReport {
            path: path.to_path_buf(),
            inspected_at: Utc::now(),
            text,
            description,
            metadata,
            authenticity,
        })
    }

    pub fn inspect_all(&self, paths: &[PathBuf]) -> BatchReport {
        self.inspect_all_with_events(paths, &null_sender())
    }

    /// Inspect images in parallel; each image is independent
    pub fn inspect_all_with_events(&self, paths: &[PathBuf], events: &EventSender) -> BatchReport {
        events.send(Event::Inspect(InspectEvent::Started { total: paths.len() }));

        let outcomes: Vec<_> = paths
            .par_iter()
            .map(|path| (path, self.inspect_with_events(path, events)))
            .collect();

        let mut batch = BatchReport::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(report) => batch.reports.push(report),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Inspection failed");
                    events.send(Event::Inspect(InspectEvent::ImageFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    }));
                    batch.failures.push(InspectFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        events.send(Event::Inspect(InspectEvent::Completed {
            inspected: batch.reports.len(),
            failed: batch.failures.len(),
        }));

        batch
    }
}

/// Builder for [`Inspector`]
#[derive(Default)]
pub struct InspectorBuilder {
    heuristic: HeuristicConfig,
    text_recognizer: Option<Box<dyn TextRecognizer>>,
    captioner: Option<Box<dyn Captioner>>,
}

impl InspectorBuilder {
    pub fn heuristic(mut self, config: HeuristicConfig) -> Self {
        self.heuristic = config;
        self
    }

    pub fn text_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.text_recognizer = Some(recognizer);
        self
    }

    pub fn captioner(mut self, captioner: Box<dyn Captioner>) -> Self {
        self.captioner = Some(captioner);
        self
    }

    pub fn build(self) -> Inspector {
        Inspector {
            heuristic: AuthenticityHeuristic::new(self.heuristic),
            text_recognizer: self.text_recognizer,
            captioner: self.captioner,
        }
    }
}
