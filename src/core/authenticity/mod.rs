//! # Authenticity Module
//!
//! Rule-based guess at whether an image came from a physical camera or was
//! synthetically generated, judged purely from its metadata tags.
//!
//! ## Rules
//! 1. No tags at all means likely synthetic
//! 2. Otherwise count missing camera-provenance tags (make, model, capture
//!    time, focal length, ISO)
//! 3. Missing at least the threshold (default 3) means likely synthetic

use crate::core::metadata::MetadataMap;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags whose presence suggests a physical capture device.
///
/// `EXIF PhotographicSensitivity` is the ISO speed tag (0x8827).
pub const PROVENANCE_TAGS: &[&str] = &[
    "Image Make",
    "Image Model",
    "EXIF DateTimeOriginal",
    "EXIF FocalLength",
    "EXIF PhotographicSensitivity",
];

/// How many provenance tags must be missing for a synthetic verdict
pub const MISSING_TAG_THRESHOLD: usize = 3;

/// Tunable parameters for the heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Tag keys that indicate camera provenance
    pub provenance_tags: Vec<String>,
    /// Missing-tag count at which the verdict flips to synthetic
    pub missing_threshold: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            provenance_tags: PROVENANCE_TAGS.iter().map(|t| t.to_string()).collect(),
            missing_threshold: MISSING_TAG_THRESHOLD,
        }
    }
}

impl HeuristicConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.missing_threshold == 0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.missing_threshold,
            });
        }
        Ok(())
    }
}

/// The heuristic's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authenticity {
    LikelySynthetic,
    LikelyCameraOriginal,
}

impl Authenticity {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Authenticity::LikelySynthetic)
    }
}

impl fmt::Display for Authenticity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticity::LikelySynthetic => write!(f, "Likely AI-generated"),
            Authenticity::LikelyCameraOriginal => write!(f, "Likely Real Photo"),
        }
    }
}

/// Verdict plus the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticityAssessment {
    pub verdict: Authenticity,
    /// Provenance tags absent from the metadata
    pub missing_tags: Vec<String>,
    /// Human-readable explanation
    pub reason: String,
}

/// The provenance-tag heuristic
#[derive(Debug, Clone, Default)]
pub struct AuthenticityHeuristic {
    config: HeuristicConfig,
}

impl AuthenticityHeuristic {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Decide and explain
    pub fn assess(&self, metadata: &MetadataMap) -> AuthenticityAssessment {
        if metadata.is_empty() {
            return AuthenticityAssessment {
                verdict: Authenticity::LikelySynthetic,
                missing_tags: self.config.provenance_tags.clone(),
                reason: "Image has no embedded metadata".to_string(),
            };
        }

        let missing_tags: Vec<String> = self
            .config
            .provenance_tags
            .iter()
            .filter(|tag| !metadata.contains_key(tag))
            .cloned()
            .collect();

        let verdict = if missing_tags.len() >= self.config.missing_threshold {
            Authenticity::LikelySynthetic
        } else {
            Authenticity::LikelyCameraOriginal
        };

        let reason = format!(
            "{} of {} camera tags missing (threshold {})",
            missing_tags.len(),
            self.config.provenance_tags.len(),
            self.config.missing_threshold
        );

        AuthenticityAssessment {
            verdict,
            missing_tags,
            reason,
        }
    }

    pub fn is_likely_synthetic(&self, metadata: &MetadataMap) -> bool {
        self.assess(metadata).verdict.is_synthetic()
    }
}

/// Apply the default heuristic
pub fn is_likely_synthetic(metadata: &MetadataMap) -> bool {
    AuthenticityHeuristic::default().is_likely_synthetic(metadata)
}
