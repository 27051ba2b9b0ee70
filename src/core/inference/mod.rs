//! # Inference Module
//!
//! Seams for the text-recognition and caption-generation models.
//!
//! The models themselves are external: any type implementing
//! [`TextRecognizer`] or [`Captioner`] can be plugged into the inspector.
//! [`CommandModel`] runs an external program (e.g. `tesseract`) and reads
//! its standard output.
//!
//! ## Example
//! ```rust,ignore
//! let ocr = CommandModel::new("tesseract", ["{path}", "stdout"]);
//! let text = ocr.recognize_text(Path::new("note.jpg"))?;
//! ```

use crate::error::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// Placeholder replaced by the image path in command arguments
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Recognizes text embedded in an image
pub trait TextRecognizer: Send + Sync {
    /// Return the recognized text, trimmed
    fn recognize_text(&self, path: &Path) -> Result<String, InferenceError>;
}

/// Generates a natural-language caption for an image
pub trait Captioner: Send + Sync {
    fn describe(&self, path: &Path) -> Result<String, InferenceError>;
}

/// A model backed by an external command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandModel {
    /// Program to run
    pub program: String,
    /// Arguments; `{path}` is replaced with the image path
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandModel {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments with the path substituted
    fn resolved_args(&self, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, &path))
            .collect()
    }

    /// Run once and return trimmed stdout; never retried
    pub fn run(&self, path: &Path) -> Result<String, InferenceError> {
        tracing::debug!(program = %self.program, path = %path.display(), "Running model command");

        let output = Command::new(&self.program)
            .args(self.resolved_args(path))
            .output()
            .map_err(|source| InferenceError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(InferenceError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| InferenceError::InvalidOutput {
            program: self.program.clone(),
        })?;

        Ok(stdout.trim().to_string())
    }
}

impl TextRecognizer for CommandModel {
    fn recognize_text(&self, path: &Path) -> Result<String, InferenceError> {
        self.run(path)
    }
}

impl Captioner for CommandModel {
    fn describe(&self, path: &Path) -> Result<String, InferenceError> {
        self.run(path)
    }
}
