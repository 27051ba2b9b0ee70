//! # Error Module
//!
//! User-friendly error types for the image scanner.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **User-friendly messages** - non-technical users should understand
//! - **Recovery hints** - suggest how to fix when possible

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ImageScanError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Errors that occur while discovering image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors while reading an image's embedded metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to open image file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read image file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A malformed GPS coordinate component
///
/// Recoverable: the extractor records it and keeps every other tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{component} has a zero denominator")]
    ZeroDenominator { component: &'static str },

    #[error("expected 3 rational components, found {found}")]
    MissingComponent { found: usize },

    #[error("{tag} has an unexpected value type")]
    UnexpectedValue { tag: &'static str },

    #[error("{tag} is empty")]
    EmptyReference { tag: &'static str },
}

/// Opaque failures from the text-recognition or captioning backends
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to launch {program}: {source}. Check that it is installed and on your PATH.")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} produced output that is not valid UTF-8")]
    InvalidOutput { program: String },
}

/// Errors loading or validating the scanner configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {reason}. Run `image-scan config` to see a valid example.")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid missing-tag threshold: {value} (must be at least 1)")]
    InvalidThreshold { value: usize },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ImageScanError>;
