//! # Core Module
//!
//! The GUI-agnostic image inspection engine.
//!
//! ## Modules
//! - `geo` - Converts sexagesimal GPS coordinates to decimal degrees
//! - `metadata` - Extracts EXIF tags and derives a location
//! - `authenticity` - Guesses camera-original vs synthetic from the tags
//! - `inference` - Seams for text recognition and captioning models
//! - `scanner` - Discovers image files
//! - `inspector` - Runs the whole inspection for one or many images

pub mod authenticity;
pub mod geo;
pub mod inference;
pub mod inspector;
pub mod metadata;
pub mod scanner;

// Re-export commonly used types
pub use authenticity::{is_likely_synthetic, Authenticity, AuthenticityAssessment};
pub use geo::{convert_to_decimal_degrees, GeoLocation, Rational, RationalTriple};
pub use inspector::{BatchReport, ImageReport, Inspector};
pub use metadata::{extract_metadata, ImageMetadata, LocationStatus, MetadataMap};
pub use scanner::ImageFile;
