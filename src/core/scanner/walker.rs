//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ImageDiscovery, ImageFile, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    fn image_file(&self, path: &Path) -> Result<ImageFile, ScanError> {
        let metadata = fs::metadata(path).map_err(|source| ScanError::ReadEntry {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(ImageFile {
            path: path.to_path_buf(),
            size: metadata.len(),
            format: self.filter.get_format(path),
        })
    }

    /// Walk a single directory
    fn scan_directory(&self, root: &Path, result: &mut ScanResult, events: &EventSender) {
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        // Hidden directories are pruned, not just skipped
        let entries = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.filter.is_excluded_hidden(e.path()));

        for entry_result in entries {
            let outcome = match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_dir() || !self.filter.should_include(entry.path()) {
                        continue;
                    }
                    self.image_file(entry.path())
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    Err(ScanError::ReadEntry {
                        path,
                        source: std::io::Error::other(e.to_string()),
                    })
                }
            };
            self.record(outcome, result, events);
        }
    }

    fn record(
        &self,
        outcome: Result<ImageFile, ScanError>,
        result: &mut ScanResult,
        events: &EventSender,
    ) {
        match outcome {
            Ok(image) => {
                events.send(Event::Scan(ScanEvent::ImageFound {
                    path: image.path.clone(),
                }));
                result.images.push(image);
            }
            Err(error) => {
                let path = match &error {
                    ScanError::PathNotFound { path } | ScanError::ReadEntry { path, .. } => {
                        path.clone()
                    }
                };
                events.send(Event::Scan(ScanEvent::Error {
                    path,
                    message: error.to_string(),
                }));
                result.errors.push(error);
            }
        }
    }
}

impl ImageDiscovery for WalkDirScanner {
    fn scan(&self, paths: &[PathBuf]) -> ScanResult {
        self.scan_with_events(paths, &crate::events::null_sender())
    }

    fn scan_with_events(&self, paths: &[PathBuf], events: &EventSender) -> ScanResult {
        events.send(Event::Scan(ScanEvent::Started {
            paths: paths.to_vec(),
        }));

        let mut result = ScanResult::default();

        for path in paths {
            if path.is_dir() {
                self.scan_directory(path, &mut result, events);
            } else if path.is_file() {
                // Explicitly named files are taken regardless of extension
                let outcome = self.image_file(path);
                self.record(outcome, &mut result, events);
            } else {
                let outcome = Err(ScanError::PathNotFound { path: path.clone() });
                self.record(outcome, &mut result, events);
            }
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_images: result.images.len(),
        }));

        result
    }
}
