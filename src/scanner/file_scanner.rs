//! Directory scanner that turns a media folder into a gallery container.
//!
//! This module provides the `FileScanner` struct which handles:
//! - Recursive directory scanning using walkdir
//! - Media type detection by file extension
//! - Thumbnail width measurement at a fixed thumbnail height
//! - Stop-class marking for files under a directory named like the stop class

use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::models::{Container, MediaType, SourceNode};
use crate::scanner::measure::thumbnail_width;

/// Configuration for the file scanner.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to scan directories recursively.
    pub recursive: bool,
    /// Maximum directory depth (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
    /// Media kind to collect; files of other kinds are skipped.
    pub kind: MediaType,
    /// Height every thumbnail is laid out at, in pixels.
    pub thumb_height: f32,
    /// Files under a directory with this name get the class too.
    pub stop_class: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: 0, // unlimited
            follow_symlinks: false,
            kind: MediaType::Image,
            thumb_height: 100.0,
            stop_class: "gallery-stop".to_string(),
        }
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub container: Container,
    /// Media files of the configured kind.
    pub total_files: usize,
    /// Media files of another kind.
    pub skipped: usize,
    /// Files marked with the stop class.
    pub stopped: usize,
    /// Entries that could not be read.
    pub error_count: usize,
}

/// Information about a discovered media file.
#[derive(Debug, Clone)]
struct DiscoveredEntry {
    path: PathBuf,
    relative: PathBuf,
    media_type: MediaType,
}

#[derive(Debug, Default)]
struct Discovery {
    entries: Vec<DiscoveredEntry>,
    error_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    config: ScanConfig,
}

impl FileScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans `dir` and builds a container with one node per media file of the
    /// configured kind, sorted by path.
    pub fn scan(&self, dir: &Path) -> Result<ScanResult, ScanError> {
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }
        info!("Starting scan of {:?}", dir);

        let discovery = Self::discover_files(dir, &self.config)?;
        let mut nodes = Vec::with_capacity(discovery.entries.len());
        let mut skipped = 0;
        let mut stopped = 0;

        for entry in discovery.entries {
            if entry.media_type != self.config.kind {
                trace!("Skipping {:?} ({} gallery)", entry.path, self.config.kind);
                skipped += 1;
                continue;
            }
            let node = self.build_node(&entry);
            if node.has_class(&self.config.stop_class) {
                stopped += 1;
            }
            nodes.push(node);
        }

        let result = ScanResult {
            total_files: nodes.len(),
            container: Container::new(nodes),
            skipped,
            stopped,
            error_count: discovery.error_count,
        };
        info!(
            "Scan complete: {} files, {} skipped, {} stopped, {} errors",
            result.total_files, result.skipped, result.stopped, result.error_count
        );
        Ok(result)
    }

    fn build_node(&self, entry: &DiscoveredEntry) -> SourceNode {
        let locator = entry.path.to_string_lossy().into_owned();
        let width = thumbnail_width(&entry.path, entry.media_type, self.config.thumb_height);
        let mut node = SourceNode::new(locator.clone(), width)
            .with_name(entry.relative.to_string_lossy().into_owned());

        if entry.media_type != MediaType::Image {
            node = node.with_object_src(locator);
        }

        let under_stop_dir = entry
            .relative
            .parent()
            .is_some_and(|parent| {
                parent
                    .components()
                    .any(|c| c.as_os_str() == self.config.stop_class.as_str())
            });
        if under_stop_dir {
            node = node.with_class(self.config.stop_class.clone());
        }
        node
    }

    /// Discovers all media files in a directory.
    fn discover_files(dir: &Path, config: &ScanConfig) -> Result<Discovery, ScanError> {
        let mut walker = WalkDir::new(dir).follow_links(config.follow_symlinks);

        if !config.recursive {
            walker = walker.max_depth(1);
        } else if config.max_depth > 0 {
            walker = walker.max_depth(config.max_depth);
        }

        let mut discovery = Discovery::default();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Walk {
                        path: dir.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Failed to read entry under {:?}: {}", dir, e);
                    discovery.error_count += 1;
                    continue;
                }
            };

            // Skip directories
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            let Some(media_type) = MediaType::from_extension(ext) else {
                continue; // Skip non-media files
            };

            let relative = path.strip_prefix(dir).unwrap_or(path).to_path_buf();
            discovery.entries.push(DiscoveredEntry {
                path: path.to_path_buf(),
                relative,
                media_type,
            });
        }

        // Sort by path for consistent ordering
        discovery.entries.sort_by(|a, b| a.path.cmp(&b.path));
        debug!("Discovered {} media files", discovery.entries.len());

        Ok(discovery)
    }
}
