//! Directory ingestion for the command-line gallery.

pub mod file_scanner;
pub mod measure;

pub use file_scanner::{FileScanner, ScanConfig, ScanResult};
pub use measure::{read_dimensions, thumbnail_width};
