//! mediastrip: an embeddable media gallery.
//!
//! A horizontal strip of thumbnails drives a viewing area showing one heavy
//! pane (image, video or document) at a time.
//!
//! - `models` - items, source nodes and the ordered item store
//! - `layout` - strip geometry, scroll planning and slide transitions
//! - `render` - renderer capability, per-kind players and the pane cache
//! - `carousel` - position and offset state of the strip
//! - `input` - raw input classification
//! - `gallery` - the facade tying the above together
//! - `scanner` - builds containers from media directories

pub mod carousel;
pub mod config;
pub mod error;
pub mod gallery;
pub mod input;
pub mod layout;
pub mod models;
pub mod render;
pub mod scanner;

pub use config::GalleryOptions;
pub use error::{ConfigError, ScanError};
pub use gallery::{DeletionNotice, Gallery, GalleryId, Outcome};
