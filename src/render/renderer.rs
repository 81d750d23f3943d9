use crate::models::{ItemId, MediaType};

/// Opaque handle to a pane created by a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preload {
    None,
    Metadata,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    /// The resource is embedded directly.
    Embed,
    /// The resource is shown through an external viewer frame.
    Viewer,
}

/// Everything a renderer needs to build a pane.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneSpec {
    Image {
        src: String,
    },
    Video {
        src: String,
        poster: String,
        preload: Preload,
        allow_download: bool,
        fallback_text: String,
    },
    Document {
        src: String,
        subtype: String,
        mode: DocumentMode,
    },
}

impl PaneSpec {
    pub fn src(&self) -> &str {
        match self {
            Self::Image { src } | Self::Video { src, .. } | Self::Document { src, .. } => src,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            Self::Image { .. } => MediaType::Image,
            Self::Video { .. } => MediaType::Video,
            Self::Document { .. } => MediaType::Book,
        }
    }
}

/// Class names and player kind handed to the renderer when a gallery mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct MountSpec {
    pub gallery_id: u64,
    pub player: MediaType,
    pub main_wrapper_class: String,
    pub image_wrapper_class: String,
}

/// The visual substrate the gallery drives.
///
/// Implementations own the concrete nodes; the gallery only ever refers to them
/// through item ids and pane handles. Strip offsets are not part of this trait:
/// they travel as transitions (see [`crate::layout::transition`]).
pub trait Renderer {
    fn mount(&mut self, spec: &MountSpec);

    /// Creates a visible pane in the viewing area.
    fn create_pane(&mut self, spec: &PaneSpec) -> PaneHandle;
    fn set_pane_visible(&mut self, pane: PaneHandle, visible: bool);
    fn remove_pane(&mut self, pane: PaneHandle);

    /// Adds a thumbnail at the end of the strip.
    fn add_thumbnail(&mut self, item: ItemId, title: &str);
    fn remove_thumbnail(&mut self, item: ItemId);
    fn set_thumbnail_current(&mut self, item: ItemId, current: bool);

    fn set_empty_placeholder(&mut self, visible: bool);
}

/// Optional lightbox capability offered by the host page.
pub trait Lightbox {
    fn open(&mut self, src: &str, title: &str);
}
