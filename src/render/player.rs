//! Per-kind activation: turns a gallery item into the pane it should show.

use tracing::debug;

use crate::config::GalleryOptions;
use crate::models::{GalleryItem, MediaType};
use crate::render::document::{document_mode, document_subtype, viewer_url};
use crate::render::renderer::{DocumentMode, PaneSpec, Preload};

pub const VIDEO_FALLBACK_TEXT: &str = "Video unavailable";

/// A resolved pane: the locator it is cached under and how to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneRequest {
    pub locator: String,
    pub spec: PaneSpec,
}

#[derive(Debug, Clone, Default)]
pub struct ImagePlayer;

#[derive(Debug, Clone)]
pub struct VideoPlayer {
    pub fallback_text: String,
}

#[derive(Debug, Clone)]
pub struct BookPlayer {
    pub origin: String,
    pub viewer: String,
}

/// The player of a gallery, fixed when the gallery is built.
#[derive(Debug, Clone)]
pub enum Player {
    Image(ImagePlayer),
    Video(VideoPlayer),
    Book(BookPlayer),
}

impl Player {
    pub fn new(kind: MediaType, options: &GalleryOptions) -> Self {
        match kind {
            MediaType::Image => Self::Image(ImagePlayer),
            MediaType::Video => Self::Video(VideoPlayer {
                fallback_text: VIDEO_FALLBACK_TEXT.to_string(),
            }),
            MediaType::Book => Self::Book(BookPlayer {
                origin: options.origin.clone(),
                viewer: options.document_viewer.clone(),
            }),
        }
    }

    pub fn kind(&self) -> MediaType {
        match self {
            Self::Image(_) => MediaType::Image,
            Self::Video(_) => MediaType::Video,
            Self::Book(_) => MediaType::Book,
        }
    }

    /// Pane for `item`, or `None` when the item cannot be shown by this player.
    pub fn pane_request(&self, item: &GalleryItem) -> Option<PaneRequest> {
        match self {
            Self::Image(player) => Some(player.pane_request(item)),
            Self::Video(player) => player.pane_request(item),
            Self::Book(player) => player.pane_request(item),
        }
    }
}

impl ImagePlayer {
    fn pane_request(&self, item: &GalleryItem) -> PaneRequest {
        let locator = item.resource_locator().to_string();
        PaneRequest {
            spec: PaneSpec::Image {
                src: locator.clone(),
            },
            locator,
        }
    }
}

impl VideoPlayer {
    fn pane_request(&self, item: &GalleryItem) -> Option<PaneRequest> {
        let Some(locator) = item.object_locator() else {
            debug!(id = %item.id, "Video item has no object source");
            return None;
        };
        Some(PaneRequest {
            locator: locator.to_string(),
            spec: PaneSpec::Video {
                src: locator.to_string(),
                poster: item.thumbnail_locator.clone(),
                preload: Preload::Metadata,
                allow_download: false,
                fallback_text: self.fallback_text.clone(),
            },
        })
    }
}

impl BookPlayer {
    fn pane_request(&self, item: &GalleryItem) -> Option<PaneRequest> {
        let Some(locator) = item.object_locator() else {
            debug!(id = %item.id, "Book item has no object source");
            return None;
        };
        let Some(subtype) = document_subtype(item.subtype.as_deref(), locator) else {
            debug!(id = %item.id, locator, "Unable to determine document subtype");
            return None;
        };

        let mode = document_mode(&subtype);
        let src = match mode {
            DocumentMode::Embed => locator.to_string(),
            DocumentMode::Viewer => viewer_url(&self.viewer, &self.origin, locator),
        };
        Some(PaneRequest {
            locator: locator.to_string(),
            spec: PaneSpec::Document { src, subtype, mode },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn make_item(src: &str, object_src: Option<&str>, subtype: Option<&str>) -> GalleryItem {
        GalleryItem {
            id: ItemId(7),
            thumbnail_width: 100.0,
            thumbnail_locator: src.to_string(),
            object_locator: object_src.map(String::from),
            subtype: subtype.map(String::from),
            field_name: None,
            media_type: MediaType::Image,
            display_name: String::new(),
            title: String::new(),
        }
    }

    fn player(kind: MediaType) -> Player {
        let options = GalleryOptions {
            origin: "https://example.org".to_string(),
            document_viewer: "https://viewer.test/?url=".to_string(),
            ..Default::default()
        };
        Player::new(kind, &options)
    }

    #[test]
    fn test_image_always_renders() {
        let req = player(MediaType::Image)
            .pane_request(&make_item("/t/a.jpg", None, None))
            .unwrap();
        assert_eq!(req.locator, "/t/a.jpg");
        assert_eq!(req.spec, PaneSpec::Image { src: "/t/a.jpg".into() });
    }

    #[test]
    fn test_video_requires_object_source() {
        let video = player(MediaType::Video);
        assert!(video
            .pane_request(&make_item("/t/a.jpg", None, None))
            .is_none());
        assert!(video
            .pane_request(&make_item("/t/a.jpg", Some(""), None))
            .is_none());

        let req = video
            .pane_request(&make_item("/t/a.jpg", Some("/v/a.mp4"), None))
            .unwrap();
        match req.spec {
            PaneSpec::Video {
                src,
                poster,
                preload,
                allow_download,
                fallback_text,
            } => {
                assert_eq!(src, "/v/a.mp4");
                assert_eq!(poster, "/t/a.jpg");
                assert_eq!(preload, Preload::Metadata);
                assert!(!allow_download);
                assert_eq!(fallback_text, VIDEO_FALLBACK_TEXT);
            }
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn test_book_embeds_pdf_and_redirects_others() {
        let book = player(MediaType::Book);

        let pdf = book
            .pane_request(&make_item("/t/a.jpg", Some("/d/a.pdf"), None))
            .unwrap();
        assert_eq!(
            pdf.spec,
            PaneSpec::Document {
                src: "/d/a.pdf".into(),
                subtype: "pdf".into(),
                mode: DocumentMode::Embed,
            }
        );

        let doc = book
            .pane_request(&make_item("/t/b.jpg", Some("/d/b"), Some("docx")))
            .unwrap();
        assert_eq!(doc.locator, "/d/b");
        match doc.spec {
            PaneSpec::Document { src, mode, .. } => {
                assert_eq!(mode, DocumentMode::Viewer);
                assert!(src.starts_with("https://viewer.test/?url=https%3A%2F%2Fexample.org"));
            }
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn test_book_without_subtype_fails() {
        let book = player(MediaType::Book);
        assert!(book
            .pane_request(&make_item("/t/a.jpg", Some("/d/readme"), None))
            .is_none());
        assert!(book
            .pane_request(&make_item("/t/a.jpg", None, Some("pdf")))
            .is_none());
    }
}
