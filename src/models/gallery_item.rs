use std::fmt;

/// Default number of characters kept by [`GalleryItem::display_title`].
pub const DEFAULT_TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Video,
    Book,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tiff" | "tif" => Some(Self::Image),
            "webm" | "mp4" | "mkv" | "avi" | "mov" | "ogv" => Some(Self::Video),
            "pdf" | "doc" | "docx" | "odt" | "rtf" | "ppt" | "pptx" | "xls" | "xlsx" => {
                Some(Self::Book)
            }
            _ => None,
        }
    }

    /// Suffix appended to the main wrapper class to mark a player of this kind.
    pub fn class_suffix(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Book => "book",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" | "img" => Some(Self::Image),
            "video" => Some(Self::Video),
            "book" | "document" | "doc" => Some(Self::Book),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_suffix())
    }
}

/// Identity of a gallery item, stable for the item's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub id: ItemId,
    /// Measured width of the thumbnail in pixels.
    pub thumbnail_width: f32,
    /// Thumbnail source (`data-src`).
    pub thumbnail_locator: String,
    /// Full resource source (`data-object-src`), required by video and book players.
    pub object_locator: Option<String>,
    /// Explicit document subtype (`data-type`).
    pub subtype: Option<String>,
    /// Field identifier reported with deletion notices (`data-name`).
    pub field_name: Option<String>,
    pub media_type: MediaType,
    pub display_name: String,
    pub title: String,
}

impl GalleryItem {
    /// Locator of the full-resolution resource backing this item.
    ///
    /// Falls back to the thumbnail source when no object source is set, which is
    /// how image galleries show the thumbnail image at full size.
    pub fn resource_locator(&self) -> &str {
        self.object_locator()
            .unwrap_or(self.thumbnail_locator.as_str())
    }

    /// Object source, if present and non-empty.
    pub fn object_locator(&self) -> Option<&str> {
        self.object_locator
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Title cut to `max_chars` characters for display.
    pub fn display_title(&self, max_chars: usize) -> String {
        truncate_chars(&self.title, max_chars)
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Last path segment of a locator, without query string or fragment.
pub(crate) fn locator_file_name(locator: &str) -> &str {
    let end = locator.find(['?', '#']).unwrap_or(locator.len());
    let path = locator[..end].trim_end_matches('/');
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(src: &str, object_src: Option<&str>) -> GalleryItem {
        GalleryItem {
            id: ItemId(1),
            thumbnail_width: 100.0,
            thumbnail_locator: src.to_string(),
            object_locator: object_src.map(String::from),
            subtype: None,
            field_name: None,
            media_type: MediaType::Image,
            display_name: String::new(),
            title: String::new(),
        }
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(MediaType::from_extension("JPG"), Some(MediaType::Image));
        assert_eq!(MediaType::from_extension("webm"), Some(MediaType::Video));
        assert_eq!(MediaType::from_extension("pdf"), Some(MediaType::Book));
        assert_eq!(MediaType::from_extension("txt"), None);
    }

    #[test]
    fn test_resource_locator_prefers_object_source() {
        let item = make_item("/thumbs/a.jpg", Some("/media/a.mp4"));
        assert_eq!(item.resource_locator(), "/media/a.mp4");

        let blank = make_item("/thumbs/a.jpg", Some("   "));
        assert_eq!(blank.resource_locator(), "/thumbs/a.jpg");
        assert_eq!(blank.object_locator(), None);
    }

    #[test]
    fn test_display_title_truncates_by_chars() {
        let mut item = make_item("/a.jpg", None);
        item.title = "é".repeat(60);
        let shown = item.display_title(DEFAULT_TITLE_MAX_CHARS);
        assert_eq!(shown.chars().count(), 50);

        item.title = "short".to_string();
        assert_eq!(item.display_title(DEFAULT_TITLE_MAX_CHARS), "short");
    }

    #[test]
    fn test_locator_file_name() {
        assert_eq!(locator_file_name("/media/docs/report.pdf?v=2"), "report.pdf");
        assert_eq!(locator_file_name("photo.png"), "photo.png");
        assert_eq!(locator_file_name("https://host/a/b/#frag"), "b");
    }
}
