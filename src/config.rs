//! Gallery options with documented defaults and environment overrides.

use std::time::Duration;

use tracing::debug;

use crate::error::ConfigError;
use crate::models::{MediaType, DEFAULT_TITLE_MAX_CHARS};

/// Default duration of the thumbnail strip slide.
pub const DEFAULT_TRANSITION_MS: u64 = 400;

/// Default external viewer used for non-PDF documents.
pub const DEFAULT_DOCUMENT_VIEWER: &str = "https://docs.google.com/viewer?embedded=true&url=";

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryOptions {
    /// Class of the outer gallery wrapper; player kind classes derive from it.
    pub main_wrapper_class: String,
    /// Class of the area holding the rendered panes.
    pub image_wrapper_class: String,
    /// Width of the paging buttons at each end of the strip, in pixels.
    pub scroll_buttons_width: f32,
    /// Padding between a paging button and the thumbnails, in pixels.
    pub scroll_buttons_padding: f32,
    /// Marker class excluded from ingestion.
    pub image_stop_class: String,
    pub transition_duration: Duration,
    /// When set, rebuilds do not auto-select the first item.
    pub inactive: bool,
    /// Explicit player kind; resolved from the container classes when unset.
    pub player: Option<MediaType>,
    /// Origin used to absolutize document paths for the external viewer.
    pub origin: String,
    pub document_viewer: String,
    pub title_max_chars: usize,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            main_wrapper_class: "gallery".to_string(),
            image_wrapper_class: "gallery-images".to_string(),
            scroll_buttons_width: 30.0,
            scroll_buttons_padding: 5.0,
            image_stop_class: "gallery-stop".to_string(),
            transition_duration: Duration::from_millis(DEFAULT_TRANSITION_MS),
            inactive: false,
            player: None,
            origin: "http://localhost".to_string(),
            document_viewer: DEFAULT_DOCUMENT_VIEWER.to_string(),
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }
}

impl GalleryOptions {
    /// Defaults with `MEDIASTRIP_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a key lookup. Unset keys keep their current value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MEDIASTRIP_SCROLL_BUTTONS_WIDTH") {
            self.scroll_buttons_width = parse_px("MEDIASTRIP_SCROLL_BUTTONS_WIDTH", &v)?;
        }
        if let Some(v) = lookup("MEDIASTRIP_SCROLL_BUTTONS_PADDING") {
            self.scroll_buttons_padding = parse_px("MEDIASTRIP_SCROLL_BUTTONS_PADDING", &v)?;
        }
        if let Some(v) = lookup("MEDIASTRIP_TRANSITION_MS") {
            let ms = v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MEDIASTRIP_TRANSITION_MS",
                    value: v.clone(),
                })?;
            self.transition_duration = Duration::from_millis(ms);
        }
        if let Some(v) = lookup("MEDIASTRIP_INACTIVE") {
            self.inactive = parse_flag("MEDIASTRIP_INACTIVE", &v)?;
        }
        if let Some(v) = lookup("MEDIASTRIP_ORIGIN") {
            self.origin = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("MEDIASTRIP_PLAYER") {
            self.player = Some(MediaType::parse(&v).ok_or(ConfigError::InvalidValue {
                key: "MEDIASTRIP_PLAYER",
                value: v.clone(),
            })?);
        }

        self.validate()?;
        debug!(?self, "Resolved gallery options");
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("scroll_buttons_width", self.scroll_buttons_width),
            ("scroll_buttons_padding", self.scroll_buttons_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWidth { key, value });
            }
        }
        if self.main_wrapper_class.trim().is_empty() {
            return Err(ConfigError::EmptyClass("main_wrapper_class"));
        }
        if self.image_wrapper_class.trim().is_empty() {
            return Err(ConfigError::EmptyClass("image_wrapper_class"));
        }
        if self.image_stop_class.trim().is_empty() {
            return Err(ConfigError::EmptyClass("image_stop_class"));
        }
        Ok(())
    }

    /// Width of the clickable paging zone at each end of the strip.
    pub fn edge_zone_width(&self) -> f32 {
        self.scroll_buttons_width + self.scroll_buttons_padding
    }

    /// Player kind for a container: explicit option, else a
    /// `{main_wrapper_class}-{kind}` class, else image.
    pub fn resolve_player(&self, container_classes: &[String]) -> MediaType {
        if let Some(kind) = self.player {
            return kind;
        }
        [MediaType::Video, MediaType::Book]
            .into_iter()
            .find(|kind| {
                let class = format!("{}-{}", self.main_wrapper_class, kind.class_suffix());
                container_classes.iter().any(|c| *c == class)
            })
            .unwrap_or(MediaType::Image)
    }
}

fn parse_px(key: &'static str, value: &str) -> Result<f32, ConfigError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number
        .trim()
        .parse::<f32>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
