//! Document subtype detection and viewer redirects for book players.

use tracing::trace;
use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::render::renderer::DocumentMode;

/// Subtype of a document: explicit metadata wins, else the locator's trailing
/// extension. Returns `None` when neither yields a subtype.
pub fn document_subtype(explicit: Option<&str>, locator: &str) -> Option<String> {
    if let Some(subtype) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return Some(subtype.trim_start_matches('.').to_ascii_lowercase());
    }

    let end = locator.find(['?', '#']).unwrap_or(locator.len());
    let path = &locator[..end];
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        trace!(locator, "No document extension");
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// How a document of `subtype` is shown.
pub fn document_mode(subtype: &str) -> DocumentMode {
    if subtype.eq_ignore_ascii_case("pdf") {
        DocumentMode::Embed
    } else {
        DocumentMode::Viewer
    }
}

/// Absolute url of a resource: itself when it carries a scheme, else resolved
/// against `origin`.
pub fn absolute_url(origin: &str, locator: &str) -> String {
    if let Ok(url) = Url::parse(locator) {
        return url.to_string();
    }
    match Url::parse(origin).and_then(|base| base.join(locator)) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            locator.trim_start_matches('/')
        ),
    }
}

/// External viewer address for a document that cannot be embedded.
pub fn viewer_url(viewer: &str, origin: &str, locator: &str) -> String {
    let target = absolute_url(origin, locator);
    let encoded: String = byte_serialize(target.as_bytes()).collect();
    format!("{}{}", viewer, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_prefers_explicit() {
        assert_eq!(
            document_subtype(Some("DOCX"), "/files/a.pdf").as_deref(),
            Some("docx")
        );
        assert_eq!(
            document_subtype(Some("  "), "/files/a.pdf").as_deref(),
            Some("pdf")
        );
    }

    #[test]
    fn test_subtype_from_extension() {
        assert_eq!(
            document_subtype(None, "/files/report.final.ODT?dl=1").as_deref(),
            Some("odt")
        );
        assert_eq!(document_subtype(None, "/files/README"), None);
        assert_eq!(document_subtype(None, "/files/.hidden"), None);
        assert_eq!(document_subtype(None, "/files.d/readme"), None);
    }

    #[test]
    fn test_document_mode() {
        assert_eq!(document_mode("pdf"), DocumentMode::Embed);
        assert_eq!(document_mode("PDF"), DocumentMode::Embed);
        assert_eq!(document_mode("docx"), DocumentMode::Viewer);
    }

    #[test]
    fn test_viewer_url_uses_origin_for_paths() {
        let url = viewer_url(
            "https://viewer.test/?url=",
            "https://example.org",
            "/files/a b.docx",
        );
        assert_eq!(
            url,
            "https://viewer.test/?url=https%3A%2F%2Fexample.org%2Ffiles%2Fa%2520b.docx"
        );
    }

    #[test]
    fn test_absolute_url_keeps_absolute_locators() {
        assert_eq!(
            absolute_url("https://example.org", "https://cdn.test/x.doc"),
            "https://cdn.test/x.doc"
        );
        assert_eq!(
            absolute_url("not an origin", "/x.doc"),
            "not an origin/x.doc"
        );
    }
}
