/// A candidate thumbnail node found inside a gallery container.
///
/// Mirrors the ingestion contract of the page markup: class list, the `data-*`
/// attributes the gallery reads, and the measured width of the rendered thumbnail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceNode {
    pub classes: Vec<String>,
    /// `data-src`: thumbnail locator.
    pub src: String,
    /// `data-object-src`: full resource locator.
    pub object_src: Option<String>,
    /// `data-type`: explicit media subtype.
    pub media_subtype: Option<String>,
    /// `data-name`: field identifier used for external correlation.
    pub name: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
    /// Set when the node lives inside a clone region (drag ghosts, lightbox copies).
    pub in_clone: bool,
    /// Measured thumbnail width in pixels.
    pub width: f32,
}

impl SourceNode {
    pub fn new(src: impl Into<String>, width: f32) -> Self {
        Self {
            src: src.into(),
            width,
            ..Default::default()
        }
    }

    pub fn with_object_src(mut self, object_src: impl Into<String>) -> Self {
        self.object_src = Some(object_src.into());
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.media_subtype = Some(subtype.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn in_clone(mut self) -> Self {
        self.in_clone = true;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether ingestion should adopt this node.
    pub fn is_adoptable(&self, stop_class: &str) -> bool {
        !self.in_clone && !self.has_class(stop_class)
    }
}

/// The gallery container: its own classes plus the thumbnail nodes it holds, in
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub classes: Vec<String>,
    pub nodes: Vec<SourceNode>,
}

impl Container {
    pub fn new(nodes: Vec<SourceNode>) -> Self {
        Self {
            classes: Vec::new(),
            nodes,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Nodes ingestion adopts, in document order.
    pub fn adoptable<'a>(&'a self, stop_class: &'a str) -> impl Iterator<Item = &'a SourceNode> {
        self.nodes.iter().filter(move |n| n.is_adoptable(stop_class))
    }
}
