use crate::models::ItemStore;

/// Result of computing the strip offset for a target index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    /// Offset to translate the thumbnails by (left-anchored, corrected).
    pub scroll: f32,
    /// Amount the offset was shortened so the last thumbnail ends at the
    /// viewport's trailing edge. Zero unless paging forward into the tail.
    pub correction: f32,
}

/// Which part of the strip a background click landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Leading,
    Trailing,
    Middle,
}

/// Geometry of the visible thumbnail strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    /// Width of the visible strip in pixels.
    pub viewport_width: f32,
    /// Width of the clickable paging zone at each end.
    pub edge_zone_width: f32,
}

impl StripMetrics {
    pub fn new(viewport_width: f32, edge_zone_width: f32) -> Self {
        Self {
            viewport_width: viewport_width.max(0.0),
            edge_zone_width: edge_zone_width.max(0.0),
        }
    }

    /// Classifies a click `offset` measured from the strip's leading edge.
    pub fn zone(&self, offset: f32) -> Zone {
        if offset <= self.edge_zone_width {
            Zone::Leading
        } else if offset >= self.viewport_width - self.edge_zone_width {
            Zone::Trailing
        } else {
            Zone::Middle
        }
    }

    /// Whether the thumbnails overflow the viewport at all.
    pub fn is_scrollable(&self, total_width: f32) -> bool {
        total_width > self.viewport_width
    }

    /// Offset for showing `index` at the leading edge, given the committed
    /// offset `prev_scroll`.
    ///
    /// Paging forward into a tail that fits inside the viewport pulls the offset
    /// back so the last thumbnail ends exactly at the trailing edge. Paging
    /// backward never corrects.
    pub fn plan(&self, items: &ItemStore, index: usize, prev_scroll: f32) -> ScrollPlan {
        let raw = items.width_before(index);
        if raw <= prev_scroll {
            return ScrollPlan {
                scroll: raw,
                correction: 0.0,
            };
        }

        let view_width = items.width_from(index);
        let correction = if view_width <= self.viewport_width {
            self.viewport_width - view_width
        } else {
            0.0
        };
        ScrollPlan {
            scroll: raw - correction,
            correction,
        }
    }
}
