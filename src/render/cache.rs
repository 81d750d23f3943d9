//! Render cache for the heavy panes of a gallery.
//!
//! - One live pane per resource locator, created lazily on first activation
//! - Revisiting a locator toggles visibility instead of creating a new pane
//! - At most one pane is visible at a time
//!
//! Keys are xxhash of the locator so lookups never scan live panes.

use std::collections::HashMap;

use tracing::{debug, trace};
use xxhash_rust::xxh3::xxh3_64;

use crate::models::{GalleryItem, ItemId};
use crate::render::player::Player;
use crate::render::renderer::{PaneHandle, Renderer};

/// Cache key for a resource locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocatorKey(u64);

impl LocatorKey {
    pub fn new(locator: &str) -> Self {
        Self(xxh3_64(locator.as_bytes()))
    }
}

#[derive(Debug, Clone)]
struct CachedPane {
    handle: PaneHandle,
    locator: String,
    visible: bool,
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The item was already the visible one; nothing changed.
    AlreadyActive(PaneHandle),
    /// An existing pane for the locator was shown again.
    Reused(PaneHandle),
    /// A new pane was created.
    Created(PaneHandle),
}

impl Activation {
    pub fn handle(&self) -> PaneHandle {
        match self {
            Self::AlreadyActive(h) | Self::Reused(h) | Self::Created(h) => *h,
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderCache {
    panes: HashMap<LocatorKey, CachedPane>,
    visible: Option<LocatorKey>,
    active: Option<ItemId>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the pane for `item`, creating it on first use.
    ///
    /// Returns `None` when the player cannot render the item; in that case
    /// neither panes nor thumbnail markers are touched.
    pub fn activate<R: Renderer>(
        &mut self,
        player: &Player,
        item: &GalleryItem,
        renderer: &mut R,
    ) -> Option<Activation> {
        let Some(request) = player.pane_request(item) else {
            debug!(id = %item.id, kind = %player.kind(), "Item cannot be rendered");
            return None;
        };
        let key = LocatorKey::new(&request.locator);

        if self.active == Some(item.id) && self.visible == Some(key) {
            if let Some(pane) = self.panes.get(&key) {
                trace!(id = %item.id, "Item already active");
                return Some(Activation::AlreadyActive(pane.handle));
            }
        }

        // Exclusivity: hide every other visible pane, move the current marker.
        for (pane_key, pane) in self.panes.iter_mut() {
            if *pane_key != key && pane.visible {
                renderer.set_pane_visible(pane.handle, false);
                pane.visible = false;
            }
        }
        if let Some(previous) = self.active.take() {
            if previous != item.id {
                renderer.set_thumbnail_current(previous, false);
            }
        }
        renderer.set_thumbnail_current(item.id, true);
        self.active = Some(item.id);
        self.visible = Some(key);

        if let Some(pane) = self.panes.get_mut(&key) {
            if !pane.visible {
                renderer.set_pane_visible(pane.handle, true);
                pane.visible = true;
            }
            debug!(id = %item.id, locator = %pane.locator, "Reusing pane");
            return Some(Activation::Reused(pane.handle));
        }

        let handle = renderer.create_pane(&request.spec);
        debug!(id = %item.id, locator = %request.locator, ?handle, "Created pane");
        self.panes.insert(
            key,
            CachedPane {
                handle,
                locator: request.locator,
                visible: true,
            },
        );
        Some(Activation::Created(handle))
    }

    /// Removes the pane cached for `locator`, if any. Returns the handle and
    /// whether it was the visible pane.
    pub fn purge<R: Renderer>(&mut self, locator: &str, renderer: &mut R) -> Option<(PaneHandle, bool)> {
        let key = LocatorKey::new(locator);
        let pane = self.panes.remove(&key)?;
        renderer.remove_pane(pane.handle);
        let was_visible = self.visible == Some(key);
        if was_visible {
            self.visible = None;
        }
        debug!(locator, handle = ?pane.handle, was_visible, "Purged pane");
        Some((pane.handle, was_visible))
    }

    /// Forgets `item` as the active item and clears its thumbnail marker.
    pub fn release_active<R: Renderer>(&mut self, item: ItemId, renderer: &mut R) -> bool {
        if self.active != Some(item) {
            return false;
        }
        self.active = None;
        renderer.set_thumbnail_current(item, false);
        true
    }

    /// Removes every pane.
    pub fn clear<R: Renderer>(&mut self, renderer: &mut R) {
        for (_, pane) in self.panes.drain() {
            renderer.remove_pane(pane.handle);
        }
        self.visible = None;
        self.active = None;
    }

    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    /// Handle of the visible pane.
    pub fn visible_pane(&self) -> Option<PaneHandle> {
        self.visible
            .and_then(|key| self.panes.get(&key))
            .map(|pane| pane.handle)
    }

    pub fn visible_count(&self) -> usize {
        self.panes.values().filter(|p| p.visible).count()
    }

    pub fn contains(&self, locator: &str) -> bool {
        self.panes.contains_key(&LocatorKey::new(locator))
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }
}
