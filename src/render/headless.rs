//! In-memory renderer.
//!
//! Records panes, thumbnails and the strip offset instead of drawing them. Clones
//! share state, so one handle can live inside a gallery while another is
//! inspected or driven by the animator thread.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::layout::transition::TransitionTarget;
use crate::models::ItemId;
use crate::render::renderer::{MountSpec, PaneHandle, PaneSpec, Renderer};

#[derive(Debug, Clone)]
struct PaneRecord {
    spec: PaneSpec,
    visible: bool,
}

#[derive(Debug, Clone)]
struct ThumbnailRecord {
    id: ItemId,
    title: String,
}

#[derive(Debug, Default)]
struct HeadlessState {
    mount: Option<MountSpec>,
    next_handle: u64,
    panes: BTreeMap<u64, PaneRecord>,
    thumbnails: Vec<ThumbnailRecord>,
    current: BTreeSet<ItemId>,
    placeholder_visible: bool,
    strip_offset: f32,
    ops: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount_spec(&self) -> Option<MountSpec> {
        self.state.lock().mount.clone()
    }

    pub fn pane_count(&self) -> usize {
        self.state.lock().panes.len()
    }

    pub fn pane_spec(&self, pane: PaneHandle) -> Option<PaneSpec> {
        self.state.lock().panes.get(&pane.0).map(|p| p.spec.clone())
    }

    /// Visible panes in creation order.
    pub fn visible_panes(&self) -> Vec<PaneHandle> {
        self.state
            .lock()
            .panes
            .iter()
            .filter(|(_, p)| p.visible)
            .map(|(h, _)| PaneHandle(*h))
            .collect()
    }

    /// Thumbnails in strip order.
    pub fn thumbnails(&self) -> Vec<ItemId> {
        self.state.lock().thumbnails.iter().map(|t| t.id).collect()
    }

    pub fn thumbnail_title(&self, item: ItemId) -> Option<String> {
        self.state
            .lock()
            .thumbnails
            .iter()
            .find(|t| t.id == item)
            .map(|t| t.title.clone())
    }

    /// Thumbnails carrying the current marker.
    pub fn current_thumbnails(&self) -> Vec<ItemId> {
        self.state.lock().current.iter().copied().collect()
    }

    pub fn placeholder_visible(&self) -> bool {
        self.state.lock().placeholder_visible
    }

    /// Horizontal translation currently applied to the thumbnails.
    pub fn strip_offset(&self) -> f32 {
        self.state.lock().strip_offset
    }

    /// Number of mutating calls received, for detecting no-ops.
    pub fn op_count(&self) -> usize {
        self.state.lock().ops
    }
}

impl Renderer for HeadlessRenderer {
    fn mount(&mut self, spec: &MountSpec) {
        let mut state = self.state.lock();
        state.ops += 1;
        state.mount = Some(spec.clone());
    }

    fn create_pane(&mut self, spec: &PaneSpec) -> PaneHandle {
        let mut state = self.state.lock();
        state.ops += 1;
        state.next_handle += 1;
        let handle = state.next_handle;
        state.panes.insert(
            handle,
            PaneRecord {
                spec: spec.clone(),
                visible: true,
            },
        );
        trace!(handle, src = spec.src(), "Headless pane created");
        PaneHandle(handle)
    }

    fn set_pane_visible(&mut self, pane: PaneHandle, visible: bool) {
        let mut state = self.state.lock();
        state.ops += 1;
        if let Some(record) = state.panes.get_mut(&pane.0) {
            record.visible = visible;
        }
    }

    fn remove_pane(&mut self, pane: PaneHandle) {
        let mut state = self.state.lock();
        state.ops += 1;
        state.panes.remove(&pane.0);
    }

    fn add_thumbnail(&mut self, item: ItemId, title: &str) {
        let mut state = self.state.lock();
        state.ops += 1;
        state.thumbnails.push(ThumbnailRecord {
            id: item,
            title: title.to_string(),
        });
    }

    fn remove_thumbnail(&mut self, item: ItemId) {
        let mut state = self.state.lock();
        state.ops += 1;
        state.thumbnails.retain(|t| t.id != item);
        state.current.remove(&item);
    }

    fn set_thumbnail_current(&mut self, item: ItemId, current: bool) {
        let mut state = self.state.lock();
        state.ops += 1;
        if current {
            state.current.insert(item);
        } else {
            state.current.remove(&item);
        }
    }

    fn set_empty_placeholder(&mut self, visible: bool) {
        let mut state = self.state.lock();
        state.ops += 1;
        state.placeholder_visible = visible;
    }
}

impl TransitionTarget for HeadlessRenderer {
    fn set_strip_offset(&self, offset: f32) {
        self.state.lock().strip_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let renderer = HeadlessRenderer::new();
        let mut inner = renderer.clone();
        let handle = inner.create_pane(&PaneSpec::Image { src: "/a.jpg".into() });
        inner.add_thumbnail(ItemId(1), "a");
        inner.set_thumbnail_current(ItemId(1), true);

        assert_eq!(renderer.pane_count(), 1);
        assert_eq!(renderer.visible_panes(), vec![handle]);
        assert_eq!(renderer.thumbnails(), vec![ItemId(1)]);
        assert_eq!(renderer.current_thumbnails(), vec![ItemId(1)]);

        inner.remove_thumbnail(ItemId(1));
        assert!(renderer.current_thumbnails().is_empty());
    }
}
