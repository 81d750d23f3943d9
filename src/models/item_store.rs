//! Ordered collection of gallery items.
//!
//! The store owns item identity and width bookkeeping:
//! - insertion order is visual left-to-right order
//! - the total thumbnail width is kept incrementally on add/remove/resize
//!   and recomputed from scratch on rebuild
//! - prefix sums used for paging are always recomputed from the item widths

use tracing::{debug, trace};

use crate::models::gallery_item::locator_file_name;
use crate::models::{GalleryItem, ItemId, MediaType, SourceNode};

#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<GalleryItem>,
    total_width: f32,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an item from a source node and appends it.
    ///
    /// Returns `None` without touching the store when the node sits inside a
    /// clone region.
    pub fn adopt(
        &mut self,
        node: &SourceNode,
        media_type: MediaType,
        display_name_override: Option<&str>,
    ) -> Option<ItemId> {
        if node.in_clone {
            trace!(src = %node.src, "Skipping node inside clone region");
            return None;
        }

        let id = ItemId(self.next_id);
        self.next_id += 1;

        let display_name = display_name_override
            .map(str::to_string)
            .or_else(|| node.alt.clone().filter(|a| !a.is_empty()))
            .unwrap_or_else(|| {
                let locator = node
                    .object_src
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(&node.src);
                locator_file_name(locator).to_string()
            });
        let title = node
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| display_name.clone());

        let item = GalleryItem {
            id,
            thumbnail_width: sanitize_width(node.width),
            thumbnail_locator: node.src.clone(),
            object_locator: node.object_src.clone(),
            subtype: node.media_subtype.clone(),
            field_name: node.name.clone(),
            media_type,
            display_name,
            title,
        };

        self.push(item);
        Some(id)
    }

    /// Appends an already-built item and adds its width to the running total.
    pub fn push(&mut self, item: GalleryItem) {
        self.total_width += item.thumbnail_width;
        debug!(
            id = %item.id,
            width = item.thumbnail_width,
            total_width = self.total_width,
            "Added gallery item"
        );
        self.items.push(item);
    }

    /// Removes an item by identity, returning the index it occupied.
    pub fn remove(&mut self, id: ItemId) -> Option<(usize, GalleryItem)> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        self.total_width = (self.total_width - item.thumbnail_width).max(0.0);
        if self.items.is_empty() {
            self.total_width = 0.0;
        }
        debug!(
            id = %item.id,
            index,
            remaining = self.items.len(),
            "Removed gallery item"
        );
        Some((index, item))
    }

    /// Replaces every item with items adopted from `nodes`.
    pub fn rebuild<'a, I>(&mut self, nodes: I, media_type: MediaType) -> Vec<ItemId>
    where
        I: IntoIterator<Item = &'a SourceNode>,
    {
        self.items.clear();
        let ids: Vec<ItemId> = nodes
            .into_iter()
            .filter_map(|node| self.adopt(node, media_type, None))
            .collect();
        self.recompute_total();
        ids
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total_width = 0.0;
    }

    /// Updates a measured thumbnail width. Returns false for unknown items.
    pub fn set_width(&mut self, id: ItemId, width: f32) -> bool {
        let width = sanitize_width(width);
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        self.total_width += width - item.thumbnail_width;
        item.thumbnail_width = width;
        true
    }

    fn recompute_total(&mut self) {
        self.total_width = self.items.iter().map(|i| i.thumbnail_width).sum();
    }

    /// Sum of the widths of all items strictly before `index`.
    pub fn width_before(&self, index: usize) -> f32 {
        let end = index.min(self.items.len());
        self.items[..end].iter().map(|i| i.thumbnail_width).sum()
    }

    /// Sum of the widths of the item at `index` and everything after it.
    pub fn width_from(&self, index: usize) -> f32 {
        let start = index.min(self.items.len());
        self.items[start..].iter().map(|i| i.thumbnail_width).sum()
    }

    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    /// Index that inherits the selection after removing the item at `removed`:
    /// the item now at the same index, else the new last item.
    pub fn successor_index(&self, removed: usize) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(removed.min(self.items.len() - 1))
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&GalleryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_widths(widths: &[f32]) -> (ItemStore, Vec<ItemId>) {
        let mut store = ItemStore::new();
        let ids = widths
            .iter()
            .enumerate()
            .filter_map(|(i, w)| {
                store.adopt(
                    &SourceNode::new(format!("/img/{}.jpg", i), *w),
                    MediaType::Image,
                    None,
                )
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn test_adopt_appends_in_order() {
        let (store, ids) = store_with_widths(&[100.0, 120.0, 80.0]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.ids(), ids);
        assert!((store.total_width() - 300.0).abs() < 0.01);
        assert_eq!(store.get_index(1).map(|i| i.display_name.as_str()), Some("1.jpg"));
    }

    #[test]
    fn test_adopt_skips_clone() {
        let mut store = ItemStore::new();
        let id = store.adopt(
            &SourceNode::new("a.jpg", 100.0).in_clone(),
            MediaType::Image,
            None,
        );
        assert!(id.is_none());
        assert!(store.is_empty());
        assert_eq!(store.total_width(), 0.0);
    }

    #[test]
    fn test_display_name_override_and_title_fallback() {
        let mut store = ItemStore::new();
        let node = SourceNode::new("/thumbs/x.jpg", 90.0).with_alt("Alt text");
        let a = store.adopt(&node, MediaType::Image, None).unwrap();
        let b = store
            .adopt(&node, MediaType::Image, Some("upload.png"))
            .unwrap();

        assert_eq!(store.get(a).unwrap().display_name, "Alt text");
        assert_eq!(store.get(a).unwrap().title, "Alt text");
        assert_eq!(store.get(b).unwrap().display_name, "upload.png");
    }

    #[test]
    fn test_prefix_sums() {
        let (store, _) = store_with_widths(&[100.0, 50.0, 25.0]);
        assert_eq!(store.width_before(0), 0.0);
        assert_eq!(store.width_before(2), 150.0);
        assert_eq!(store.width_from(1), 75.0);
        assert_eq!(store.width_from(3), 0.0);
        assert_eq!(store.width_before(10), 175.0);
    }

    #[test]
    fn test_remove_updates_total_and_ids() {
        let (mut store, ids) = store_with_widths(&[100.0, 50.0, 25.0]);
        let (index, item) = store.remove(ids[1]).unwrap();
        assert_eq!(index, 1);
        assert_eq!(item.id, ids[1]);
        assert!((store.total_width() - 125.0).abs() < 0.01);
        assert!(store.remove(ids[1]).is_none());
    }

    #[test]
    fn test_successor_index() {
        let (mut store, ids) = store_with_widths(&[10.0, 10.0, 10.0]);
        store.remove(ids[0]);
        assert_eq!(store.successor_index(0), Some(0));
        store.remove(ids[2]);
        assert_eq!(store.successor_index(1), Some(0));
        store.remove(ids[1]);
        assert_eq!(store.successor_index(0), None);
    }

    #[test]
    fn test_set_width_adjusts_total() {
        let (mut store, ids) = store_with_widths(&[100.0, 100.0]);
        assert!(store.set_width(ids[0], 40.0));
        assert!((store.total_width() - 140.0).abs() < 0.01);
        assert!(!store.set_width(ItemId(999), 10.0));
    }

    #[test]
    fn test_rebuild_recomputes_with_fresh_ids() {
        let (mut store, old_ids) = store_with_widths(&[100.0, 100.0]);
        let nodes = vec![
            SourceNode::new("x.jpg", 30.0),
            SourceNode::new("y.jpg", 40.0).in_clone(),
            SourceNode::new("z.jpg", 50.0),
        ];
        let ids = store.rebuild(nodes.iter(), MediaType::Image);
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| !old_ids.contains(id)));
        assert!((store.total_width() - 80.0).abs() < 0.01);
    }
}
