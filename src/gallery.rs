//! The gallery: item store, render cache and carousel engine behind one owner.
//!
//! All mutation happens synchronously inside a single call; the only outward
//! signals are deletion notices and strip transitions, both over flume channels.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::{Receiver, Sender};
use tracing::{debug, info, trace};

use crate::carousel::CarouselEngine;
use crate::config::GalleryOptions;
use crate::error::ConfigError;
use crate::input::{Action, InputEvent, InteractionRouter};
use crate::layout::{StripMetrics, Transition};
use crate::models::{Container, GalleryItem, ItemId, ItemStore, MediaType, SourceNode};
use crate::render::{Activation, Lightbox, MountSpec, Player, RenderCache, Renderer};

static NEXT_GALLERY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a gallery instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GalleryId(pub u64);

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gallery-{}", self.0)
    }
}

/// Emitted when an item is deleted so external systems can drop their
/// references (an uploaded file, a form field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionNotice {
    pub resource_locator: String,
    pub field_name: Option<String>,
}

/// What handling an input event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Scrolled(f32),
    Selected(ItemId),
    Deleted(ItemId),
    LightboxOpened,
    Unchanged,
}

pub struct Gallery<R: Renderer> {
    id: GalleryId,
    options: GalleryOptions,
    container: Container,
    player: Player,
    items: ItemStore,
    cache: RenderCache,
    engine: CarouselEngine,
    router: InteractionRouter,
    renderer: R,
    lightbox: Option<Box<dyn Lightbox>>,
    deletion_subscribers: Vec<Sender<DeletionNotice>>,
}

impl<R: Renderer> fmt::Debug for Gallery<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("id", &self.id)
            .field("player", &self.player.kind())
            .field("items", &self.items.len())
            .field("position", &self.engine.position())
            .field("scroll", &self.engine.prev_scroll())
            .field("active", &self.cache.active())
            .field("lightbox", &self.lightbox.as_ref().map(|_| "<lightbox>"))
            .finish()
    }
}

impl<R: Renderer> Gallery<R> {
    /// Builds a gallery over `container` and adopts its thumbnails.
    pub fn new(
        container: Container,
        options: GalleryOptions,
        viewport_width: f32,
        mut renderer: R,
    ) -> Result<Self, ConfigError> {
        options.validate()?;

        let id = GalleryId(NEXT_GALLERY_ID.fetch_add(1, Ordering::Relaxed));
        let kind = options.resolve_player(&container.classes);
        let player = Player::new(kind, &options);
        renderer.mount(&MountSpec {
            gallery_id: id.0,
            player: kind,
            main_wrapper_class: options.main_wrapper_class.clone(),
            image_wrapper_class: options.image_wrapper_class.clone(),
        });

        let engine = CarouselEngine::new(
            StripMetrics::new(viewport_width, options.edge_zone_width()),
            options.transition_duration,
        );

        let mut gallery = Self {
            id,
            options,
            container,
            player,
            items: ItemStore::new(),
            cache: RenderCache::new(),
            engine,
            router: InteractionRouter::new(),
            renderer,
            lightbox: None,
            deletion_subscribers: Vec::new(),
        };
        gallery.rebuild();
        info!(gallery = %gallery.id, kind = %kind, items = gallery.items.len(), "Gallery ready");
        Ok(gallery)
    }

    /// Installs the host's lightbox capability.
    pub fn with_lightbox(mut self, lightbox: Box<dyn Lightbox>) -> Self {
        self.lightbox = Some(lightbox);
        self
    }

    /// Scrolls the strip so `index` is anchored. `None` when `index` is out of range.
    pub fn scroll_to(&mut self, index: usize) -> Option<f32> {
        self.engine.scroll_to(&self.items, index)
    }

    /// Appends a thumbnail node. Returns `None` when the node sits inside a
    /// clone region.
    pub fn add_item(
        &mut self,
        mut node: SourceNode,
        activate: bool,
        display_name: Option<&str>,
    ) -> Option<ItemId> {
        let was_empty = self.items.is_empty();
        let id = self
            .items
            .adopt(&node, self.player.kind(), display_name)?;

        if let Some(name) = display_name {
            node.alt = Some(name.to_string());
        }
        self.container.nodes.push(node);

        if let Some(item) = self.items.get(id) {
            self.renderer
                .add_thumbnail(id, &item.display_title(self.options.title_max_chars));
        }
        if was_empty {
            self.renderer.set_empty_placeholder(false);
        }
        self.engine.settle(&self.items);

        if activate {
            self.select(id);
        }
        Some(id)
    }

    /// Removes an item, its thumbnail, its source node and any pane rendered for
    /// its resource. Returns the notice sent to deletion subscribers.
    pub fn delete_item(&mut self, id: ItemId) -> Option<DeletionNotice> {
        let (index, item) = self.items.remove(id)?;
        let locator = item.resource_locator().to_string();
        let was_active = self.cache.release_active(id, &mut self.renderer);

        self.renderer.remove_thumbnail(id);
        self.remove_source_node(&item);
        let purged_visible = self
            .cache
            .purge(&locator, &mut self.renderer)
            .is_some_and(|(_, was_visible)| was_visible);
        self.engine.settle(&self.items);

        if self.items.is_empty() {
            self.renderer.set_empty_placeholder(true);
        } else if was_active {
            let successor = self
                .items
                .successor_index(index)
                .and_then(|i| self.items.get_index(i))
                .map(|next| next.id);
            if let Some(next) = successor {
                self.select(next);
            }
        } else if purged_visible {
            // The active item shared the deleted item's resource.
            if let Some(active) = self.cache.active() {
                self.select(active);
            }
        }

        let notice = DeletionNotice {
            resource_locator: locator,
            field_name: item.field_name,
        };
        info!(
            gallery = %self.id,
            id = %id,
            locator = %notice.resource_locator,
            remaining = self.items.len(),
            "Deleted gallery item"
        );
        self.deletion_subscribers
            .retain(|tx| tx.send(notice.clone()).is_ok());
        Some(notice)
    }

    /// Drops every item and pane and re-adopts the container's current nodes.
    pub fn update(&mut self) {
        self.rebuild();
        debug!(gallery = %self.id, items = self.items.len(), "Gallery rebuilt");
    }

    /// Makes `id` the active item.
    pub fn select(&mut self, id: ItemId) -> Option<Activation> {
        let item = self.items.get(id)?;
        self.cache
            .activate(&self.player, item, &mut self.renderer)
    }

    /// Routes a raw input event.
    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        let action = self
            .router
            .classify(event, &self.engine.metrics(), self.cache.active());

        let scrolled = |scroll: Option<f32>| scroll.map_or(Outcome::Unchanged, Outcome::Scrolled);
        match action {
            Action::Select(id) => match self.select(id) {
                Some(Activation::Created(_)) | Some(Activation::Reused(_)) => Outcome::Selected(id),
                Some(Activation::AlreadyActive(_)) | None => Outcome::Unchanged,
            },
            Action::PageBackward => scrolled(self.engine.page_backward(&self.items)),
            Action::PageForward => scrolled(self.engine.page_forward(&self.items)),
            Action::JumpStart => scrolled(self.engine.jump_start(&self.items)),
            Action::JumpEnd => scrolled(self.engine.jump_end(&self.items)),
            Action::Delete(id) => match self.delete_item(id) {
                Some(_) => Outcome::Deleted(id),
                None => Outcome::Unchanged,
            },
            Action::OpenLightbox => {
                if self.open_lightbox() {
                    Outcome::LightboxOpened
                } else {
                    Outcome::Unchanged
                }
            }
            Action::Ignore => Outcome::Unchanged,
        }
    }

    /// Hands the active image to the lightbox capability, when one is installed.
    pub fn open_lightbox(&mut self) -> bool {
        if self.player.kind() != MediaType::Image {
            return false;
        }
        let Some(item) = self.cache.active().and_then(|id| self.items.get(id)) else {
            return false;
        };
        let Some(lightbox) = self.lightbox.as_mut() else {
            trace!("No lightbox installed");
            return false;
        };
        lightbox.open(
            item.resource_locator(),
            &item.display_title(self.options.title_max_chars),
        );
        true
    }

    /// Applies a new strip width and re-settles the offset.
    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        self.engine.set_viewport_width(viewport_width);
        self.engine.settle(&self.items);
    }

    /// Records a re-measured thumbnail width and re-settles the offset.
    pub fn set_thumbnail_width(&mut self, id: ItemId, width: f32) -> bool {
        if !self.items.set_width(id, width) {
            return false;
        }
        self.engine.settle(&self.items);
        true
    }

    /// Receives a notice for every future deletion.
    pub fn subscribe_deletions(&mut self) -> Receiver<DeletionNotice> {
        let (tx, rx) = flume::unbounded();
        self.deletion_subscribers.push(tx);
        rx
    }

    /// Receives every future strip transition.
    pub fn subscribe_transitions(&mut self) -> Receiver<Transition> {
        self.engine.subscribe()
    }

    fn rebuild(&mut self) {
        for id in self.items.ids() {
            self.renderer.remove_thumbnail(id);
        }
        self.cache.clear(&mut self.renderer);

        let kind = self.player.kind();
        self.items
            .rebuild(self.container.adoptable(&self.options.image_stop_class), kind);
        for item in self.items.iter() {
            self.renderer
                .add_thumbnail(item.id, &item.display_title(self.options.title_max_chars));
        }
        self.engine.reset(&self.items);
        self.renderer.set_empty_placeholder(self.items.is_empty());

        if !self.options.inactive {
            if let Some(first) = self.items.get_index(0).map(|i| i.id) {
                self.select(first);
            }
        }
    }

    fn remove_source_node(&mut self, item: &GalleryItem) {
        let position = self.container.nodes.iter().position(|node| {
            node.src == item.thumbnail_locator
                && node.object_src == item.object_locator
                && node.name == item.field_name
        });
        if let Some(position) = position {
            self.container.nodes.remove(position);
        }
    }

    pub fn id(&self) -> GalleryId {
        self.id
    }

    pub fn player_kind(&self) -> MediaType {
        self.player.kind()
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn render_cache(&self) -> &RenderCache {
        &self.cache
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mutable access to the source container; call [`Gallery::update`] to
    /// re-adopt its nodes.
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Index of the anchored item, `None` when the gallery is empty.
    pub fn position(&self) -> Option<usize> {
        self.engine.position()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.engine.prev_scroll()
    }

    pub fn trailing_correction(&self) -> f32 {
        self.engine.trailing_correction()
    }

    pub fn active(&self) -> Option<ItemId> {
        self.cache.active()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.cache.active().and_then(|id| self.items.index_of(id))
    }
}
