//! Pane rendering for the active gallery item.
//!
//! - `Renderer` - the visual substrate the gallery drives
//! - `Player` - per-kind activation (image, video, book)
//! - `RenderCache` - one reusable pane per resource locator
//! - `HeadlessRenderer` - in-memory renderer for tests and the CLI

pub mod cache;
pub mod document;
pub mod headless;
pub mod player;
pub mod renderer;

pub use cache::{Activation, LocatorKey, RenderCache};
pub use headless::HeadlessRenderer;
pub use player::{PaneRequest, Player};
pub use renderer::{DocumentMode, Lightbox, MountSpec, PaneHandle, PaneSpec, Preload, Renderer};
