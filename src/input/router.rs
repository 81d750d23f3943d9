// Interaction routing for the gallery strip
// Translates raw input into carousel actions:
// - Thumbnail click: select the item
// - Delete glyph click: remove the item
// - Strip background click: page by edge zone (leading / trailing)
// - Wheel: up jumps to the start, down pages forward like a trailing click
// - Keys: Left/h, Right/l, Home, End, Delete

use tracing::trace;

use crate::layout::{StripMetrics, Zone};
use crate::models::ItemId;

/// Navigation keys the gallery reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Home,
    End,
    Delete,
}

impl NavKey {
    /// Maps a key name (`"Left"`, `"l"`, `"End"`, ...) to a navigation key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Left" | "h" => Some(Self::Left),
            "Right" | "l" => Some(Self::Right),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ThumbnailClick(ItemId),
    DeleteClick(ItemId),
    /// Click on the strip background, `offset` pixels from its leading edge.
    StripClick { offset: f32 },
    /// Wheel motion; negative `delta_y` is upward.
    Wheel { delta_y: f32 },
    Key(NavKey),
    /// Click on the visible pane.
    PaneClick,
}

/// What an input event asks the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(ItemId),
    PageBackward,
    PageForward,
    JumpStart,
    JumpEnd,
    Delete(ItemId),
    OpenLightbox,
    Ignore,
}

/// Stateless classifier from input events to actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionRouter;

impl InteractionRouter {
    pub fn new() -> Self {
        Self
    }

    /// Classifies `event` against the current strip geometry. `active` is the
    /// item the Delete key acts on.
    pub fn classify(
        &self,
        event: InputEvent,
        metrics: &StripMetrics,
        active: Option<ItemId>,
    ) -> Action {
        let action = match event {
            InputEvent::ThumbnailClick(id) => Action::Select(id),
            InputEvent::DeleteClick(id) => Action::Delete(id),
            InputEvent::StripClick { offset } => Self::classify_offset(offset, metrics),
            InputEvent::Wheel { delta_y } => {
                if !delta_y.is_finite() || delta_y == 0.0 {
                    Action::Ignore
                } else if delta_y < 0.0 {
                    Action::JumpStart
                } else {
                    // Same as a click at the far end of the strip.
                    Self::classify_offset(metrics.viewport_width, metrics)
                }
            }
            InputEvent::Key(key) => match key {
                NavKey::Left => Action::PageBackward,
                NavKey::Right => Action::PageForward,
                NavKey::Home => Action::JumpStart,
                NavKey::End => Action::JumpEnd,
                NavKey::Delete => active.map_or(Action::Ignore, Action::Delete),
            },
            InputEvent::PaneClick => Action::OpenLightbox,
        };
        trace!(?event, ?action, "Classified input");
        action
    }

    fn classify_offset(offset: f32, metrics: &StripMetrics) -> Action {
        if !offset.is_finite() {
            return Action::Ignore;
        }
        match metrics.zone(offset) {
            Zone::Leading => Action::PageBackward,
            Zone::Trailing => Action::PageForward,
            Zone::Middle => Action::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> StripMetrics {
        StripMetrics::new(500.0, 35.0)
    }

    #[test]
    fn test_strip_click_zones() {
        let router = InteractionRouter::new();
        let m = metrics();
        let click = |offset| router.classify(InputEvent::StripClick { offset }, &m, None);

        assert_eq!(click(0.0), Action::PageBackward);
        assert_eq!(click(35.0), Action::PageBackward);
        assert_eq!(click(250.0), Action::Ignore);
        assert_eq!(click(465.0), Action::PageForward);
        assert_eq!(click(f32::NAN), Action::Ignore);
    }

    #[test]
    fn test_wheel() {
        let router = InteractionRouter::new();
        let m = metrics();
        let wheel = |delta_y| router.classify(InputEvent::Wheel { delta_y }, &m, None);

        assert_eq!(wheel(-3.0), Action::JumpStart);
        assert_eq!(wheel(3.0), Action::PageForward);
        assert_eq!(wheel(0.0), Action::Ignore);
    }

    #[test]
    fn test_thumbnail_and_delete_clicks() {
        let router = InteractionRouter::new();
        let m = metrics();
        assert_eq!(
            router.classify(InputEvent::ThumbnailClick(ItemId(4)), &m, None),
            Action::Select(ItemId(4))
        );
        assert_eq!(
            router.classify(InputEvent::DeleteClick(ItemId(4)), &m, None),
            Action::Delete(ItemId(4))
        );
    }

    #[test]
    fn test_keys() {
        let router = InteractionRouter::new();
        let m = metrics();
        let key = |name: &str, active| {
            router.classify(InputEvent::Key(NavKey::from_name(name).unwrap()), &m, active)
        };

        assert_eq!(key("h", None), Action::PageBackward);
        assert_eq!(key("Right", None), Action::PageForward);
        assert_eq!(key("Home", None), Action::JumpStart);
        assert_eq!(key("End", None), Action::JumpEnd);
        assert_eq!(key("Delete", None), Action::Ignore);
        assert_eq!(key("Delete", Some(ItemId(2))), Action::Delete(ItemId(2)));
        assert_eq!(NavKey::from_name("x"), None);
    }
}
