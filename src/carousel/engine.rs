//! Carousel positioning engine.
//!
//! Owns the strip position state (`position`, `prev_scroll`,
//! `trailing_correction`). Every change is committed synchronously and then
//! announced as a [`Transition`]; the engine never waits for the visual slide.
//! Offsets are always recomputed from item widths, never accumulated.

use std::time::Duration;

use flume::{Receiver, Sender};
use tracing::{debug, trace};

use crate::layout::{StripMetrics, Transition};
use crate::models::ItemStore;

#[derive(Debug)]
pub struct CarouselEngine {
    metrics: StripMetrics,
    position: Option<usize>,
    prev_scroll: f32,
    trailing_correction: f32,
    transition_duration: Duration,
    transitions: Option<Sender<Transition>>,
    generation: u64,
    last_transition: Option<Transition>,
}

impl CarouselEngine {
    pub fn new(metrics: StripMetrics, transition_duration: Duration) -> Self {
        Self {
            metrics,
            position: None,
            prev_scroll: 0.0,
            trailing_correction: 0.0,
            transition_duration,
            transitions: None,
            generation: 0,
            last_transition: None,
        }
    }

    /// Starts publishing transitions to a new receiver, replacing any earlier one.
    pub fn subscribe(&mut self) -> Receiver<Transition> {
        let (tx, rx) = flume::unbounded();
        self.transitions = Some(tx);
        rx
    }

    /// Scrolls so `index` is the anchored item. Returns the committed offset, or
    /// `None` (nothing changed) when `index` is out of range.
    pub fn scroll_to(&mut self, items: &ItemStore, index: usize) -> Option<f32> {
        if index >= items.len() {
            debug!(index, len = items.len(), "scroll_to out of range");
            return None;
        }

        let plan = self.metrics.plan(items, index, self.prev_scroll);
        let from = self.prev_scroll;
        self.position = Some(index);
        self.prev_scroll = plan.scroll;
        self.trailing_correction = plan.correction;
        debug!(
            index,
            scroll = plan.scroll,
            correction = plan.correction,
            "Carousel scrolled"
        );

        self.emit(from, plan.scroll);
        Some(plan.scroll)
    }

    /// Whether paging input should be honoured at all.
    pub fn can_page(&self, items: &ItemStore) -> bool {
        !items.is_empty() && self.metrics.is_scrollable(items.total_width())
    }

    /// Pages one item towards the start.
    ///
    /// If the step lands on the offset the strip already rests at (the previous
    /// position was a corrected tail), steps again until the offset changes or
    /// the first item is reached.
    pub fn page_backward(&mut self, items: &ItemStore) -> Option<f32> {
        if !self.can_page(items) {
            trace!("Paging disabled");
            return None;
        }

        let start = self.prev_scroll;
        let mut result = None;
        while let Some(position) = self.position.filter(|p| *p > 0) {
            result = self.scroll_to(items, position - 1);
            self.trailing_correction = 0.0;
            if result != Some(start) {
                break;
            }
            trace!(position = position - 1, "Backward page left offset unchanged, stepping again");
        }
        result
    }

    /// Pages one item towards the end, unless the strip already rests at the
    /// corrected tail.
    pub fn page_forward(&mut self, items: &ItemStore) -> Option<f32> {
        if !self.can_page(items) {
            trace!("Paging disabled");
            return None;
        }
        if self.trailing_correction != 0.0 {
            trace!(correction = self.trailing_correction, "Already resting at tail");
            return None;
        }
        let next = self.position.map_or(0, |p| p + 1);
        if next >= items.len() {
            return None;
        }
        self.scroll_to(items, next)
    }

    /// Scrolls back to the first item.
    pub fn jump_start(&mut self, items: &ItemStore) -> Option<f32> {
        if !self.can_page(items) || (self.position == Some(0) && self.prev_scroll == 0.0) {
            return None;
        }
        let scroll = self.scroll_to(items, 0);
        self.trailing_correction = 0.0;
        scroll
    }

    /// Scrolls to the corrected tail.
    pub fn jump_end(&mut self, items: &ItemStore) -> Option<f32> {
        if !self.can_page(items) {
            return None;
        }
        let last = items.len() - 1;
        if self.position == Some(last) {
            return None;
        }
        self.scroll_to(items, last)
    }

    /// Re-derives the offset for the current position after the items or the
    /// viewport changed.
    pub fn settle(&mut self, items: &ItemStore) {
        let from = self.prev_scroll;
        if items.is_empty() {
            self.position = None;
            self.prev_scroll = 0.0;
            self.trailing_correction = 0.0;
        } else if !self.metrics.is_scrollable(items.total_width()) {
            self.position = Some(0);
            self.prev_scroll = 0.0;
            self.trailing_correction = 0.0;
        } else {
            let position = self.position.unwrap_or(0).min(items.len() - 1);
            let plan = self.metrics.plan(items, position, 0.0);
            self.position = Some(position);
            self.prev_scroll = plan.scroll;
            self.trailing_correction = plan.correction;
        }

        debug!(
            position = ?self.position,
            scroll = self.prev_scroll,
            correction = self.trailing_correction,
            "Carousel settled"
        );
        if from != self.prev_scroll {
            self.emit(from, self.prev_scroll);
        }
    }

    /// Returns to the start after a rebuild.
    pub fn reset(&mut self, items: &ItemStore) {
        let from = self.prev_scroll;
        self.position = if items.is_empty() { None } else { Some(0) };
        self.prev_scroll = 0.0;
        self.trailing_correction = 0.0;
        if from != 0.0 {
            self.emit(from, 0.0);
        }
    }

    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        self.metrics = StripMetrics::new(viewport_width, self.metrics.edge_zone_width);
    }

    fn emit(&mut self, from: f32, to: f32) {
        self.generation += 1;
        let transition = Transition {
            from: -from,
            to: -to,
            duration: self.transition_duration,
            generation: self.generation,
        };
        self.last_transition = Some(transition);

        if let Some(tx) = &self.transitions {
            if tx.send(transition).is_err() {
                trace!("Transition receiver dropped");
                self.transitions = None;
            }
        }
    }

    pub fn metrics(&self) -> StripMetrics {
        self.metrics
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn prev_scroll(&self) -> f32 {
        self.prev_scroll
    }

    pub fn trailing_correction(&self) -> f32 {
        self.trailing_correction
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaType, SourceNode};

    fn store(widths: &[f32]) -> ItemStore {
        let mut store = ItemStore::new();
        for (i, w) in widths.iter().enumerate() {
            store.adopt(&SourceNode::new(format!("{}.jpg", i), *w), MediaType::Image, None);
        }
        store
    }

    fn engine(viewport: f32) -> CarouselEngine {
        CarouselEngine::new(StripMetrics::new(viewport, 35.0), Duration::from_millis(400))
    }

    fn ready(items: &ItemStore, viewport: f32) -> CarouselEngine {
        let mut engine = engine(viewport);
        engine.reset(items);
        engine
    }

    #[test]
    fn test_scroll_to_commits_position_and_offset() {
        let items = store(&[80.0, 120.0, 60.0, 200.0, 90.0]);
        let mut engine = ready(&items, 250.0);

        for index in [3usize, 1, 4, 0, 2, 2] {
            let scroll = engine.scroll_to(&items, index).unwrap();
            assert_eq!(engine.position(), Some(index));
            assert_eq!(engine.prev_scroll(), scroll);
        }
    }

    #[test]
    fn test_scroll_to_out_of_range_is_noop() {
        let items = store(&[100.0, 100.0]);
        let mut engine = ready(&items, 150.0);
        engine.scroll_to(&items, 1);
        let before = (engine.position(), engine.prev_scroll(), engine.trailing_correction());

        assert_eq!(engine.scroll_to(&items, 2), None);
        assert_eq!(
            (engine.position(), engine.prev_scroll(), engine.trailing_correction()),
            before
        );
        assert_eq!(engine.scroll_to(&store(&[]), 0), None);
    }

    #[test]
    fn test_tail_correction_aligns_last_item() {
        let items = store(&[100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);

        let scroll = engine.scroll_to(&items, 2).unwrap();
        assert_eq!(engine.trailing_correction(), 150.0);
        assert_eq!(scroll, items.width_before(2) - (250.0 - items.width_from(2)));
        assert_eq!(items.total_width() - scroll, 250.0);
    }

    #[test]
    fn test_transition_runs_from_previous_to_new_offset() {
        let items = store(&[100.0, 100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);
        let rx = engine.subscribe();

        engine.scroll_to(&items, 1);
        engine.scroll_to(&items, 2);

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!((first.from, first.to), (0.0, -100.0));
        assert_eq!((second.from, second.to), (-100.0, -150.0));
        assert!(second.generation > first.generation);
        assert_eq!(second.duration, Duration::from_millis(400));
        assert_eq!(engine.last_transition(), Some(second));
    }

    #[test]
    fn test_dropped_receiver_does_not_block_scrolling() {
        let items = store(&[100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 150.0);
        drop(engine.subscribe());
        assert!(engine.scroll_to(&items, 1).is_some());
        assert!(engine.scroll_to(&items, 2).is_some());
    }

    #[test]
    fn test_page_forward_stops_at_corrected_tail() {
        let items = store(&[100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);

        assert_eq!(engine.page_forward(&items), Some(50.0));
        assert_eq!(engine.position(), Some(1));
        assert_eq!(engine.trailing_correction(), 50.0);

        assert_eq!(engine.page_forward(&items), None);
        assert_eq!(engine.position(), Some(1));
    }

    #[test]
    fn test_page_backward_resets_correction() {
        let items = store(&[100.0, 100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);
        engine.page_forward(&items);
        engine.page_forward(&items);
        assert_eq!(engine.position(), Some(2));
        assert_eq!(engine.trailing_correction(), 50.0);

        assert_eq!(engine.page_backward(&items), Some(100.0));
        assert_eq!(engine.position(), Some(1));
        assert_eq!(engine.trailing_correction(), 0.0);
    }

    #[test]
    fn test_page_backward_steps_past_unchanged_offset() {
        let items = store(&[100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);
        engine.scroll_to(&items, 2);
        assert_eq!(engine.prev_scroll(), 50.0);

        // Index 1 rests at the same corrected offset, so the page continues to 0.
        assert_eq!(engine.page_backward(&items), Some(0.0));
        assert_eq!(engine.position(), Some(0));
        assert_eq!(engine.trailing_correction(), 0.0);
        assert_eq!(engine.page_backward(&items), None);
    }

    #[test]
    fn test_paging_disabled_when_everything_fits() {
        let items = store(&[100.0, 100.0]);
        let mut engine = ready(&items, 200.0);
        assert!(!engine.can_page(&items));
        assert_eq!(engine.page_forward(&items), None);
        assert_eq!(engine.page_backward(&items), None);
        assert_eq!(engine.jump_end(&items), None);
        assert_eq!(engine.position(), Some(0));
    }

    #[test]
    fn test_jumps() {
        let items = store(&[100.0, 100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);

        assert_eq!(engine.jump_start(&items), None);
        assert_eq!(engine.jump_end(&items), Some(150.0));
        assert_eq!(engine.position(), Some(3));
        assert_eq!(engine.jump_end(&items), None);
        assert_eq!(engine.jump_start(&items), Some(0.0));
        assert_eq!(engine.position(), Some(0));
        assert_eq!(engine.trailing_correction(), 0.0);
    }

    #[test]
    fn test_settle_after_removal_and_resize() {
        let mut items = store(&[100.0, 100.0, 100.0, 100.0]);
        let mut engine = ready(&items, 250.0);
        engine.scroll_to(&items, 3);

        let last = items.ids()[3];
        items.remove(last);
        engine.settle(&items);
        assert_eq!(engine.position(), Some(2));
        assert_eq!(engine.prev_scroll(), 50.0);
        assert_eq!(engine.trailing_correction(), 150.0);

        engine.set_viewport_width(400.0);
        engine.settle(&items);
        assert_eq!(engine.position(), Some(0));
        assert_eq!(engine.prev_scroll(), 0.0);

        items.clear();
        engine.settle(&items);
        assert_eq!(engine.position(), None);
    }
}
