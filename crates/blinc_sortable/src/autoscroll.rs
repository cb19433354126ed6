//! Edge auto-scrolling while a drag is held
//!
//! The host polls [`ScrollTracker::tick`] on a fixed interval for as long as
//! the drag lasts. Each tick nudges at most one scrollable ancestor of the
//! element under the pointer, by an amount proportional to the time elapsed
//! since the previous tick.

use std::time::{Duration, Instant};

use blinc_core::Point;

use crate::host::SortableHost;

/// How often the host should call [`ScrollTracker::tick`]
pub const POLL_INTERVAL: Duration = Duration::from_millis(15);

/// Distance from a viewport edge, in px, inside which scrolling kicks in
pub const EDGE_ZONE: f32 = 35.0;

/// Scroll speed in px per elapsed ms
pub const SCROLL_SPEED: f32 = 0.3;

/// Scroll poller owned by the active drag session
#[derive(Clone, Copy, Debug)]
pub struct ScrollTracker {
    last_tick: Instant,
}

impl ScrollTracker {
    pub fn start(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// Run one poll with the latest pointer position. Returns the container
    /// that was scrolled, if any.
    ///
    /// Scrollable ancestors are visited outermost first. The first one whose
    /// top or bottom edge zone holds the pointer, and whose offset stays
    /// within `0..=scroll_height - viewport_height` after the nudge, is
    /// scrolled; out-of-range candidates, and candidates the nudge would not
    /// move at all, are skipped.
    pub fn tick<H: SortableHost>(
        &mut self,
        host: &mut H,
        pointer: Point,
        now: Instant,
    ) -> Option<H::Element> {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        let delta = elapsed.as_secs_f32() * 1000.0 * SCROLL_SPEED;

        let under = host.element_from_point(pointer)?;
        let mut ancestors = host.scroll_parents(under);
        ancestors.reverse();

        for scroller in ancestors {
            let viewport = host.viewport_rect(scroller);
            let current = host.scroll_top(scroller);
            let y = pointer.y;

            let next = if viewport.top() < y && viewport.top() + EDGE_ZONE > y {
                current - delta
            } else if viewport.bottom() > y && viewport.bottom() - EDGE_ZONE < y {
                current + delta
            } else {
                continue;
            };

            if next == current {
                continue;
            }

            let max = host.scroll_height(scroller) - viewport.height();
            if (0.0..=max).contains(&next) {
                tracing::trace!(?scroller, from = current, to = next, "auto-scroll");
                host.set_scroll_top(scroller, next);
                return Some(scroller);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinc_core::Size;
    use blinc_layout::{Document, ElementId, LayoutStyle};

    /// A 200px-tall scroller at the top of the page holding 1000px of items
    fn scroller() -> (Document, ElementId) {
        let mut doc = Document::new(Size::new(800.0, 600.0)).unwrap();
        let scroller = doc
            .create(doc.root(), LayoutStyle::scroll_column(300.0, 200.0))
            .unwrap();
        for _ in 0..20 {
            doc.create(scroller, LayoutStyle::fixed_size(100.0, 50.0))
                .unwrap();
        }
        (doc, scroller)
    }

    #[test]
    fn test_bottom_edge_scrolls_down_by_elapsed_time() {
        let (mut doc, scroller) = scroller();
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);

        let now = start + Duration::from_millis(20);
        let scrolled = tracker.tick(&mut doc, Point::new(50.0, 190.0), now);

        assert_eq!(scrolled, Some(scroller));
        assert!((doc.scroll_top(scroller) - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_top_edge_never_scrolls_below_zero() {
        let (mut doc, scroller) = scroller();
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);

        for step in 1..=10 {
            let now = start + POLL_INTERVAL * step;
            assert_eq!(tracker.tick(&mut doc, Point::new(50.0, 5.0), now), None);
            assert_eq!(doc.scroll_top(scroller), 0.0);
        }
    }

    #[test]
    fn test_top_edge_scrolls_up_when_room() {
        let (mut doc, scroller) = scroller();
        doc.set_scroll_top(scroller, 100.0);
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);

        let now = start + Duration::from_millis(10);
        tracker.tick(&mut doc, Point::new(50.0, 10.0), now);

        assert!((doc.scroll_top(scroller) - 97.0).abs() < 1e-3);
    }

    #[test]
    fn test_bottom_bound_respected() {
        let (mut doc, scroller) = scroller();
        doc.set_scroll_top(scroller, 798.0);
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);

        let now = start + Duration::from_millis(15);
        let scrolled = tracker.tick(&mut doc, Point::new(50.0, 190.0), now);

        assert_eq!(scrolled, None);
        assert_eq!(doc.scroll_top(scroller), 798.0);
    }

    #[test]
    fn test_middle_of_viewport_does_nothing() {
        let (mut doc, scroller) = scroller();
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);

        let now = start + Duration::from_millis(15);
        let scrolled = tracker.tick(&mut doc, Point::new(50.0, 100.0), now);

        assert_eq!(scrolled, None);
        assert_eq!(doc.scroll_top(scroller), 0.0);
    }

    /// A 300px-tall scroller holding another 300px-tall scroller with 1000px
    /// of items, followed by 500px of filler
    fn nested_scrollers() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new(Size::new(800.0, 600.0)).unwrap();
        let outer = doc
            .create(doc.root(), LayoutStyle::scroll_column(400.0, 300.0))
            .unwrap();
        let inner = doc
            .create(outer, LayoutStyle::scroll_column(300.0, 300.0))
            .unwrap();
        for _ in 0..20 {
            doc.create(inner, LayoutStyle::fixed_size(100.0, 50.0))
                .unwrap();
        }
        doc.create(outer, LayoutStyle::fixed_size(100.0, 500.0)).unwrap();
        (doc, outer, inner)
    }

    #[test]
    fn test_outer_scroller_wins_when_both_qualify() {
        let (mut doc, outer, inner) = nested_scrollers();
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);
        let now = start + Duration::from_millis(15);
        let scrolled = tracker.tick(&mut doc, Point::new(50.0, 290.0), now);

        assert_eq!(scrolled, Some(outer));
        assert_eq!(doc.scroll_top(inner), 0.0);
    }

    #[test]
    fn test_tick_without_elapsed_time_scrolls_nothing() {
        let (mut doc, outer, inner) = nested_scrollers();
        doc.set_scroll_top(inner, 100.0);
        let start = Instant::now();
        let mut tracker = ScrollTracker::start(start);

        assert_eq!(tracker.tick(&mut doc, Point::new(50.0, 10.0), start), None);
        assert_eq!(doc.scroll_top(outer), 0.0);
        assert_eq!(doc.scroll_top(inner), 100.0);

        // The outer scroller cannot go up, so the walk reaches the inner one
        let now = start + Duration::from_millis(10);
        assert_eq!(tracker.tick(&mut doc, Point::new(50.0, 10.0), now), Some(inner));
        assert!((doc.scroll_top(inner) - 97.0).abs() < 1e-3);
    }
}
