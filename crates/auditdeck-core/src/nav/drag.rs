//! Classifies a pointer drag as a section-navigation swipe.
//!
//! Mirrors the wheel remapping: a vertical drag drives horizontal section
//! navigation, so dragging upward (natural-scroll "forward") advances to
//! the next section and dragging downward goes back. Horizontal or tiny
//! drags emit nothing.

use crate::config::NavConfig;

use super::intent::NavIntent;

/// Tracks one pointer drag from press to release
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    start: Option<(f64, f64)>,
    dead_zone: f64,
    min_swipe: f64,
}

impl DragTracker {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            start: None,
            dead_zone: config.drag_dead_zone,
            min_swipe: config.drag_min_swipe,
        }
    }

    /// Record the press position that anchors the gesture
    pub fn on_start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Feed a move event; returns true when the motion is predominantly
    /// vertical beyond the dead zone and native scrolling must be
    /// suppressed (the deck must not rubber-band vertically).
    pub fn on_move(&self, x: f64, y: f64) -> bool {
        let Some((sx, sy)) = self.start else {
            return false;
        };
        let dx = (x - sx).abs();
        let dy = (y - sy).abs();
        dy > dx && dy > self.dead_zone
    }

    /// Complete the gesture and classify it.
    ///
    /// A vertical travel past the minimum swipe distance becomes a
    /// single-section intent; anything else is an incidental touch.
    pub fn on_end(&mut self, x: f64, y: f64) -> Option<NavIntent> {
        let (sx, sy) = self.start.take()?;
        let dx = x - sx;
        let dy = y - sy;

        if dy.abs() <= dx.abs() || dy.abs() < self.min_swipe {
            return None;
        }

        // Upward-ending swipe scrolls "down" the deck, i.e. forward
        if dy < 0.0 {
            Some(NavIntent::Advance(1))
        } else {
            Some(NavIntent::Advance(-1))
        }
    }

    /// Whether a press is currently being tracked
    #[inline]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> DragTracker {
        DragTracker::new(&NavConfig::default())
    }

    #[test]
    fn test_upward_swipe_advances_forward() {
        let mut t = tracker();
        t.on_start(400.0, 500.0);
        assert_eq!(t.on_end(405.0, 300.0), Some(NavIntent::Advance(1)));
        assert!(!t.is_active());
    }

    #[test]
    fn test_downward_swipe_goes_back() {
        let mut t = tracker();
        t.on_start(400.0, 200.0);
        assert_eq!(t.on_end(398.0, 420.0), Some(NavIntent::Advance(-1)));
    }

    #[test]
    fn test_short_drag_is_incidental() {
        let mut t = tracker();
        t.on_start(400.0, 500.0);
        assert_eq!(t.on_end(400.0, 470.0), None);
    }

    #[test]
    fn test_horizontal_drag_emits_nothing() {
        let mut t = tracker();
        t.on_start(100.0, 300.0);
        assert_eq!(t.on_end(400.0, 250.0), None);
    }

    #[test]
    fn test_move_capture_requires_vertical_beyond_dead_zone() {
        let mut t = tracker();
        t.on_start(100.0, 100.0);
        assert!(!t.on_move(102.0, 105.0));
        assert!(t.on_move(102.0, 140.0));
        assert!(!t.on_move(150.0, 130.0));
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let mut t = tracker();
        assert_eq!(t.on_end(0.0, 500.0), None);
    }
}
