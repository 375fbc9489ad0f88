//! Keeps the authoritative index stable across viewport size changes.
//!
//! Terminals report a stream of resize events while a window is being
//! dragged, so the reconciler debounces them and only remeasures once the
//! size has settled. The controller then applies a non-animated offset
//! correction; without it a resize would silently land the deck between
//! two sections.

use std::time::{Duration, Instant};

use crate::config::NavConfig;

use super::controller::NavigationController;
use super::geometry::SectionGeometry;

#[derive(Debug, Clone)]
pub struct ResizeReconciler {
    pending_width: Option<f64>,
    deadline: Option<Instant>,
    debounce: Duration,
}

impl ResizeReconciler {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            pending_width: None,
            deadline: None,
            debounce: Duration::from_millis(config.resize_debounce_ms),
        }
    }

    /// Note a new viewport width; restarts the debounce deadline
    pub fn on_resize(&mut self, viewport_width: f64, now: Instant) {
        self.pending_width = Some(viewport_width);
        self.deadline = Some(now + self.debounce);
    }

    /// Apply the pending remeasure once the debounce deadline has passed.
    ///
    /// Returns true when new geometry was handed to the controller.
    pub fn poll(&mut self, now: Instant, controller: &mut NavigationController) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.deadline = None;
        let Some(width) = self.pending_width.take() else {
            return false;
        };

        let count = controller.geometry().count();
        let geometry = SectionGeometry::measure(width, Some(width), count);
        tracing::debug!(width, count, "viewport remeasured after resize");
        controller.set_geometry(geometry);
        true
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(count: usize, width: f64) -> (NavigationController, ResizeReconciler) {
        let config = NavConfig::default();
        let geometry = SectionGeometry::measure(width, Some(width), count);
        (
            NavigationController::new(geometry, &config),
            ResizeReconciler::new(&config),
        )
    }

    #[test]
    fn test_resize_stability() {
        let (mut nav, mut reconciler) = setup(7, 1000.0);
        let t0 = Instant::now();
        nav.scroll_to_section(3, true, t0);
        nav.update(t0 + Duration::from_secs(1));
        assert_eq!(nav.authoritative_index(), 3);

        // Halve the viewport and fire a resize
        let t1 = t0 + Duration::from_secs(2);
        reconciler.on_resize(500.0, t1);
        assert!(!reconciler.poll(t1 + Duration::from_millis(50), &mut nav));
        assert!(reconciler.poll(t1 + Duration::from_millis(200), &mut nav));

        assert_eq!(nav.authoritative_index(), 3);
        assert!((nav.offset() - 3.0 * 500.0).abs() <= 2.0);
    }

    #[test]
    fn test_burst_of_resizes_applies_last_width() {
        let (mut nav, mut reconciler) = setup(5, 1000.0);
        let t0 = Instant::now();
        nav.scroll_to_section(2, true, t0);
        nav.update(t0 + Duration::from_secs(1));

        let t1 = t0 + Duration::from_secs(2);
        reconciler.on_resize(900.0, t1);
        reconciler.on_resize(700.0, t1 + Duration::from_millis(40));
        reconciler.on_resize(640.0, t1 + Duration::from_millis(80));
        // Deadline restarted each time; the first deadline must not fire
        assert!(!reconciler.poll(t1 + Duration::from_millis(160), &mut nav));
        assert!(reconciler.poll(t1 + Duration::from_millis(300), &mut nav));

        assert_eq!(nav.geometry().section_width(), 640.0);
        assert!((nav.offset() - 2.0 * 640.0).abs() <= 2.0);
        assert!(!reconciler.is_pending());
    }

    #[test]
    fn test_same_width_resize_is_quiet() {
        let (mut nav, mut reconciler) = setup(5, 1000.0);
        let t0 = Instant::now();
        nav.scroll_to_section(1, true, t0);
        nav.update(t0 + Duration::from_secs(1));
        let offset = nav.offset();

        let t1 = t0 + Duration::from_secs(2);
        reconciler.on_resize(1000.0, t1);
        assert!(reconciler.poll(t1 + Duration::from_millis(200), &mut nav));
        assert_eq!(nav.offset(), offset);
        assert_eq!(nav.authoritative_index(), 1);
    }
}
