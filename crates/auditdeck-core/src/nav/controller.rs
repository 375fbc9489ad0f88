//! The navigation controller: sole owner of the deck's scroll state.
//!
//! All input paths (wheel, drag, keyboard, nav-bar jumps, resize) funnel
//! into this one component, which owns the authoritative section index and
//! the single in-flight transition. Arbitration is cancel-then-replace:
//! the newest request always wins, a canceled transition freezes at
//! whatever offset it had reached and the replacement animates from there.
//!
//! `update()` must be called every tick. When a transition reaches its
//! nominal duration the controller performs the settle check: if the
//! offset is off target by more than the tolerance it snaps to the exact
//! target, then returns to `Idle`. The in-flight flag is cleared on every
//! completion path, so the state machine cannot wedge in `Transitioning`.

use std::time::{Duration, Instant};

use crate::config::NavConfig;

use super::easing::EasingType;
use super::geometry::SectionGeometry;
use super::intent::NavIntent;
use super::resolver;
use super::timing::{is_complete, lerp, progress};

/// An in-flight animated transition
#[derive(Debug, Clone)]
struct Transition {
    started: Instant,
    from: f64,
    target_index: usize,
    target_offset: f64,
    duration: Duration,
    easing: EasingType,
}

/// Authoritative scroll state and transition executor for the deck
#[derive(Debug, Clone)]
pub struct NavigationController {
    geometry: SectionGeometry,
    offset: f64,
    authoritative_index: usize,
    transition: Option<Transition>,
    /// Idle snap-back deadline; the terminal analogue of native scroll-snap,
    /// suspended while a programmatic transition runs
    snap_deadline: Option<Instant>,
    duration: Duration,
    easing: EasingType,
    hysteresis: f64,
    settle_tolerance: f64,
    wheel_cooldown: Duration,
    snap_idle: Duration,
}

impl NavigationController {
    pub fn new(geometry: SectionGeometry, config: &NavConfig) -> Self {
        Self {
            geometry,
            offset: 0.0,
            authoritative_index: 0,
            transition: None,
            snap_deadline: None,
            duration: Duration::from_millis(config.transition_duration_ms),
            easing: config.easing,
            hysteresis: config.hysteresis_threshold,
            settle_tolerance: config.settle_tolerance,
            wheel_cooldown: Duration::from_millis(config.wheel_cooldown_ms),
            snap_idle: Duration::from_millis(config.snap_idle_ms),
        }
    }

    #[inline]
    pub fn geometry(&self) -> &SectionGeometry {
        &self.geometry
    }

    /// Current horizontal offset of the deck
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The section index the UI treats as active
    #[inline]
    pub fn authoritative_index(&self) -> usize {
        self.authoritative_index
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether the controller has pending work and wants fast ticks
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.transition.is_some() || self.snap_deadline.is_some()
    }

    /// Wheel intents are suppressed (not queued) while a transition is
    /// younger than the cooldown, so continuous scrolling cannot queue up
    /// a runaway chain of jumps.
    pub fn wheel_suppressed(&self, now: Instant) -> bool {
        self.transition
            .as_ref()
            .map(|t| now.saturating_duration_since(t.started) < self.wheel_cooldown)
            .unwrap_or(false)
    }

    /// Request an animated transition to `index`.
    ///
    /// The index is clamped to the deck. A request for the already-pending
    /// target is a no-op, as is a request for the section the deck is
    /// already resting on. Otherwise any in-flight transition is frozen at
    /// its current offset (when `cancel_previous` is set; a concurrent
    /// request with it unset is dropped) and the new one starts from
    /// there. The authoritative index updates immediately so nav
    /// highlighting never lags the user's intent.
    pub fn scroll_to_section(&mut self, index: usize, cancel_previous: bool, now: Instant) {
        let index = self.geometry.clamp_index(index);
        let target_offset = self.geometry.offset_of(index);

        if let Some(t) = &self.transition {
            if t.target_index == index {
                return;
            }
            if !cancel_previous {
                return;
            }
            // Freeze the canceled animation at the offset it has reached
            self.offset = self.interpolated_offset(now);
        } else if (self.offset - target_offset).abs() <= self.settle_tolerance {
            self.authoritative_index = index;
            return;
        }

        tracing::debug!(index, from = self.offset, "section transition start");
        self.authoritative_index = index;
        self.snap_deadline = None;
        self.transition = Some(Transition {
            started: now,
            from: self.offset,
            target_index: index,
            target_offset,
            duration: self.duration,
            easing: self.easing,
        });
    }

    /// Apply a discrete navigation intent from any input source
    pub fn apply(&mut self, intent: NavIntent, now: Instant) {
        match intent {
            NavIntent::Advance(steps) => {
                let target = (self.authoritative_index as i64 + steps as i64)
                    .clamp(0, self.geometry.count() as i64 - 1) as usize;
                self.scroll_to_section(target, true, now);
            }
            NavIntent::JumpTo(index) => self.scroll_to_section(index, true, now),
        }
    }

    /// Direct horizontal scroll (pass-through wheel deltas).
    ///
    /// Cancels any in-flight transition, moves the offset raw, and lets
    /// the resolver's feedback decide the active index. A quiet period
    /// later the deck snaps back onto the resolved section.
    pub fn scroll_horizontal(&mut self, delta: f64, now: Instant) {
        if self.transition.is_some() {
            self.offset = self.interpolated_offset(now);
            self.transition = None;
        }
        self.offset = self.geometry.clamp_offset(self.offset + delta);
        self.authoritative_index =
            resolver::resolve(self.offset, &self.geometry, self.hysteresis);
        self.snap_deadline = Some(now + self.snap_idle);
    }

    /// Advance animation state; call every tick. Returns the offset.
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(t) = &self.transition {
            if is_complete(t.started, now, t.duration) {
                // Settle check: the nominal duration has elapsed, nudge the
                // deck onto the exact target if the animation fell short.
                let drift = (self.offset - t.target_offset).abs();
                if drift > self.settle_tolerance {
                    tracing::debug!(drift, "settle correction applied");
                }
                self.offset = t.target_offset;
                self.authoritative_index = t.target_index;
                self.transition = None;
            } else {
                self.offset = self.interpolated_offset(now);
            }
        } else if let Some(deadline) = self.snap_deadline {
            if now >= deadline {
                self.snap_deadline = None;
                let index = resolver::resolve(self.offset, &self.geometry, self.hysteresis);
                let target = self.geometry.offset_of(index);
                if (self.offset - target).abs() > self.settle_tolerance {
                    self.scroll_to_section(index, true, now);
                } else {
                    self.authoritative_index = index;
                }
            }
        }

        self.offset
    }

    /// Adopt new geometry after a viewport resize.
    ///
    /// The authoritative index is preserved; the offset gets a non-animated
    /// correction to `index * new_width` when it has drifted past the
    /// tolerance. An in-flight transition is retargeted in place.
    pub fn set_geometry(&mut self, geometry: SectionGeometry) {
        self.geometry = geometry;
        self.authoritative_index = self.geometry.clamp_index(self.authoritative_index);

        if let Some(t) = &mut self.transition {
            t.target_index = geometry.clamp_index(t.target_index);
            t.target_offset = geometry.offset_of(t.target_index);
            t.from = geometry.clamp_offset(t.from);
            return;
        }

        let expected = self.geometry.offset_of(self.authoritative_index);
        if (self.offset - expected).abs() > self.settle_tolerance {
            tracing::debug!(
                index = self.authoritative_index,
                expected,
                actual = self.offset,
                "resize correction applied"
            );
            self.offset = expected;
        }
    }

    fn interpolated_offset(&self, now: Instant) -> f64 {
        match &self.transition {
            Some(t) => {
                let p = progress(t.started, now, t.duration);
                let eased = t.easing.apply(p);
                self.geometry
                    .clamp_offset(lerp(t.from, t.target_offset, eased))
            }
            None => self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 1000.0;

    fn controller(count: usize) -> NavigationController {
        let geometry = SectionGeometry::measure(WIDTH, Some(WIDTH), count);
        NavigationController::new(geometry, &NavConfig::default())
    }

    fn past_duration() -> Duration {
        Duration::from_millis(NavConfig::default().transition_duration_ms + 50)
    }

    #[test]
    fn test_convergence_for_every_section() {
        let t0 = Instant::now();
        for k in 0..7 {
            let mut nav = controller(7);
            nav.scroll_to_section(k, true, t0);
            nav.update(t0 + past_duration());
            assert!((nav.offset() - k as f64 * WIDTH).abs() <= 2.0, "section {}", k);
            assert_eq!(nav.authoritative_index(), k);
            assert!(!nav.is_transitioning());
        }
    }

    #[test]
    fn test_idempotent_at_rest() {
        let mut nav = controller(5);
        let t0 = Instant::now();
        nav.scroll_to_section(3, true, t0);
        nav.update(t0 + past_duration());
        let offset = nav.offset();

        nav.scroll_to_section(3, true, t0 + past_duration() + Duration::from_millis(10));
        assert!(!nav.is_transitioning());
        assert_eq!(nav.offset(), offset);
        assert_eq!(nav.authoritative_index(), 3);
    }

    #[test]
    fn test_single_flight_newest_wins() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(2, true, t0);
        nav.scroll_to_section(4, true, t0 + Duration::from_millis(5));
        assert_eq!(nav.authoritative_index(), 4);

        nav.update(t0 + Duration::from_millis(5) + past_duration());
        assert_eq!(nav.authoritative_index(), 4);
        assert!((nav.offset() - 4.0 * WIDTH).abs() <= 2.0);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_duplicate_pending_target_is_noop() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(3, true, t0);
        let mid = t0 + Duration::from_millis(100);
        nav.update(mid);
        let frozen = nav.offset();
        // Re-requesting the pending target must not restart the animation
        nav.scroll_to_section(3, true, mid);
        nav.update(mid);
        assert_eq!(nav.offset(), frozen);
        nav.update(t0 + past_duration());
        assert!((nav.offset() - 3.0 * WIDTH).abs() <= 2.0);
    }

    #[test]
    fn test_cancel_freezes_then_animates_from_there() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(5, true, t0);
        let mid = t0 + Duration::from_millis(120);
        nav.update(mid);
        let mid_offset = nav.offset();
        assert!(mid_offset > 0.0 && mid_offset < 5.0 * WIDTH);

        nav.scroll_to_section(1, true, mid);
        // The replacement starts from the frozen offset, not from a rewind
        assert_eq!(nav.offset(), mid_offset);
        nav.update(mid + past_duration());
        assert!((nav.offset() - WIDTH).abs() <= 2.0);
        assert_eq!(nav.authoritative_index(), 1);
    }

    #[test]
    fn test_no_cancel_drops_new_request() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(2, true, t0);
        nav.scroll_to_section(5, false, t0 + Duration::from_millis(10));
        assert_eq!(nav.authoritative_index(), 2);
        nav.update(t0 + past_duration());
        assert!((nav.offset() - 2.0 * WIDTH).abs() <= 2.0);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let mut nav = controller(4);
        let t0 = Instant::now();
        nav.scroll_to_section(99, true, t0);
        assert_eq!(nav.authoritative_index(), 3);
        nav.update(t0 + past_duration());
        assert!((nav.offset() - 3.0 * WIDTH).abs() <= 2.0);
    }

    #[test]
    fn test_advance_clamps_at_edges() {
        let mut nav = controller(3);
        let t0 = Instant::now();
        nav.apply(NavIntent::Advance(-1), t0);
        assert_eq!(nav.authoritative_index(), 0);
        assert!(!nav.is_transitioning());

        nav.apply(NavIntent::Advance(2), t0);
        nav.update(t0 + past_duration());
        nav.apply(NavIntent::Advance(5), t0 + past_duration());
        assert_eq!(nav.authoritative_index(), 2);
    }

    #[test]
    fn test_authoritative_index_updates_immediately() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(6, true, t0);
        // Before any update tick the UI must already highlight the target
        assert_eq!(nav.authoritative_index(), 6);
        assert!(nav.is_transitioning());
    }

    #[test]
    fn test_wheel_cooldown_window() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(2, true, t0);
        assert!(nav.wheel_suppressed(t0 + Duration::from_millis(100)));
        assert!(!nav.wheel_suppressed(t0 + Duration::from_millis(300)));

        nav.update(t0 + past_duration());
        assert!(!nav.wheel_suppressed(t0 + past_duration()));
    }

    #[test]
    fn test_resize_keeps_index_and_corrects_offset() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(3, true, t0);
        nav.update(t0 + past_duration());
        assert_eq!(nav.authoritative_index(), 3);

        // Halve the viewport
        let half = SectionGeometry::measure(WIDTH / 2.0, Some(WIDTH / 2.0), 7);
        nav.set_geometry(half);
        assert_eq!(nav.authoritative_index(), 3);
        assert!((nav.offset() - 3.0 * (WIDTH / 2.0)).abs() <= 2.0);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_resize_mid_transition_retargets() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(4, true, t0);
        nav.update(t0 + Duration::from_millis(100));

        let half = SectionGeometry::measure(WIDTH / 2.0, Some(WIDTH / 2.0), 7);
        nav.set_geometry(half);
        nav.update(t0 + past_duration());
        assert_eq!(nav.authoritative_index(), 4);
        assert!((nav.offset() - 4.0 * (WIDTH / 2.0)).abs() <= 2.0);
    }

    #[test]
    fn test_pass_through_scroll_snaps_back_after_quiet_period() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        // Drag the deck 40% into section 1 territory
        nav.scroll_horizontal(400.0, t0);
        assert_eq!(nav.authoritative_index(), 1);
        assert!(nav.needs_update());

        // After the quiet period the deck animates onto the resolved section
        let quiet = t0 + Duration::from_millis(NavConfig::default().snap_idle_ms + 10);
        nav.update(quiet);
        assert!(nav.is_transitioning());
        nav.update(quiet + past_duration());
        assert!((nav.offset() - WIDTH).abs() <= 2.0);
        assert_eq!(nav.authoritative_index(), 1);
    }

    #[test]
    fn test_small_pass_through_scroll_holds_section() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_horizontal(250.0, t0);
        // Under the hysteresis threshold: still section 0
        assert_eq!(nav.authoritative_index(), 0);
        let quiet = t0 + Duration::from_millis(NavConfig::default().snap_idle_ms + 10);
        nav.update(quiet);
        assert!(nav.is_transitioning());
        nav.update(quiet + past_duration());
        assert!(nav.offset().abs() <= 2.0);
        assert_eq!(nav.authoritative_index(), 0);
    }

    #[test]
    fn test_idle_invariant_after_chaos() {
        let mut nav = controller(7);
        let t0 = Instant::now();
        nav.scroll_to_section(5, true, t0);
        nav.scroll_horizontal(-300.0, t0 + Duration::from_millis(50));
        nav.scroll_to_section(2, true, t0 + Duration::from_millis(60));
        nav.scroll_horizontal(120.0, t0 + Duration::from_millis(70));
        let late = t0 + Duration::from_secs(5);
        nav.update(late);
        nav.update(late + past_duration());

        // Whatever happened, the system converged back to a consistent Idle
        assert!(!nav.is_transitioning());
        let resolved = resolver::resolve(nav.offset(), nav.geometry(), 0.3);
        assert_eq!(nav.authoritative_index(), resolved);
        let expected = nav.geometry().offset_of(resolved);
        assert!((nav.offset() - expected).abs() <= 2.0);
    }
}
