//! Coalesces rapid wheel events into discrete navigation intents.
//!
//! Terminals (and trackpads behind them) deliver scroll wheel input as a
//! burst of small deltas. Acting on each one would fire a navigation per
//! notch; instead qualifying deltas accumulate and a debounce deadline is
//! restarted on every event. Only when the burst goes quiet is the
//! accumulated magnitude evaluated: below the noise floor it is dropped,
//! otherwise it becomes a single intent of one section, or two for an
//! aggressive burst (never more).

use std::time::{Duration, Instant};

use crate::config::NavConfig;

use super::intent::NavIntent;

/// Immediate disposition of a single wheel event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelResponse {
    /// Dominantly vertical: captured for section navigation, do not let the
    /// surface scroll natively
    Captured,
    /// Dominantly horizontal: forward this delta straight to the surface
    PassThrough(f64),
}

/// Accumulator state for one burst of wheel events
#[derive(Debug, Clone)]
pub struct WheelAccumulator {
    accumulated: f64,
    last_delta_y: f64,
    deadline: Option<Instant>,
    debounce: Duration,
    min_magnitude: f64,
    double_jump_magnitude: f64,
}

impl WheelAccumulator {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            accumulated: 0.0,
            last_delta_y: 0.0,
            deadline: None,
            debounce: Duration::from_millis(config.wheel_debounce_ms),
            min_magnitude: config.wheel_min_magnitude,
            double_jump_magnitude: config.wheel_double_jump_magnitude,
        }
    }

    /// Feed one wheel event.
    ///
    /// Vertical-dominant events are absorbed into the running burst and the
    /// debounce deadline restarts; horizontal-dominant events bypass the
    /// accumulator entirely.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64, now: Instant) -> WheelResponse {
        if delta_y.abs() <= delta_x.abs() {
            return WheelResponse::PassThrough(delta_x);
        }

        self.accumulated += delta_y.abs();
        self.last_delta_y = delta_y;
        self.deadline = Some(now + self.debounce);
        WheelResponse::Captured
    }

    /// Evaluate the burst once its debounce deadline has passed.
    ///
    /// Returns at most one intent per burst; the accumulator is reset
    /// either way. Calling before the deadline is a no-op.
    pub fn poll(&mut self, now: Instant) -> Option<NavIntent> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        let magnitude = self.accumulated;
        let direction: i32 = if self.last_delta_y > 0.0 { 1 } else { -1 };
        self.reset();

        if magnitude < self.min_magnitude {
            tracing::trace!(magnitude, "wheel burst below noise floor, dropped");
            return None;
        }

        let steps = if magnitude > self.double_jump_magnitude {
            2
        } else {
            1
        };
        Some(NavIntent::Advance(direction * steps))
    }

    /// Whether a burst is waiting on its debounce deadline
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    fn reset(&mut self) {
        self.accumulated = 0.0;
        self.last_delta_y = 0.0;
        self.deadline = None;
    }
}
