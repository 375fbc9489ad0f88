//! Section-navigation engine for the horizontally paged deck.
//!
//! Five asynchronous input sources (scroll wheel, pointer drag, keyboard,
//! programmatic jumps, viewport resize) are reconciled into one
//! authoritative "current section" index while the deck's offset animates
//! between sections.
//!
//! The engine is deliberately free of any terminal or DOM dependency:
//! every stateful component takes the current `Instant` explicitly and
//! raw input is distilled into [`NavIntent`] values, so the debounce and
//! cancellation logic is unit-testable without an event loop.
//!
//! - `easing` / `timing` - pure animation atoms
//! - `geometry` - section extents and offset <-> index mapping
//! - `resolver` - offset -> index with hysteresis
//! - `wheel` - wheel burst accumulator
//! - `drag` - pointer drag classifier
//! - `controller` - authoritative state and transition executor
//! - `reconciler` - resize debounce and geometry handoff

pub mod controller;
pub mod drag;
pub mod easing;
pub mod geometry;
pub mod intent;
pub mod reconciler;
pub mod resolver;
pub mod timing;
pub mod wheel;

pub use controller::NavigationController;
pub use drag::DragTracker;
pub use easing::EasingType;
pub use geometry::SectionGeometry;
pub use intent::NavIntent;
pub use reconciler::ResizeReconciler;
pub use wheel::{WheelAccumulator, WheelResponse};
