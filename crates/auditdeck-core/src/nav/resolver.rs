//! Derives the active section index from a continuous scroll offset.
//!
//! A plain `round()` flips the active section the moment the midpoint is
//! crossed, which makes nav highlighting flicker during slow manual
//! scrolls. The resolver instead biases toward the current section: only
//! once the fractional part reaches the hysteresis threshold does it round
//! up. The threshold is a tunable in (0, 0.5], 0.3 by default.

use super::geometry::SectionGeometry;

/// Default hysteresis threshold; see `NavConfig::hysteresis_threshold`
pub const DEFAULT_HYSTERESIS: f64 = 0.3;

/// Resolve a scroll offset to a section index with hysteresis.
///
/// A fractional position at or past `threshold` rounds up, anything below
/// rounds down. The result is clamped to the deck.
pub fn resolve(offset: f64, geometry: &SectionGeometry, threshold: f64) -> usize {
    let width = geometry.section_width();
    if width <= 0.0 {
        return 0;
    }
    let raw = offset.max(0.0) / width;
    let frac = raw.fract();
    let index = if frac >= threshold {
        raw.ceil()
    } else {
        raw.floor()
    };
    geometry.clamp_index(index as usize)
}
