//! Deck geometry: section extents and the offset <-> index mapping.
//!
//! Every section spans the full viewport width by construction, so the
//! whole deck is described by one width and a count.

/// Measured extents of the section deck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    section_width: f64,
    count: usize,
}

impl SectionGeometry {
    /// Measure the deck from the current layout.
    ///
    /// `measured_width` is the width of the first section if the layout has
    /// settled; before first layout it may be absent or zero, in which case
    /// the viewport width is used. The result never has a zero width, so
    /// offset/width divisions downstream are safe.
    pub fn measure(viewport_width: f64, measured_width: Option<f64>, count: usize) -> Self {
        let width = match measured_width {
            Some(w) if w > 0.0 => w,
            _ => viewport_width,
        };
        Self {
            section_width: if width > 0.0 { width } else { 1.0 },
            count: count.max(1),
        }
    }

    #[inline]
    pub fn section_width(&self) -> f64 {
        self.section_width
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Offset of the left edge of `index`, clamped to the deck
    pub fn offset_of(&self, index: usize) -> f64 {
        let index = index.min(self.count - 1);
        index as f64 * self.section_width
    }

    /// Largest reachable offset (left edge of the last section)
    pub fn max_offset(&self) -> f64 {
        (self.count - 1) as f64 * self.section_width
    }

    /// Clamp an arbitrary offset into the scrollable range
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Clamp an arbitrary index into the deck
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.count - 1)
    }
}
