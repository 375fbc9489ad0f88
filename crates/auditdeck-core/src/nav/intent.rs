//! Navigation intents: the single currency between gesture components and
//! the controller.

/// A discrete navigation request distilled from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Move relative to the authoritative index (negative is backward)
    Advance(i32),
    /// Jump straight to a section, e.g. from a nav-bar shortcut
    JumpTo(usize),
}
