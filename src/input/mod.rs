//! Overlay input decoding
//!
//! Raw window messages are translated into [`OverlayEvent`]s on the overlay
//! thread and handed to the session controller through a channel.

pub mod keyboard;
pub mod pointer;

pub use keyboard::Key;
pub use pointer::point_from_lparam;

use crate::domain::core::Point;

/// Events produced by the overlay window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Primary button pressed at a client position
    PointerDown(Point),
    /// Pointer moved to a client position
    PointerMove(Point),
    /// Primary button released
    PointerUp,
    /// Key pressed while the overlay has focus
    Key(Key),
    /// The overlay window was destroyed
    Destroyed,
}
