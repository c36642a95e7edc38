//! Render snapshot shared between the session and the paint handler

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::core::Rect;
use crate::domain::grid::{GridError, TileCount, TileGrid, overlaps};

/// Everything the paint handler needs to draw the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayFrame {
    /// Work area the overlay covers (screen coordinates)
    pub work_area: Rect,
    /// Current tile count
    pub tile_count: TileCount,
    /// Current selection (overlay client coordinates), if a drag started
    pub selection: Option<Rect>,
}

impl OverlayFrame {
    /// Builds the grid for this frame
    pub fn grid(&self) -> Result<TileGrid, GridError> {
        TileGrid::new(self.work_area, self.tile_count)
    }

    /// True if `cell` should be drawn highlighted
    pub fn is_highlighted(&self, cell: &Rect) -> bool {
        self.selection
            .is_some_and(|selection| overlaps(cell, &selection))
    }
}

/// Frame written by the controller and read by the overlay thread
pub type SharedFrame = Arc<Mutex<OverlayFrame>>;

/// Wraps a frame for sharing with the overlay thread
pub fn share(frame: OverlayFrame) -> SharedFrame {
    Arc::new(Mutex::new(frame))
}

/// Copies the latest frame out of `shared`
pub fn snapshot(shared: &SharedFrame) -> OverlayFrame {
    *shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the frame in `shared`
pub fn publish(shared: &SharedFrame, frame: OverlayFrame) {
    *shared.lock().unwrap_or_else(PoisonError::into_inner) = frame;
}
