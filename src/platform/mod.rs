//! Window-management collaborator
//!
//! The session controller only talks to the desktop through the
//! [`WindowSystem`] trait. The Win32 implementation lives in the
//! `windows`-only submodules; tests drive the controller with fakes.

#[cfg(windows)]
pub mod monitors;
#[cfg(windows)]
pub mod window;
#[cfg(windows)]
pub mod windows;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::core::{Geometry, Rect};
use crate::input::OverlayEvent;
use crate::ui::frame::SharedFrame;

/// Opaque, copyable window identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

/// Opaque, copyable monitor identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorId(pub isize);

/// Errors reported by the window-management collaborator
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Failed to register overlay window class")]
    WindowClassRegistrationFailed,

    #[error("Failed to create overlay window")]
    OverlayCreationFailed,

    #[error("Overlay thread failed: {0}")]
    OverlayThreadFailed(String),

    #[error("Failed to query monitor info for {0:?}")]
    MonitorInfoFailed(MonitorId),

    #[error("Failed to position window {0:?}")]
    PositionFailed(WindowId),
}

/// Everything the session needs from the desktop
///
/// All methods are called from the single session controller; no two calls
/// ever overlap.
pub trait WindowSystem {
    /// Creates the overlay window covering `bounds`
    ///
    /// The paint handler reads `frame`; pointer, key and destruction events
    /// are forwarded into `events`. Dropping the sender ends the overlay's
    /// lifetime from the controller's point of view.
    fn create_overlay(
        &self,
        bounds: Rect,
        frame: SharedFrame,
        events: UnboundedSender<OverlayEvent>,
    ) -> Result<WindowId, PlatformError>;

    /// Restores the overlay and stretches it over `work_area`
    fn show_overlay(&self, overlay: WindowId, work_area: Rect) -> Result<(), PlatformError>;

    fn minimize(&self, window: WindowId);

    fn restore(&self, window: WindowId);

    /// Asks the overlay to close; destruction is reported through its events
    fn close(&self, window: WindowId);

    /// Requests a repaint
    fn invalidate(&self, window: WindowId);

    /// Returns the foreground window, if any
    fn foreground_window(&self) -> Option<WindowId>;

    /// True for the desktop/shell window, which is never a valid target
    fn is_desktop(&self, window: WindowId) -> bool;

    /// Returns the monitor showing `window`, or `None` if it is on no monitor
    fn monitor_for_window(&self, window: WindowId) -> Option<MonitorId>;

    /// Returns the monitor's work area in screen coordinates
    fn monitor_work_area(&self, monitor: MonitorId) -> Result<Rect, PlatformError>;

    /// Moves and resizes `window` without changing z-order or activation
    fn set_window_geometry(&self, window: WindowId, geometry: Geometry)
    -> Result<(), PlatformError>;
}
