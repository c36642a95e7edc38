//! Win32 implementation of [`WindowSystem`]
//!
//! Pulls the monitor and window helpers together and owns the overlay's UI
//! thread for the lifetime of the session.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Gdi::HMONITOR;

use crate::domain::core::{Geometry, Rect};
use crate::input::OverlayEvent;
use crate::platform::{MonitorId, PlatformError, WindowId, WindowSystem, monitors, window};
use crate::ui::frame::SharedFrame;
use crate::ui::overlay::OverlayThread;

/// Converts a Windows RECT to a domain rectangle
pub fn rect_from_win32(rect: &RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

/// Desktop access through user32
#[derive(Default)]
pub struct Win32WindowSystem {
    overlay: Mutex<Option<OverlayThread>>,
}

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowSystem for Win32WindowSystem {
    fn create_overlay(
        &self,
        bounds: Rect,
        frame: SharedFrame,
        events: UnboundedSender<OverlayEvent>,
    ) -> Result<WindowId, PlatformError> {
        let thread = OverlayThread::spawn(bounds, frame, events)?;
        let id = window::window_id(thread.hwnd());

        let previous = self
            .overlay
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(thread);
        drop(previous);

        debug!(overlay = ?id, "overlay created");
        Ok(id)
    }

    fn show_overlay(&self, overlay: WindowId, work_area: Rect) -> Result<(), PlatformError> {
        let hwnd = window::hwnd(overlay);
        window::restore(hwnd);
        window::set_geometry(
            hwnd,
            Geometry::new(
                work_area.left,
                work_area.top,
                work_area.width(),
                work_area.height(),
            ),
        )?;
        window::invalidate(hwnd);
        Ok(())
    }

    fn minimize(&self, window: WindowId) {
        window::minimize(window::hwnd(window));
    }

    fn restore(&self, window: WindowId) {
        window::restore(window::hwnd(window));
    }

    fn close(&self, window: WindowId) {
        window::close(window::hwnd(window));
    }

    fn invalidate(&self, window: WindowId) {
        window::invalidate(window::hwnd(window));
    }

    fn foreground_window(&self) -> Option<WindowId> {
        window::foreground_window().map(window::window_id)
    }

    fn is_desktop(&self, window: WindowId) -> bool {
        window::is_desktop(window::hwnd(window))
    }

    fn monitor_for_window(&self, window: WindowId) -> Option<MonitorId> {
        monitors::monitor_for_window(window::hwnd(window)).map(|hmonitor| MonitorId(hmonitor.0))
    }

    fn monitor_work_area(&self, monitor: MonitorId) -> Result<Rect, PlatformError> {
        monitors::work_area(HMONITOR(monitor.0))
    }

    fn set_window_geometry(
        &self,
        window: WindowId,
        geometry: Geometry,
    ) -> Result<(), PlatformError> {
        window::set_geometry(window::hwnd(window), geometry)
    }
}
