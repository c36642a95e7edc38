//! Window management and positioning
//!
//! This module handles:
//! - Reading the foreground window
//! - Recognizing the desktop and shell windows
//! - Moving and resizing windows without touching z-order or focus
//! - Minimizing, restoring and closing windows

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::Graphics::Gdi::InvalidateRect;
use windows::Win32::UI::WindowsAndMessaging::{
    GetDesktopWindow, GetForegroundWindow, GetShellWindow, IsWindow, PostMessageW, SW_MINIMIZE,
    SW_RESTORE, SWP_ASYNCWINDOWPOS, SWP_NOACTIVATE, SWP_NOOWNERZORDER, SWP_NOZORDER,
    SWP_SHOWWINDOW, SetWindowPos, ShowWindow, WM_CLOSE,
};

use crate::domain::core::Geometry;
use crate::platform::{PlatformError, WindowId};

pub fn hwnd(window: WindowId) -> HWND {
    HWND(window.0)
}

pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0)
}

/// Gets the currently active (foreground) window
pub fn foreground_window() -> Option<HWND> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.0 == 0 { None } else { Some(hwnd) }
}

/// True for the desktop window and the shell's desktop window
pub fn is_desktop(hwnd: HWND) -> bool {
    let (desktop, shell) = unsafe { (GetDesktopWindow(), GetShellWindow()) };
    hwnd == desktop || (shell.0 != 0 && hwnd == shell)
}

pub fn is_alive(hwnd: HWND) -> bool {
    unsafe { IsWindow(hwnd).as_bool() }
}

pub fn minimize(hwnd: HWND) {
    unsafe {
        ShowWindow(hwnd, SW_MINIMIZE);
    }
}

/// Restores a minimized or maximized window so it can be resized
pub fn restore(hwnd: HWND) {
    unsafe {
        ShowWindow(hwnd, SW_RESTORE);
    }
}

/// Moves and resizes `hwnd`
///
/// The target usually belongs to another process, so the move is posted
/// asynchronously. Z-order and activation are left alone.
pub fn set_geometry(hwnd: HWND, geometry: Geometry) -> Result<(), PlatformError> {
    let result = unsafe {
        SetWindowPos(
            hwnd,
            HWND(0), // Ignored due to SWP_NOZORDER
            geometry.x,
            geometry.y,
            geometry.w,
            geometry.h,
            SWP_ASYNCWINDOWPOS | SWP_NOACTIVATE | SWP_NOOWNERZORDER | SWP_NOZORDER | SWP_SHOWWINDOW,
        )
    };

    result.map_err(|_| PlatformError::PositionFailed(window_id(hwnd)))
}

/// Asks `hwnd` to close; the owning thread destroys it
pub fn close(hwnd: HWND) {
    let _ = unsafe { PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) };
}

pub fn invalidate(hwnd: HWND) {
    unsafe {
        InvalidateRect(hwnd, None, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_is_recognized() {
        let desktop = unsafe { GetDesktopWindow() };
        assert!(is_desktop(desktop));
        assert!(is_alive(desktop));
    }

    #[test]
    fn handle_conversion() {
        let id = WindowId(0x1234);
        assert_eq!(window_id(hwnd(id)), id);
    }

    #[test]
    fn positioning_an_invalid_window_fails() {
        let result = set_geometry(HWND(999999), Geometry::new(0, 0, 100, 100));
        assert!(matches!(
            result,
            Err(PlatformError::PositionFailed(WindowId(999999)))
        ));
    }
}
