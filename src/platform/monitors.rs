//! Monitor lookup and work area queries
//!
//! Work areas are returned in virtual-screen coordinates, so monitors left
//! of or above the primary one have negative origins.

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, HMONITOR, MONITOR_DEFAULTTONULL, MONITORINFO, MonitorFromWindow,
};

use crate::domain::core::Rect;
use crate::platform::windows::rect_from_win32;
use crate::platform::{MonitorId, PlatformError};

/// Returns the monitor showing `hwnd`, or `None` if it is on no monitor
pub fn monitor_for_window(hwnd: HWND) -> Option<HMONITOR> {
    let hmonitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONULL) };
    if hmonitor.is_invalid() {
        None
    } else {
        Some(hmonitor)
    }
}

/// Returns the work area (monitor minus taskbar and docked bars)
pub fn work_area(hmonitor: HMONITOR) -> Result<Rect, PlatformError> {
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    let ok = unsafe { GetMonitorInfoW(hmonitor, &mut info) };
    if !ok.as_bool() {
        return Err(PlatformError::MonitorInfoFailed(MonitorId(hmonitor.0)));
    }

    Ok(rect_from_win32(&info.rcWork))
}
