//! Overlay window and its UI thread
//!
//! The overlay lives on a dedicated thread running a Win32 message loop. Its
//! window procedure only forwards input into the session channel and paints
//! the latest [`OverlayFrame`](crate::ui::frame::OverlayFrame); it never waits
//! on the controller.

use std::ffi::c_void;
use std::sync::mpsc as std_mpsc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BeginPaint, DIB_RGB_COLORS, EndPaint, HDC, PAINTSTRUCT,
    SetDIBitsToDevice,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DispatchMessageW, GWLP_USERDATA,
    GetMessageW, GetWindowLongPtrW, IDC_ARROW, LoadCursorW, MSG, PostQuitMessage, RegisterClassW,
    SetWindowLongPtrW, TranslateMessage, WINDOW_EX_STYLE, WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN,
    WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_NCDESTROY, WM_PAINT, WNDCLASSW, WS_BORDER,
    WS_POPUP, WS_SYSMENU,
};
use windows::core::w;

use crate::domain::core::Rect;
use crate::input::{Key, OverlayEvent, point_from_lparam};
use crate::platform::PlatformError;
use crate::platform::window;
use crate::ui::frame::{self, SharedFrame};
use crate::ui::renderer::{OverlayRenderer, pixmap_to_bgra};

/// State reachable from the window procedure through `GWLP_USERDATA`
struct OverlayContext {
    events: UnboundedSender<OverlayEvent>,
    frame: SharedFrame,
    renderer: OverlayRenderer,
}

impl OverlayContext {
    fn send(&self, event: OverlayEvent) {
        // The controller may already be gone after the session finished
        let _ = self.events.send(event);
    }
}

/// Overlay window plus the thread pumping its messages
///
/// Dropping it closes the window if it is still alive and joins the thread.
pub struct OverlayThread {
    hwnd: HWND,
    handle: Option<JoinHandle<()>>,
}

impl OverlayThread {
    /// Spawns the UI thread and waits until the window exists
    ///
    /// An empty `bounds` lets Windows pick the initial position and size.
    pub fn spawn(
        bounds: Rect,
        frame: SharedFrame,
        events: UnboundedSender<OverlayEvent>,
    ) -> Result<Self, PlatformError> {
        let (ready_tx, ready_rx) = std_mpsc::sync_channel(1);

        let handle = thread::Builder::new()
            .name("overlay".into())
            .spawn(move || {
                let context = OverlayContext {
                    events,
                    frame,
                    renderer: OverlayRenderer::default(),
                };
                match create_window(bounds, context) {
                    Ok(hwnd) => {
                        let _ = ready_tx.send(Ok(hwnd.0));
                        message_loop();
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                    }
                }
            })
            .map_err(|err| PlatformError::OverlayThreadFailed(err.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(raw)) => Ok(Self {
                hwnd: HWND(raw),
                handle: Some(handle),
            }),
            Ok(Err(err)) => {
                let _ = handle.join();
                Err(err)
            }
            Err(_) => {
                let _ = handle.join();
                Err(PlatformError::OverlayThreadFailed(
                    "overlay thread exited before creating its window".into(),
                ))
            }
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl Drop for OverlayThread {
    fn drop(&mut self) {
        if window::is_alive(self.hwnd) {
            window::close(self.hwnd);
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("overlay thread panicked");
            }
        }
    }
}

fn message_loop() {
    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 == 0 || result.0 == -1 {
            // WM_QUIT or error
            break;
        }
        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
    debug!("overlay message loop finished");
}

/// Registers the class and creates the (hidden) overlay window
fn create_window(bounds: Rect, context: OverlayContext) -> Result<HWND, PlatformError> {
    let class_name = w!("TileScreenOverlayWindow");
    let hinstance =
        unsafe { GetModuleHandleW(None) }.map_err(|_| PlatformError::WindowClassRegistrationFailed)?;

    let wc = WNDCLASSW {
        lpfnWndProc: Some(overlay_window_proc),
        hInstance: hinstance.into(),
        lpszClassName: class_name,
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        ..Default::default()
    };
    if unsafe { RegisterClassW(&wc) } == 0 {
        return Err(PlatformError::WindowClassRegistrationFailed);
    }

    let (x, y, width, height) = if bounds.width() > 0 && bounds.height() > 0 {
        (bounds.left, bounds.top, bounds.width(), bounds.height())
    } else {
        (CW_USEDEFAULT, CW_USEDEFAULT, CW_USEDEFAULT, CW_USEDEFAULT)
    };

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            w!("Screen Tile"),
            WS_POPUP | WS_BORDER | WS_SYSMENU,
            x,
            y,
            width,
            height,
            None,
            None,
            hinstance,
            None,
        )
    };
    if hwnd.0 == 0 {
        return Err(PlatformError::OverlayCreationFailed);
    }

    let context = Box::into_raw(Box::new(context));
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, context as isize);
    }
    Ok(hwnd)
}

/// Borrows the context stored in the window, if it is still attached
///
/// # Safety
/// Must be called on the overlay thread, outside `WM_NCDESTROY`.
unsafe fn context<'a>(hwnd: HWND) -> Option<&'a OverlayContext> {
    let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const OverlayContext;
    unsafe { ptr.as_ref() }
}

unsafe extern "system" fn overlay_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCDESTROY {
        unsafe {
            let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut OverlayContext;
            if !ptr.is_null() {
                drop(Box::from_raw(ptr));
            }
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        }
    }

    let Some(ctx) = (unsafe { context(hwnd) }) else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    match msg {
        WM_LBUTTONDOWN => {
            unsafe {
                SetCapture(hwnd);
            }
            ctx.send(OverlayEvent::PointerDown(point_from_lparam(lparam.0)));
            LRESULT(0)
        }
        WM_MOUSEMOVE => {
            ctx.send(OverlayEvent::PointerMove(point_from_lparam(lparam.0)));
            LRESULT(0)
        }
        WM_LBUTTONUP => {
            let _ = unsafe { ReleaseCapture() };
            ctx.send(OverlayEvent::PointerUp);
            LRESULT(0)
        }
        WM_KEYDOWN => {
            ctx.send(OverlayEvent::Key(Key::from_vk_code(wparam.0 as u32)));
            LRESULT(0)
        }
        WM_ERASEBKGND => LRESULT(1),
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
            paint(hdc, ctx);
            unsafe {
                EndPaint(hwnd, &ps);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            ctx.send(OverlayEvent::Destroyed);
            unsafe {
                PostQuitMessage(0);
            }
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Renders the latest frame and copies it to the window
fn paint(hdc: HDC, ctx: &OverlayContext) {
    let frame = frame::snapshot(&ctx.frame);
    let pixmap = match ctx.renderer.render_frame(&frame) {
        Ok(pixmap) => pixmap,
        Err(err) => {
            debug!(%err, "nothing to paint yet");
            return;
        }
    };

    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let pixels = pixmap_to_bgra(&pixmap);

    let mut bitmap_info = BITMAPINFO::default();
    bitmap_info.bmiHeader = BITMAPINFOHEADER {
        biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
        biWidth: width,
        biHeight: -height, // top-down
        biPlanes: 1,
        biBitCount: 32,
        biCompression: BI_RGB.0,
        ..Default::default()
    };

    let copied = unsafe {
        SetDIBitsToDevice(
            hdc,
            0,
            0,
            width as u32,
            height as u32,
            0,
            0,
            0,
            height as u32,
            pixels.as_ptr() as *const c_void,
            &bitmap_info,
            DIB_RGB_COLORS,
        )
    };
    if copied == 0 {
        warn!("failed to copy overlay frame to the window");
    }
}
