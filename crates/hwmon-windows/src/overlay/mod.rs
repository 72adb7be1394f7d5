//! The always-on-top overlay window.
//!
//! A single layered Win32 popup that renders the component rows with
//! `UpdateLayeredWindow`. Input handling lives in [`crate::app`].

mod render;
mod text;
mod widgets;

use std::sync::Once;

use hwmon_core::component::Components;
use hwmon_core::layout::Layout;
use hwmon_core::{HwResult, Point, Rect};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, FindWindowW, HWND_TOPMOST, IDC_ARROW, LoadCursorW,
    PostMessageW, RegisterClassW, SWP_NOACTIVATE, SWP_NOSIZE, SWP_NOZORDER, SWP_SHOWWINDOW,
    SetWindowPos, WM_CLOSE, WNDCLASSW, WNDPROC, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_POPUP,
};
use windows::core::{PCWSTR, w};

use render::render_overlay;
pub use widgets::Theme;

const CLASS_NAME: PCWSTR = w!("HwmonOverlay");

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered(wnd_proc: WNDPROC) {
    REGISTER_CLASS.call_once(|| {
        let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default();
        let wc = WNDCLASSW {
            lpfnWndProc: wnd_proc,
            lpszClassName: CLASS_NAME,
            hCursor: cursor,
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

/// The overlay's top-level window.
pub struct OverlayWindow {
    hwnd: HWND,
}

impl OverlayWindow {
    /// Creates the hidden overlay window at `frame`. It is shown by the
    /// first [`present`](Self::present).
    pub fn create(frame: Rect, wnd_proc: WNDPROC) -> HwResult<Self> {
        ensure_class_registered(wnd_proc);

        let ex = WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST;
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                CLASS_NAME,
                w!("hwmon"),
                WS_POPUP,
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                None,
                None,
                None,
                None,
            )?
        };

        Ok(Self { hwnd })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Moves the window without repainting.
    pub fn move_to(&self, pos: Point) {
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                None,
                pos.x,
                pos.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    /// Repaints the overlay at `frame` and keeps it visible and topmost.
    pub fn present(
        &self,
        frame: Rect,
        layout: &Layout,
        minimized: bool,
        components: &Components,
        theme: &Theme,
    ) {
        render_overlay(self.hwnd, frame, layout, minimized, components, theme);

        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                SWP_NOACTIVATE | SWP_SHOWWINDOW,
            );
        }
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// Asks a running overlay (in any process) to close.
///
/// Returns `false` when no overlay window exists.
pub fn request_close() -> bool {
    let Ok(hwnd) = (unsafe { FindWindowW(CLASS_NAME, PCWSTR::null()) }) else {
        return false;
    };
    if hwnd.is_invalid() {
        return false;
    }
    unsafe { PostMessageW(Some(hwnd), WM_CLOSE, WPARAM(0), LPARAM(0)) }.is_ok()
}
