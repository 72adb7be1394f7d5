//! Ctrl+C handling using `SetConsoleCtrlHandler`.
//!
//! The handler runs on a console thread, so it asks the overlay window
//! to close instead of touching any UI state itself.

use std::sync::atomic::{AtomicUsize, Ordering};

use hwmon_core::HwResult;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::Win32::UI::WindowsAndMessaging::{PostMessageW, WM_CLOSE};
use windows::core::BOOL;

/// Overlay window handle, written by `set_handler`.
static TARGET: AtomicUsize = AtomicUsize::new(0);

/// Routes Ctrl+C and Ctrl+Break to `WM_CLOSE` on `hwnd`.
pub fn set_handler(hwnd: HWND) -> HwResult<()> {
    TARGET.store(hwnd.0 as usize, Ordering::SeqCst);
    // SAFETY: `handler` is a valid `extern "system"` routine for the
    // process lifetime.
    unsafe { SetConsoleCtrlHandler(Some(handler), true)? };
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> BOOL {
    if ctrl_type != CTRL_C_EVENT && ctrl_type != CTRL_BREAK_EVENT {
        return BOOL(0);
    }
    let raw = TARGET.load(Ordering::SeqCst);
    if raw == 0 {
        return BOOL(0);
    }
    // SAFETY: PostMessageW is safe from any thread; a stale handle just fails.
    unsafe {
        let _ = PostMessageW(
            Some(HWND(raw as *mut _)),
            WM_CLOSE,
            WPARAM(0),
            LPARAM(0),
        );
    }
    BOOL(1)
}
