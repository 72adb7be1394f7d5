use hwmon_core::format::LocalTime;
use windows::Win32::System::SystemInformation::GetLocalTime;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

/// Declares the process per-monitor DPI aware (V2).
///
/// Monitor rectangles and cursor positions are then raw pixels on every
/// display, which the snap arithmetic relies on. Call once at startup
/// before creating windows.
pub fn enable_dpi_awareness() {
    // SAFETY: fails harmlessly when awareness was already set by a manifest.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// The current wall-clock time in the user's time zone.
pub fn local_time() -> LocalTime {
    // SAFETY: GetLocalTime has no preconditions.
    let st = unsafe { GetLocalTime() };
    LocalTime {
        year: st.wYear,
        month: st.wMonth,
        day: st.wDay,
        weekday: st.wDayOfWeek,
        hour: st.wHour,
        minute: st.wMinute,
        second: st.wSecond,
    }
}
