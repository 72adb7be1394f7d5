use std::mem;

use hwmon_core::snap;
use hwmon_core::{HwResult, Monitor, Rect, log_warn};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};
use windows::core::BOOL;

/// Lists every display with its full bounds and work area.
///
/// The work area excludes the taskbar and docked toolbars; the overlay
/// snaps to it. Monitors whose info can't be read are skipped.
pub fn enumerate_monitors() -> HwResult<Vec<Monitor>> {
    let mut handles: Vec<HMONITOR> = Vec::new();

    // SAFETY: the callback only runs during this call, while `handles`
    // is alive, and receives it back through LPARAM.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(collect_monitor),
            LPARAM(&mut handles as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err("EnumDisplayMonitors failed".into());
    }

    Ok(handles.into_iter().filter_map(monitor_info).collect())
}

/// Monitors for snapping. Never empty: when enumeration fails or finds
/// nothing, the whole primary screen stands in as one monitor.
pub fn monitors_or_screen() -> Vec<Monitor> {
    let monitors = enumerate_monitors().unwrap_or_else(|e| {
        log_warn!("Failed to enumerate monitors: {e}");
        Vec::new()
    });
    // SAFETY: GetSystemMetrics has no preconditions.
    let (w, h) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    snap::or_screen(monitors, w, h)
}

unsafe extern "system" fn collect_monitor(
    monitor: HMONITOR,
    _dc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec passed by enumerate_monitors().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    handles.push(monitor);
    BOOL(1)
}

fn monitor_info(monitor: HMONITOR) -> Option<Monitor> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: cbSize is set as the API requires.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        hwmon_core::log_debug!("GetMonitorInfoW failed for {monitor:?}");
        return None;
    }

    Some(Monitor::new(to_rect(info.rcMonitor), to_rect(info.rcWork)))
}

fn to_rect(rc: RECT) -> Rect {
    Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom)
}
