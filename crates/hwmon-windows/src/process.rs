use hwmon_core::pid;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

/// Checks whether a process with the given PID is still alive.
pub fn is_process_alive(pid: u32) -> bool {
    // SAFETY: opening with the least-privilege query right just to see
    // whether the process exists.
    match unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) } {
        Ok(handle) => {
            // SAFETY: the handle was opened above and isn't used again.
            unsafe {
                let _ = CloseHandle(handle);
            }
            true
        }
        Err(_) => false,
    }
}

/// PID of a live overlay recorded in the PID file.
///
/// A PID file left behind by a process that no longer exists is removed.
pub fn running_instance() -> Option<u32> {
    let pid = pid::read_pid_file().ok().flatten()?;
    if pid != std::process::id() && is_process_alive(pid) {
        return Some(pid);
    }
    hwmon_core::log_debug!("Removing stale PID file for {pid}");
    let _ = pid::remove_pid_file();
    None
}
