use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};

use hwmon_windows::process;

/// `CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP`: no console, and Ctrl+C
/// in the launching terminal doesn't reach the overlay.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

pub fn execute() {
    if let Some(pid) = process::running_instance() {
        println!("hwmon is already running (PID: {pid}).");
        return;
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not locate the hwmon executable: {e}");
            std::process::exit(1);
        }
    };

    let spawned = Command::new(exe)
        .arg("run")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn();

    match spawned {
        Ok(mut child) => {
            let pid = child.id();
            // Acknowledge without blocking so the overlay outlives us.
            let _ = child.try_wait();
            println!("hwmon started (PID: {pid}).");
        }
        Err(e) => {
            eprintln!("Error: failed to start hwmon: {e}");
            std::process::exit(1);
        }
    }
}
