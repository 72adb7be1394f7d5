use hwmon_core::pid;
use hwmon_windows::{overlay, process};

pub fn execute() {
    if overlay::request_close() {
        println!("hwmon stopped.");
        return;
    }

    // No window to close; a PID file may still be left behind.
    match process::running_instance() {
        Some(pid) => {
            eprintln!("hwmon process exists (PID: {pid}) but has no overlay window.");
            std::process::exit(1);
        }
        None => {
            let _ = pid::remove_pid_file();
            println!("hwmon is not running.");
        }
    }
}
