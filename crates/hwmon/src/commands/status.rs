use hwmon_windows::process;

pub fn execute() {
    match process::running_instance() {
        Some(pid) => println!("hwmon is running (PID: {pid})."),
        None => println!("hwmon is not running."),
    }
}
