use hwmon_core::{config, log, log_info, pid};
use hwmon_windows::process;

pub fn execute() {
    if let Some(pid) = process::running_instance() {
        println!("hwmon is already running (PID: {pid}).");
        return;
    }

    let config = config::load();
    log::init(&config.logging);
    log_info!("hwmon {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = pid::write_pid_file() {
        eprintln!("Warning: could not write PID file: {e}");
    }

    let result = hwmon_windows::app::run(config);
    let _ = pid::remove_pid_file();

    if let Err(e) = result {
        hwmon_core::log_error!("Overlay error: {e}");
        eprintln!("Overlay error: {e}");
        std::process::exit(1);
    }
}
