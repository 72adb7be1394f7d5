use hwmon_core::config;

/// Prints the configuration `run` would use, after defaults and clamping.
pub fn execute() {
    let config = config::load();
    match toml::to_string(&config) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: could not serialize config: {e}");
            std::process::exit(1);
        }
    }
}
