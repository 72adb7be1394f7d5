use std::ffi::OsString;
use std::path::PathBuf;

use super::Config;

/// Overrides the config directory when set to a non-empty path.
pub const CONFIG_DIR_ENV: &str = "HWMON_CONFIG_DIR";

/// Returns the config directory: `$HWMON_CONFIG_DIR` if set, otherwise
/// `~/.config/hwmon/`.
pub fn config_dir() -> Option<PathBuf> {
    dir_from(std::env::var_os(CONFIG_DIR_ENV), dirs::home_dir())
}

fn dir_from(overridden: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match overridden {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home.map(|h| h.join(".config").join("hwmon")),
    }
}

/// Returns the config file path: `~/.config/hwmon/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(None)` when the file does not exist, `Ok(Some(Config))`
/// on success, or an error string describing what went wrong.
pub fn try_load() -> Result<Option<Config>, String> {
    let path = config_path().ok_or("could not determine config path")?;
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(Some(config))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults; read or parse errors are
/// logged and also return defaults.
pub fn load() -> Config {
    match try_load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            crate::log_warn!("Failed to load config: {e}");
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
