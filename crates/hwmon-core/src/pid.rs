use std::fs;
use std::path::PathBuf;

use crate::HwResult;

/// Returns the path to the hwmon data directory.
///
/// On Windows: `%LOCALAPPDATA%\hwmon`. Creates the directory if it
/// doesn't exist.
fn data_dir() -> HwResult<PathBuf> {
    let base =
        std::env::var("LOCALAPPDATA").map_err(|_| "LOCALAPPDATA environment variable not set")?;

    let dir = PathBuf::from(base).join("hwmon");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the path to the PID file.
pub fn pid_path() -> HwResult<PathBuf> {
    Ok(data_dir()?.join("hwmon.pid"))
}

/// Writes the current process's PID to the PID file.
///
/// Called when the overlay starts so `status` and `run` can detect a
/// running instance.
pub fn write_pid_file() -> HwResult<()> {
    fs::write(pid_path()?, std::process::id().to_string())?;
    Ok(())
}

/// Reads the PID from the PID file, if it exists.
pub fn read_pid_file() -> HwResult<Option<u32>> {
    let path = pid_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    Ok(Some(parse_pid(&contents)?))
}

/// Removes the PID file. Called when the overlay exits.
pub fn remove_pid_file() -> HwResult<()> {
    let path = pid_path()?;

    if path.exists() {
        fs::remove_file(&path)?;
    }

    Ok(())
}

fn parse_pid(contents: &str) -> HwResult<u32> {
    let pid = contents
        .trim()
        .parse()
        .map_err(|e| format!("invalid PID file contents: {e}"))?;
    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pid_trims_whitespace() {
        assert_eq!(parse_pid("4242\r\n").unwrap(), 4242);
    }

    #[test]
    fn parse_pid_rejects_garbage() {
        let err = parse_pid("not-a-pid").unwrap_err();
        assert!(err.to_string().starts_with("invalid PID file contents"));
    }
}
