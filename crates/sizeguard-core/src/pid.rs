use std::fs;
use std::path::PathBuf;

use crate::WindowResult;

/// Returns the path to the SizeGuard data directory.
///
/// On Windows: `%LOCALAPPDATA%\sizeguard`
/// Creates the directory if it doesn't exist.
fn data_dir() -> WindowResult<PathBuf> {
    let base =
        std::env::var("LOCALAPPDATA").map_err(|_| "LOCALAPPDATA environment variable not set")?;

    let dir = PathBuf::from(base).join("sizeguard");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the path to the PID file.
pub fn pid_path() -> WindowResult<PathBuf> {
    Ok(data_dir()?.join("sizeguard.pid"))
}

/// Writes the current process's PID to the PID file.
///
/// The PID file lets the CLI detect a running daemon even if the named
/// pipe check fails, and forcibly kill a stuck daemon process.
pub fn write_pid_file() -> WindowResult<()> {
    fs::write(pid_path()?, std::process::id().to_string())?;
    Ok(())
}

/// Reads the PID from the PID file, if it exists.
pub fn read_pid_file() -> WindowResult<Option<u32>> {
    let path = pid_path()?;

    if !path.exists() {
        return Ok(None);
    }

    parse_pid(&fs::read_to_string(&path)?).map(Some)
}

fn parse_pid(contents: &str) -> WindowResult<u32> {
    contents
        .trim()
        .parse()
        .map_err(|e| format!("invalid PID file contents: {e}").into())
}

/// Removes the PID file.
///
/// Called when the daemon shuts down cleanly.
pub fn remove_pid_file() -> WindowResult<()> {
    let path = pid_path()?;

    if path.exists() {
        fs::remove_file(&path)?;
    }

    Ok(())
}
