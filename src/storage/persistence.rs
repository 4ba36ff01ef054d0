//! JSON persistence helpers for ~/.mindcare/ files.
//!
//! Config, policy and the file-backed store all go through these helpers.
//! The `*_in` variants take an explicit directory so tests and the `--data-dir`
//! flag never touch the real home directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Get the ~/.mindcare/ directory path, creating it if needed.
pub fn mindcare_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".mindcare");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.mindcare/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(mindcare_dir()?.join(filename))
}

/// Load a JSON file from ~/.mindcare/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match mindcare_dir() {
        Ok(dir) => load_json_or_default_in(&dir, filename),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.mindcare/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    save_json_in(&mindcare_dir()?, filename, data)
}

pub fn load_json_or_default_in<T: Default + serde::de::DeserializeOwned>(dir: &Path, filename: &str) -> T {
    let path = dir.join(filename);
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "unreadable json, using defaults");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

pub fn save_json_in<T: serde::Serialize>(dir: &Path, filename: &str, data: &T) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(dir.join(filename), json)?;
    Ok(())
}
