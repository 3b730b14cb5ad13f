//! File-backed tracing setup. The terminal belongs to the arena, so log
//! lines never go to stdout or stderr while a match runs.

use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "snake_duel.log";
const DEFAULT_FILTER: &str = "info";

/// `<platform data dir>/snake_duel.log`, if a home directory can be determined.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "snake-duel").map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
}

/// Filter from `RUST_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber appending to `path` (or the default log
/// file). Returns the file in use, or `None` when no location is available.
pub fn init_logging(path: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(Some(path))
}
