// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawTaskFile, TaskFile};
use crate::errors::Result;

/// Name of the task file looked up when `--config` is not given.
pub const DEFAULT_TASK_FILE: &str = "Taskweave.toml";

/// Load a task file from a given path and return the raw `RawTaskFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (references, cycles, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawTaskFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_raw(&contents)
}

/// Parse TOML text into a `RawTaskFile`.
pub fn parse_raw(contents: &str) -> Result<RawTaskFile> {
    let raw: RawTaskFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a task file from path and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde`).
/// - Checks for:
///   - tasks with zero or several bodies,
///   - unknown task references,
///   - composition cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TaskFile> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let file = TaskFile::try_from(raw)?;
    debug!(path = %path.display(), tasks = file.len(), "loaded task file");
    Ok(file)
}

/// Same as [`load_and_validate`] for in-memory TOML.
pub fn parse_and_validate(contents: &str) -> Result<TaskFile> {
    TaskFile::try_from(parse_raw(contents)?)
}

/// Default task file path: `Taskweave.toml` in the current directory, unless
/// `TASKWEAVE_FILE` is set.
pub fn default_config_path() -> PathBuf {
    std::env::var_os("TASKWEAVE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TASK_FILE))
}
