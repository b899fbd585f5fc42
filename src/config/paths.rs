//! Platform-specific configuration paths.

use crate::constants::{APP_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/vidclip/`
/// - macOS: `~/Library/Application Support/vidclip/`
/// - Windows: `%APPDATA%\vidclip\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
///
/// `VIDCLIP_CONFIG` takes precedence over the platform location.
pub fn config_file_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}
