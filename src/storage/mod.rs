pub mod config;

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub use config::{ColorConfig, Config, ConfigStorage, GeneralConfig, TomlConfigStorage};

/// Default config file location
///
/// XDG Base Directory Specification:
/// - Config: $XDG_CONFIG_HOME/pasteimg/pasteimg.toml (default: ~/.config/pasteimg/pasteimg.toml)
///
/// None when neither variable is set. Nothing is created here; the file is optional.
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))
}

fn config_path_from(xdg_config: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config) = xdg_config.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg_config).join("pasteimg/pasteimg.toml"));
    }

    home.filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".config/pasteimg/pasteimg.toml"))
}

/// Load the config at `path`, or the defaults when there is no location to look in
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => TomlConfigStorage::new(path).load(),
        None => {
            log::debug!("No config location resolved, using defaults");
            Ok(Config::default())
        }
    }
}

/// Ensure the session directory `<platform temp dir>/<dir_name>` exists
pub fn ensure_session_dir(dir_name: &str) -> Result<PathBuf> {
    session_dir_in(&env::temp_dir(), dir_name)
}

fn session_dir_in(base: &Path, dir_name: &str) -> Result<PathBuf> {
    let dir = base.join(dir_name);

    // Saved paths are shown and copied as text
    if dir.to_str().is_none() {
        bail!("Save directory {:?} is not valid UTF-8", dir);
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create save directory {:?}", dir))?;

    log::debug!("Session directory: {:?}", dir);
    Ok(dir)
}
