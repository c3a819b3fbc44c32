use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Name of the session directory created under the platform temp dir
    #[serde(default = "default_dir_name")]
    pub dir_name: String,

    /// Thumbnail bounding box width in pixels
    #[serde(default = "default_thumbnail_max_width")]
    pub thumbnail_max_width: u32,

    /// Thumbnail bounding box height in pixels
    #[serde(default = "default_thumbnail_max_height")]
    pub thumbnail_max_height: u32,

    /// How long a path label shows "Copied!" after a click
    #[serde(default = "default_copied_feedback_ms")]
    pub copied_feedback_ms: u64,

    /// Delay before scrolling to a freshly pasted row
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,

    /// Log level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional log file (rotated daily). Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            dir_name: default_dir_name(),
            thumbnail_max_width: default_thumbnail_max_width(),
            thumbnail_max_height: default_thumbnail_max_height(),
            copied_feedback_ms: default_copied_feedback_ms(),
            scroll_delay_ms: default_scroll_delay_ms(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

// Default value functions for serde
fn default_dir_name() -> String {
    "pasteimg".to_string()
}

fn default_thumbnail_max_width() -> u32 {
    400
}

fn default_thumbnail_max_height() -> u32 {
    200
}

fn default_copied_feedback_ms() -> u64 {
    500
}

fn default_scroll_delay_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Optional `#rrggbb` overrides for the built-in palette
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorConfig {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub path_bg: Option<String>,
    pub path_fg: Option<String>,
    pub path_hover_bg: Option<String>,
    pub info: Option<String>,
    pub error: Option<String>,
    pub tooltip_bg: Option<String>,
    pub tooltip_fg: Option<String>,
}

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration, falling back to defaults when no file exists
    fn load(&self) -> Result<Config>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        // The program never writes its own config, a missing file just means defaults
        if !self.path.exists() {
            log::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::debug!(
            "Loaded config from {:?}: thumbnail box {}x{}",
            self.path,
            config.general.thumbnail_max_width,
            config.general.thumbnail_max_height
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneralConfig::default();
        assert_eq!(config.dir_name, "pasteimg");
        assert_eq!(config.thumbnail_max_width, 400);
        assert_eq!(config.thumbnail_max_height, 200);
        assert_eq!(config.copied_feedback_ms, 500);
        assert_eq!(config.scroll_delay_ms, 50);
        assert_eq!(config.log_level, "info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_str = r##"
        [general]
        thumbnail_max_width = 320
        log_file = "/tmp/pasteimg.log"

        [colors]
        info = "#00ff00"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.thumbnail_max_width, 320);
        assert_eq!(config.general.thumbnail_max_height, 200);
        assert_eq!(
            config.general.log_file,
            Some(PathBuf::from("/tmp/pasteimg.log"))
        );
        assert_eq!(config.colors.info.as_deref(), Some("#00ff00"));
        assert!(config.colors.error.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults_without_creating_it() {
        let path = std::env::temp_dir()
            .join(format!("pasteimg-config-test-{}", std::process::id()))
            .join("pasteimg.toml");
        let storage = TomlConfigStorage::new(path.clone());

        let config = storage.load().unwrap();
        assert_eq!(config.general.copied_feedback_ms, 500);
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = std::env::temp_dir().join(format!("pasteimg-badcfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pasteimg.toml");
        fs::write(&path, "[general\nthumbnail_max_width = ").unwrap();

        let storage = TomlConfigStorage::new(path.clone());
        assert!(storage.load().is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
