//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/scrolling-menu/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so a partial
//! file (or no file at all) is valid. Command-line flags override whatever
//! is loaded here.
//!
//! ```json
//! {
//!   "theme": "Nord",
//!   "easing": "quartic",
//!   "animation_ms": 250,
//!   "renderer": "windowed",
//!   "log_level": "debug"
//! }
//! ```

use crate::error::{MenuError, Result};
use crate::render::RendererKind;
use crate::scroll::{Easing, EasingKind, DEFAULT_DURATION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Built-in theme name.
    #[serde(default = "default_theme_name")]
    pub theme: String,

    #[serde(default)]
    pub easing: EasingKind,

    /// Duration of the quartic easing. Ignored by the halving easing.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,

    #[serde(default)]
    pub renderer: RendererKind,

    /// `EnvFilter` directive for the log file, e.g. `"debug"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn default_animation_ms() -> u64 {
    DEFAULT_DURATION.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            easing: EasingKind::default(),
            animation_ms: default_animation_ms(),
            renderer: RendererKind::default(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The configured easing, with `animation_ms` applied.
    pub fn scroll_easing(&self) -> Easing {
        self.easing
            .with_duration(Duration::from_millis(self.animation_ms))
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "scrolling-menu").ok_or_else(|| {
            MenuError::Config("could not determine config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "Catppuccin Mocha");
        assert_eq!(config.easing, EasingKind::Halve);
        assert_eq!(config.renderer, RendererKind::Naive);
        assert_eq!(config.animation_ms, 300);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"renderer": "windowed"}"#).expect("deserialize");
        assert_eq!(config.renderer, RendererKind::Windowed);
        assert_eq!(config.theme, "Catppuccin Mocha");
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_scroll_easing_applies_duration() {
        let config = Config {
            easing: EasingKind::Quartic,
            animation_ms: 120,
            ..Config::default()
        };
        assert_eq!(
            config.scroll_easing(),
            Easing::QuarticOut {
                duration: Duration::from_millis(120)
            }
        );
        assert_eq!(Config::default().scroll_easing(), Easing::default());
    }

    #[test]
    fn test_save_to_load_from_roundtrip() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("subdir").join("config.json");

        let config = Config {
            theme: "Nord".to_string(),
            easing: EasingKind::Quartic,
            log_level: Some("debug".to_string()),
            ..Config::default()
        };

        config.save_to(&config_path).expect("save_to");
        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("does_not_exist.json");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_from_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ nope").expect("write");

        let err = Config::load_from(&config_path).expect_err("invalid json");
        assert!(matches!(err, MenuError::Json(_)));
    }

    #[test]
    fn test_deny_unknown_fields() {
        let json = r#"{"theme": "Nord", "unknown_field": true}"#;
        let result: std::result::Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject unknown fields");
    }
}
