use crate::common::config_files::{default_config_dir, resolve_config_path};
use crate::engine::ENGINES_FILE;
use crate::usage::USAGE_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Engines file, relative to the settings file unless absolute.
    #[serde(default = "default_engines_file")]
    pub engines_file: String,
    /// Directory for user icons. Defaults to `icons` next to the settings file.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// When enabled the logger is initialised at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional log file. Logs go to stderr when absent.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Usage history file. `None` disables usage based ranking.
    #[serde(default = "default_usage_file")]
    pub usage_file: Option<String>,
    /// Share of the remaining score headroom granted to frequently used
    /// engines, between `0.0` and `1.0`.
    #[serde(default = "default_usage_weight")]
    pub usage_weight: f32,
}

fn default_engines_file() -> String {
    ENGINES_FILE.to_string()
}

fn default_usage_file() -> Option<String> {
    Some(USAGE_FILE.to_string())
}

fn default_usage_weight() -> f32 {
    0.5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engines_file: default_engines_file(),
            data_dir: None,
            debug_logging: false,
            log_file: None,
            usage_file: default_usage_file(),
            usage_weight: default_usage_weight(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn engines_path(&self, settings_path: &Path) -> PathBuf {
        resolve_config_path(settings_path, &self.engines_file)
    }

    pub fn data_path(&self, settings_path: &Path) -> PathBuf {
        resolve_config_path(settings_path, self.data_dir.as_deref().unwrap_or("icons"))
    }

    pub fn usage_path(&self, settings_path: &Path) -> Option<PathBuf> {
        self.usage_file
            .as_deref()
            .map(|file| resolve_config_path(settings_path, file))
    }

    pub fn log_path(&self, settings_path: &Path) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .map(|file| resolve_config_path(settings_path, file))
    }
}

/// `settings.json` in the user's configuration directory.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join(SETTINGS_FILE)
}
