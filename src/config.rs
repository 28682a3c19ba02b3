use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::view::controller::DEFAULT_CODE_THRESHOLD;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_editor")]
    pub show_editor: bool,
    #[serde(default = "default_show_console")]
    pub show_console: bool,
    #[serde(default = "default_code_threshold")]
    pub code_threshold: usize,
    #[serde(default)]
    pub lessons_dir: Option<String>,
    #[serde(default)]
    pub start_chapter: Option<String>,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_show_editor() -> bool {
    true
}
fn default_show_console() -> bool {
    true
}
fn default_code_threshold() -> usize {
    DEFAULT_CODE_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_editor: default_show_editor(),
            show_console: default_show_console(),
            code_threshold: default_code_threshold(),
            lessons_dir: None,
            start_chapter: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::from_toml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content).context("invalid config")?;
        config.validate();
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lessonview")
            .join("config.toml")
    }

    /// Clamp values that would make the view unusable.
    pub fn validate(&mut self) {
        if self.code_threshold == 0 {
            self.code_threshold = 1;
        }
        if self.lessons_dir.as_deref().is_some_and(|d| d.trim().is_empty()) {
            self.lessons_dir = None;
        }
    }

    pub fn lessons_path(&self) -> Option<PathBuf> {
        self.lessons_dir.as_ref().map(PathBuf::from)
    }
}
