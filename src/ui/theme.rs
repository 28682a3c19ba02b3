use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub dim: String,
    pub accent: String,
    pub border: String,
    pub banner_bg: String,
    pub banner_fg: String,
    pub heading: String,
    pub code_bg: String,
    pub code_fg: String,
    pub console_bg: String,
    pub console_fg: String,
    pub toggle_on: String,
    pub toggle_off: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("lessonview")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!("ignoring theme {}: {e}", user_theme_path.display()),
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            dim: "#585b70".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            banner_bg: "#313244".to_string(),
            banner_fg: "#f9e2af".to_string(),
            heading: "#cba6f7".to_string(),
            code_bg: "#181825".to_string(),
            code_fg: "#a6e3a1".to_string(),
            console_bg: "#11111b".to_string(),
            console_fg: "#bac2de".to_string(),
            toggle_on: "#a6e3a1".to_string(),
            toggle_off: "#f38ba8".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn dim(&self) -> Color { Self::parse_color(&self.dim) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn banner_bg(&self) -> Color { Self::parse_color(&self.banner_bg) }
    pub fn banner_fg(&self) -> Color { Self::parse_color(&self.banner_fg) }
    pub fn heading(&self) -> Color { Self::parse_color(&self.heading) }
    pub fn code_bg(&self) -> Color { Self::parse_color(&self.code_bg) }
    pub fn code_fg(&self) -> Color { Self::parse_color(&self.code_fg) }
    pub fn console_bg(&self) -> Color { Self::parse_color(&self.console_bg) }
    pub fn console_fg(&self) -> Color { Self::parse_color(&self.console_fg) }
    pub fn toggle_on(&self) -> Color { Self::parse_color(&self.toggle_on) }
    pub fn toggle_off(&self) -> Color { Self::parse_color(&self.toggle_off) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
}
