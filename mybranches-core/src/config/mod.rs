use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const APP_NAME: &str = "mybranches";

fn config_dir() -> Option<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Branch name prefix to list. Defaults to your login name.
    /// ```toml
    /// pattern = "alice/"
    /// ```
    pub pattern: Option<String>,

    /// Cleanup behaviour.
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct CleanupConfig {
    /// Only count local branches whose remote is gone, never delete them.
    /// ```toml
    /// [cleanup]
    /// dry_run = true
    /// ```
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Cursor marker and highlighted names (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_selected",
        deserialize_with = "deserialize_color"
    )]
    pub selected: ThemeColor,
    /// The "(current)" badge (default: "green").
    #[serde(
        default = "ThemeConfig::default_current",
        deserialize_with = "deserialize_color"
    )]
    pub current: ThemeColor,
    /// Keys in the help footer (default: "white").
    #[serde(
        default = "ThemeConfig::default_help_key",
        deserialize_with = "deserialize_color"
    )]
    pub help_key: ThemeColor,
    /// Descriptions and separators in the help footer (default: "dark_gray").
    #[serde(
        default = "ThemeConfig::default_help_text",
        deserialize_with = "deserialize_color"
    )]
    pub help_text: ThemeColor,
    /// Cleanup progress spinner (default: "magenta").
    #[serde(
        default = "ThemeConfig::default_spinner",
        deserialize_with = "deserialize_color"
    )]
    pub spinner: ThemeColor,
    /// Error messages (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            selected: Self::default_selected(),
            current: Self::default_current(),
            help_key: Self::default_help_key(),
            help_text: Self::default_help_text(),
            spinner: Self::default_spinner(),
            error: Self::default_error(),
        }
    }
}

impl ThemeConfig {
    fn default_selected() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_current() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_help_key() -> ThemeColor {
        ThemeColor::Named(NamedColor::White)
    }
    fn default_help_text() -> ThemeColor {
        ThemeColor::Named(NamedColor::DarkGray)
    }
    fn default_spinner() -> ThemeColor {
        ThemeColor::Named(NamedColor::Magenta)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("dark_gray", NamedColor::DarkGray),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        // Handle aliases not in the canonical list
        let lookup = match lower.as_str() {
            "grey" => "gray",
            "dark_grey" | "darkgray" | "darkgrey" => "dark_gray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey, dark_gray) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file. An explicit `config_override` must exist; a missing
/// default file just means defaults.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => match config_file() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };
    log::debug!("loading config from {}", config_file.display());
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("Invalid config in {}", config_file.display()))
}
