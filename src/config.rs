//! Configuration file handling for glyphgrid.
//!
//! Loads configuration from `~/.config/glyphgrid/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ascii::{CharSet, ColorMode, ConversionOptions, DEFAULT_WIDTH};
use crate::decode::{FetchSettings, DEFAULT_NETWORK_RETRIES};

/// Default debounce window for live preview, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Configuration file structure for glyphgrid.
/// Loaded from ~/.config/glyphgrid/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ConvertConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    /// Preset ramp id
    #[serde(default)]
    pub charset: CharSet,
    /// Custom ramp, overrides `charset` when set
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default = "default_one")]
    pub contrast: f64,
    #[serde(default = "default_one")]
    pub brightness: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            charset: CharSet::default(),
            characters: None,
            color_mode: ColorMode::default(),
            contrast: default_one(),
            brightness: default_one(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct PreviewConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_one() -> f64 {
    1.0
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_timeout_secs() -> u64 {
    crate::decode::DEFAULT_TIMEOUT.as_secs()
}

fn default_retries() -> u32 {
    DEFAULT_NETWORK_RETRIES
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Conversion options described by the `[convert]` section.
    pub fn conversion_options(&self) -> ConversionOptions {
        let c = &self.convert;
        ConversionOptions {
            width: c.width,
            characters: c
                .characters
                .clone()
                .unwrap_or_else(|| c.charset.characters().to_string()),
            color_mode: c.color_mode,
            contrast: c.contrast,
            brightness: c.brightness,
        }
    }

    /// Download settings described by the `[fetch]` section.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Duration::from_secs(self.fetch.timeout_secs),
            retries: self.fetch.retries,
            ..FetchSettings::default()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.preview.debounce_ms)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphgrid").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphgrid/config.toml")
        })
}

/// Commented default configuration written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# glyphgrid configuration

[convert]
# Output width in characters
width = 100
# Character ramp preset: dense, medium, sparse, blocks, simple
charset = "medium"
# Custom ramp, brightest cell first (overrides charset)
# characters = " .:-=+*#%@"
# Color mode: grayscale, colored
color_mode = "grayscale"
# Contrast gain around mid-gray (1.0 = unchanged)
contrast = 1.0
# Brightness offset (1.0 = unchanged)
brightness = 1.0

[preview]
# Delay before re-rendering after a change, in milliseconds
debounce_ms = 300

[fetch]
# Download timeout for remote images, in seconds
timeout_secs = 30
# Retries for transient network errors
retries = 3
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{OptionsError, MAX_WIDTH};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("none.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.conversion_options(), ConversionOptions::default());
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[convert]\nwidth = 64\ncharset = \"blocks\"\ncolor_mode = \"colored\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        let options = config.conversion_options();
        assert_eq!(options.width, 64);
        assert_eq!(options.characters, CharSet::Blocks.characters());
        assert_eq!(options.color_mode, ColorMode::Colored);
        assert_eq!(options.contrast, 1.0);
        assert_eq!(config.preview.debounce_ms, 300);
    }

    #[test]
    fn test_custom_characters_override_charset() {
        let config: Config =
            toml::from_str("[convert]\ncharset = \"dense\"\ncharacters = \"ab\"\n").unwrap();
        assert_eq!(config.conversion_options().characters, "ab");
    }

    #[test]
    fn test_oversized_width_fails_validation() {
        let config: Config = toml::from_str("[convert]\nwidth = 4294967295\n").unwrap();
        assert_eq!(
            config.conversion_options().validate(),
            Err(OptionsError::WidthTooLarge {
                width: u32::MAX,
                max: MAX_WIDTH
            })
        );
    }

    #[test]
    fn test_fetch_settings() {
        let config: Config = toml::from_str("[fetch]\ntimeout_secs = 5\nretries = 0\n").unwrap();
        let settings = config.fetch_settings();
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.retries, 0);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[convert\nwidth = ").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("glyphgrid/config.toml"));
    }
}
