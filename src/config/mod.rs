use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::picker::{self, WheelConfig};

/// Tallest the wheels may get, in rows
pub const MAX_WHEEL_ROWS: usize = 200;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("visible_items must be odd so one item can be centered (got {0})")]
    EvenVisibleItems(usize),
    #[error("item_height must be at least one row")]
    ZeroItemHeight,
    #[error("visible_items * item_height must be at most 200 rows")]
    WheelTooTall,
    #[error("{0} labels must not be empty")]
    EmptyLabels(&'static str),
    #[error("sheet snap_percent must be between 1 and 100 (got {0})")]
    SnapPercent(u16),
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Rows per item
    pub item_height: u16,
    /// Items shown at once, odd
    pub visible_items: usize,
}

impl WheelSettings {
    /// Rows the wheels take up, saturating at `u16::MAX`
    pub fn rows(&self) -> u16 {
        u16::try_from(self.visible_items)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.item_height)
    }
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            item_height: 1,
            visible_items: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    /// Sheet height as a percentage of the terminal
    pub snap_percent: u16,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self { snap_percent: 30 }
    }
}

/// Optional "#RRGGBB" overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hour labels, "00".."23" when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<Vec<String>>,

    /// Minute labels
    #[serde(default = "picker::default_minute_labels")]
    pub minutes: Vec<String>,

    /// Hour shown on the home screen before anything is picked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_hour: Option<String>,

    #[serde(default = "default_minute")]
    pub default_minute: String,

    /// How often "now" is re-read while the picker is open
    #[serde(default = "default_clock_refresh_secs")]
    pub clock_refresh_secs: u64,

    #[serde(default)]
    pub wheel: WheelSettings,

    #[serde(default)]
    pub sheet: SheetSettings,

    #[serde(default)]
    pub theme: ThemeSettings,
}

fn default_minute() -> String {
    "30".to_string()
}

fn default_clock_refresh_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hours: None,
            minutes: picker::default_minute_labels(),
            default_hour: None,
            default_minute: default_minute(),
            clock_refresh_secs: default_clock_refresh_secs(),
            wheel: WheelSettings::default(),
            sheet: SheetSettings::default(),
            theme: ThemeSettings::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("wheeltime");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Ok(p) => p,
                Err(_) => return Ok(AppConfig::default()),
            },
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Ignoring config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wheel.visible_items % 2 == 0 {
            return Err(ConfigError::EvenVisibleItems(self.wheel.visible_items));
        }
        if self.wheel.item_height == 0 {
            return Err(ConfigError::ZeroItemHeight);
        }
        let rows = self.wheel.visible_items.checked_mul(self.wheel.item_height as usize);
        if rows.map_or(true, |rows| rows > MAX_WHEEL_ROWS) {
            return Err(ConfigError::WheelTooTall);
        }
        if self.minutes.is_empty() {
            return Err(ConfigError::EmptyLabels("minute"));
        }
        if self.hours.as_ref().is_some_and(|h| h.is_empty()) {
            return Err(ConfigError::EmptyLabels("hour"));
        }
        if !(1..=100).contains(&self.sheet.snap_percent) {
            return Err(ConfigError::SnapPercent(self.sheet.snap_percent));
        }
        Ok(())
    }

    pub fn hour_labels(&self) -> Vec<String> {
        self.hours.clone().unwrap_or_else(picker::hour_labels)
    }

    pub fn wheel_config(&self) -> WheelConfig {
        WheelConfig {
            item_height: self.wheel.item_height as f32,
            visible_items: self.wheel.visible_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            hours: Some(vec!["08".to_string(), "09".to_string()]),
            default_hour: Some("09".to_string()),
            theme: ThemeSettings {
                highlight: Some("#a1b596".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(config.hours, deserialized.hours);
        assert_eq!(config.minutes, deserialized.minutes);
        assert_eq!(config.theme.highlight, deserialized.theme.highlight);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.minutes, vec!["00", "15", "30", "45", "00"]);
        assert_eq!(config.default_minute, "30");
        assert_eq!(config.hour_labels().len(), 24);
        assert_eq!(config.wheel.visible_items, 5);
        assert_eq!(config.sheet.snap_percent, 30);
    }

    #[test]
    fn test_partial_wheel_section() {
        let config = AppConfig::parse("[wheel]\nvisible_items = 7\n").unwrap();
        assert_eq!(config.wheel.visible_items, 7);
        assert_eq!(config.wheel.item_height, 1);
        assert_eq!(config.wheel_config().item_height, 1.0);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AppConfig::default();
        config.wheel.visible_items = 4;
        assert_eq!(config.validate(), Err(ConfigError::EvenVisibleItems(4)));

        let mut config = AppConfig::default();
        config.wheel.item_height = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroItemHeight));

        let mut config = AppConfig::default();
        config.minutes.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyLabels("minute")));

        let mut config = AppConfig::default();
        config.sheet.snap_percent = 0;
        assert_eq!(config.validate(), Err(ConfigError::SnapPercent(0)));

        assert!(AppConfig::parse("minutes = []").is_err());
    }

    #[test]
    fn test_wheel_height_is_bounded() {
        let config = AppConfig::parse("[wheel]\nitem_height = 20000\nvisible_items = 5\n");
        assert!(config.is_err());

        let mut config = AppConfig::default();
        config.wheel.visible_items = usize::MAX;
        assert_eq!(config.validate(), Err(ConfigError::WheelTooTall));

        // 40 * 5 is exactly the limit
        config.wheel.visible_items = 5;
        config.wheel.item_height = 40;
        assert_eq!(config.validate(), Ok(()));
        config.wheel.item_height = 41;
        assert_eq!(config.validate(), Err(ConfigError::WheelTooTall));
    }

    #[test]
    fn test_wheel_rows_saturate() {
        let wheel = WheelSettings {
            item_height: 20000,
            visible_items: 5,
        };
        assert_eq!(wheel.rows(), u16::MAX);
        assert_eq!(WheelSettings::default().rows(), 5);
    }
}
