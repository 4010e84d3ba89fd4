//! Application settings configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{config_path, ConfigError, Result};
use crate::layout::{ChipMeasurer, LayoutOptions, ELLIPSIS};
use crate::tag::TagListMode;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode the tag list starts in.
    pub default_mode: TagListMode,
    /// Cells of padding on each side of a chip's text.
    pub chip_padding: u16,
    /// Blank cells after each chip.
    pub chip_margin: u16,
    /// A truncated chip is only drawn when more than this many cells remain.
    pub min_truncated_width: usize,
    /// Marker appended to a truncated tag.
    pub ellipsis: String,
    /// Event poll interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: TagListMode::Collapsed,
            chip_padding: 1,
            chip_margin: 1,
            min_truncated_width: 8,
            ellipsis: ELLIPSIS.to_string(),
            tick_rate_ms: 100,
        }
    }
}

impl Settings {
    /// Load settings from the default config path.
    ///
    /// Returns defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load settings from `path`, falling back to defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;

        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.ellipsis.is_empty() {
            return Err(ConfigError::ValidationError(
                "ellipsis cannot be empty".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Truncation options for the layout engine.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            min_truncated_width: self.min_truncated_width,
            ellipsis: self.ellipsis.clone(),
        }
    }

    /// Chip measurer matching the configured chrome.
    pub fn measurer(&self) -> ChipMeasurer {
        ChipMeasurer::new(self.chip_padding, self.chip_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_mode = \"edit\"\nmin_truncated_width = 12\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.default_mode, TagListMode::Edit);
        assert_eq!(settings.min_truncated_width, 12);
        assert_eq!(settings.chip_padding, 1);
        assert_eq!(settings.ellipsis, "...");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_mode = [").unwrap();

        let result = Settings::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_mode = \"folded\"").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_empty_ellipsis_rejected() {
        let settings = Settings {
            ellipsis: String::new(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("ellipsis"));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let settings = Settings {
            default_mode: TagListMode::Expanded,
            chip_margin: 2,
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_layout_options_and_measurer() {
        let settings = Settings {
            chip_padding: 2,
            chip_margin: 0,
            min_truncated_width: 5,
            ellipsis: "…".to_string(),
            ..Settings::default()
        };
        let options = settings.layout_options();
        assert_eq!(options.min_truncated_width, 5);
        assert_eq!(options.ellipsis, "…");
        assert_eq!(settings.measurer().chrome(), 4);
    }
}
