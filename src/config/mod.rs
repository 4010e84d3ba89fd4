//! Configuration management for taglist.
//!
//! Settings live in a TOML file in the platform config directory. A missing
//! file is not an error; defaults are used instead.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::Settings;

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// Creating the config directory failed.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// Reading the config file failed.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// Writing the config file failed.
    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The config file is not valid TOML for [`Settings`].
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Default location of the config file.
///
/// `~/.config/taglist/config.toml` on Linux.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("taglist").join("config.toml"))
}
