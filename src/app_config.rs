//! Application configuration: initial sensitivity and key bindings.
//!
//! With the `config` feature, configs load from a TOML file:
//!
//! ```toml
//! [sensitivity]
//! baseXYSensitivity = 0.064
//! lookSensitivityX = 0.45
//! macOSToPCScale = 34.72
//!
//! [keys]
//! trigger = 226   # Left Alt
//! popup = 19      # P
//! ```
//!
//! Missing keys fall back to the reference tuning and default bindings.

use crate::error::Result;
use crate::input::KeyBinding;
use crate::settings::SensitivityConfig;

#[cfg(feature = "config")]
use crate::error::AimlinkError;
#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Everything a session needs before the first event arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AppConfig {
    pub sensitivity: SensitivityConfig,
    pub keys: KeyBinding,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.sensitivity.validate()?;
        self.keys.validate()
    }
}

#[cfg(feature = "config")]
impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(source).map_err(|e| AimlinkError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AimlinkError::config(e.to_string()))
    }

    /// Load from an explicit path. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AimlinkError::file_error(format!("Failed to read {}", path.display()), e)
        })?;
        Self::from_toml_str(&source)
    }

    /// `<config dir>/aimlink/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aimlink").join("config.toml"))
    }

    /// Load `explicit` if given, otherwise the default path if it exists,
    /// otherwise built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
