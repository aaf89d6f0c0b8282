use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use taskdeck_core::{Palette, TaskColor};

const APP_DIR: &str = "taskdeck";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration loaded from `<config_dir>/taskdeck/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding persisted preferences.
    #[serde(default)]
    data_dir: Option<PathBuf>,
    /// Task color palette overrides.
    #[serde(default)]
    pub palette: PaletteConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or from the platform config directory when `None`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) => Self::from_file(path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read, parsed or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error on invalid TOML or an invalid palette section.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the data directory (used by the `--data-dir` flag).
    #[must_use]
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = Some(dir);
        self
    }

    /// Directory for persisted preferences: the configured one, else `<data_dir>/taskdeck`.
    ///
    /// # Errors
    /// Returns an error when no directory is configured and the platform has no data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| anyhow!("failed to resolve a data directory; pass --data-dir"))
    }

    fn validate(&self) -> Result<()> {
        self.palette.build().map(|_| ())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// `[palette]` configuration block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaletteConfig {
    /// Color id or hex code used for tasks created without a color.
    #[serde(default)]
    default: Option<String>,
    /// Replacement palette. Empty means the built-in palette.
    #[serde(default)]
    colors: Vec<TaskColor>,
}

impl PaletteConfig {
    /// Build the effective palette.
    ///
    /// # Errors
    /// Returns an error on invalid colors or a default that is not in the palette.
    pub fn build(&self) -> Result<Palette> {
        let mut palette = if self.colors.is_empty() {
            Palette::default()
        } else {
            Palette::new(self.colors.clone())?
        };
        if let Some(default) = self.default.as_deref() {
            if default.trim().is_empty() {
                bail!("default palette color must not be empty");
            }
            if !palette.set_default(default) {
                bail!("default palette color '{default}' is not defined in the palette");
            }
        }
        Ok(palette)
    }
}
