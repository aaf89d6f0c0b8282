//! Persisted auth flag and theme preference.
//!
//! Stored as `preferences.json` in the data directory. Reads are lenient:
//! a missing or unreadable file falls back to defaults.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

const PREFERENCES_FILE: &str = "preferences.json";

/// Errors raised while persisting preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Writing the preference file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Preferences could not be serialized.
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
    /// Theme name other than light, dark or system.
    #[error("unknown theme preference: {0} (expected light, dark or system)")]
    UnknownTheme(String),
}

/// Resolved color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

/// User-selected theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the system scheme.
    #[default]
    System,
}

impl ThemePreference {
    /// Wire value of the preference.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Resolve to a concrete scheme. `System` follows `system`, defaulting to light.
    #[must_use]
    pub fn resolve(self, system: Option<ColorScheme>) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::System => system.unwrap_or_default(),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(PreferenceError::UnknownTheme(s.to_owned())),
        }
    }
}

/// Persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the user signed in.
    #[serde(default)]
    pub authenticated: bool,
    /// Selected theme.
    #[serde(default)]
    pub theme: ThemePreference,
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Open the store under `data_dir`. Missing or corrupt files yield defaults.
    pub fn load(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir.as_ref().join(PREFERENCES_FILE);
        let prefs = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring corrupt preferences file");
                Preferences::default()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Preferences::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read preferences");
                Preferences::default()
            }
        };
        Self { path, prefs }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current values.
    #[must_use]
    pub const fn preferences(&self) -> Preferences {
        self.prefs
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.prefs.authenticated
    }

    /// Current theme preference.
    #[must_use]
    pub const fn theme(&self) -> ThemePreference {
        self.prefs.theme
    }

    /// Mark the session as signed in and persist.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written; the in-memory flag is still set.
    pub fn sign_in(&mut self) -> Result<(), PreferenceError> {
        self.prefs.authenticated = true;
        info!("signed in");
        self.save()
    }

    /// Clear the signed-in flag and persist.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written; the in-memory flag is still cleared.
    pub fn sign_out(&mut self) -> Result<(), PreferenceError> {
        self.prefs.authenticated = false;
        info!("signed out");
        self.save()
    }

    /// Change the theme preference and persist.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub fn set_theme(&mut self, theme: ThemePreference) -> Result<(), PreferenceError> {
        self.prefs.theme = theme;
        info!(theme = %theme, "theme preference updated");
        self.save()
    }

    fn save(&self) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(&self.prefs)?;
        fs::write(&self.path, body).map_err(io_err)
    }
}
